use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic RNG for independent stream `stream` under a master seed.
///
/// The pair is mixed with the splitmix64 finaliser so neighbouring stream
/// ids give unrelated ChaCha seeds.
pub fn stream_rng(master: u64, stream: usize) -> ChaCha20Rng {
    let mut x = master ^ (stream as u64).wrapping_mul(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    ChaCha20Rng::seed_from_u64(x)
}
