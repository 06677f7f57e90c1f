// lattice.rs - N×N spin grid on a torus

use crate::error::{IsingError, Result};
use rand::Rng;

/// Square lattice of ±1 spins with periodic boundary conditions.
///
/// Sites are stored row-major: site `(x, y)` lives at `x * size + y`.
/// The only mutation path after construction is [`Lattice::flip`], so every
/// cell holds exactly +1 or -1 for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Independent uniform ±1 spins drawn from a caller-supplied RNG.
    pub fn random_with(rng: &mut impl Rng, size: usize) -> Result<Self> {
        check_size(size)?;
        let spins = (0..size * size)
            .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
            .collect();
        Ok(Self { size, spins })
    }

    /// Every site set to `spin` (the ordered ground state for `spin = ±1`).
    pub fn uniform(size: usize, spin: i8) -> Result<Self> {
        check_size(size)?;
        if spin != 1 && spin != -1 {
            return Err(IsingError::InvalidSpin { index: 0, value: spin });
        }
        Ok(Self {
            size,
            spins: vec![spin; size * size],
        })
    }

    /// Build from an explicit row-major configuration of length `size²`.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Result<Self> {
        check_size(size)?;
        if spins.len() != size * size {
            return Err(IsingError::InvalidParameter(format!(
                "expected {} spins for a {size}x{size} lattice, got {}",
                size * size,
                spins.len()
            )));
        }
        if let Some((index, &value)) = spins.iter().enumerate().find(|&(_, &s)| s != 1 && s != -1) {
            return Err(IsingError::InvalidSpin { index, value });
        }
        Ok(Self { size, spins })
    }

    /// Linear extent N.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites N².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.size + y
    }

    /// Spin at `(x, y)`; both indices must be `< size`.
    #[inline(always)]
    pub fn spin(&self, x: usize, y: usize) -> i8 {
        self.spins[self.index(x, y)]
    }

    /// Negate the spin at `(x, y)` and return its new value.
    #[inline]
    pub fn flip(&mut self, x: usize, y: usize) -> i8 {
        let i = self.index(x, y);
        self.spins[i] = -self.spins[i];
        self.spins[i]
    }

    /// The four nearest neighbours of `(x, y)` with wraparound, in the order
    /// `(x+1, y)`, `(x, y+1)`, `(x-1, y)`, `(x, y-1)`.
    #[inline]
    pub fn neighbours(&self, x: usize, y: usize) -> [(usize, usize); 4] {
        let n = self.size;
        [
            ((x + 1) % n, y),
            (x, (y + 1) % n),
            ((x + n - 1) % n, y),
            (x, (y + n - 1) % n),
        ]
    }

    /// Σ of the four neighbouring spins of `(x, y)`.
    #[inline]
    pub fn neighbour_sum(&self, x: usize, y: usize) -> i32 {
        self.neighbours(x, y)
            .iter()
            .map(|&(nx, ny)| self.spin(nx, ny) as i32)
            .sum()
    }

    /// Signed Σ s over all sites.
    pub fn spin_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Row-major view of the configuration.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(IsingError::InvalidParameter(
            "lattice size must be a positive integer".into(),
        ));
    }
    Ok(())
}
