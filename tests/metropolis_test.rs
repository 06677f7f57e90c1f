//! Sweep-engine invariants: spins stay ±1 and the incremental running
//! scalars agree with a from-scratch recomputation.

use approx::assert_abs_diff_eq;
use ising_mc::energy::{energy_per_site, magnetisation_per_site};
use ising_mc::state::SpinState;
use ising_mc::sweep::{metropolis_step, metropolis_sweep};
use ising_mc::{AcceptanceRule, Lattice, SystemParams};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_pcg::Pcg64;

fn assert_consistent(state: &SpinState, params: &SystemParams) {
    let lat = state.lattice();
    assert_abs_diff_eq!(state.energy_per_site(), energy_per_site(lat, params), epsilon = 1e-9);
    assert_eq!(state.magnetisation(), magnetisation_per_site(lat));
    assert_eq!(state.spin_sum(), lat.spin_sum());
}

#[test]
fn test_incremental_scalars_match_recomputation() {
    let cases = [
        (1.0, 1.0, 0.0),
        (2.269, 1.0, 0.0),
        (0.5, 1.0, 0.3),
        (3.0, 0.7, -1.2),
        (1.5, -1.0, 0.0),
        (4.0, 1.0, 2.5),
    ];
    let mut rng = ChaCha20Rng::seed_from_u64(0xDEADBEEF);

    for &(t, j, h) in &cases {
        let params = SystemParams::new(t, j, h).unwrap();
        let lattice = Lattice::random_with(&mut rng, 12).unwrap();
        let mut state = SpinState::new(lattice, &params);
        assert_consistent(&state, &params);

        for _ in 0..50 {
            metropolis_sweep(&mut state, &params, &mut rng);
            assert_consistent(&state, &params);
        }
    }
}

#[test]
fn test_spins_remain_unit_valued() {
    let mut rng = Pcg64::seed_from_u64(42);
    for &(t, h) in &[(0.1, 0.0), (2.0, 0.5), (10.0, -3.0)] {
        let params = SystemParams::new(t, 1.0, h).unwrap();
        let mut state = SpinState::new(Lattice::random_with(&mut rng, 9).unwrap(), &params);
        for _ in 0..100 {
            metropolis_sweep(&mut state, &params, &mut rng);
        }
        assert!(state.into_lattice().spins().iter().all(|&s| s == 1 || s == -1));
    }
}

#[test]
fn test_sweep_info_reports_net_change() {
    let params = SystemParams::new(2.5, 1.0, 0.2).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut state = SpinState::new(Lattice::random_with(&mut rng, 8).unwrap(), &params);

    let e0 = state.energy_per_site();
    let m0 = state.spin_sum();
    let info = metropolis_sweep(&mut state, &params, &mut rng);

    assert!(info.accepted <= 64);
    assert_eq!(state.spin_sum() - m0, info.delta_spin);
    assert_abs_diff_eq!(
        state.energy_per_site() - e0,
        info.delta_energy / 64.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_energy_lowering_flip_always_accepted() {
    // An isolated down spin in an up background: ΔE = -8J, accepted with
    // no random draw whatever the temperature.
    let params = SystemParams::new(0.01, 1.0, 0.0).unwrap();
    let mut spins = vec![1i8; 25];
    spins[12] = -1;
    let mut state = SpinState::new(Lattice::from_spins(5, spins).unwrap(), &params);
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let delta = metropolis_step(&mut state, 2, 2, &params, &mut rng);
    assert_eq!(delta, Some(-8.0));
    assert_eq!(state.lattice().spin(2, 2), 1);
    assert_eq!(state.magnetisation(), 1.0);
}

#[test]
fn test_ground_state_is_stable_at_low_temperature() {
    let params = SystemParams::new(0.05, 1.0, 0.0).unwrap();
    let mut state = SpinState::new(Lattice::uniform(10, 1).unwrap(), &params);
    let mut rng = ChaCha20Rng::seed_from_u64(3);

    for _ in 0..200 {
        let info = metropolis_sweep(&mut state, &params, &mut rng);
        assert_eq!(info.accepted, 0);
    }
    assert_eq!(state.magnetisation(), 1.0);
    assert_abs_diff_eq!(state.energy_per_site(), -2.0, epsilon = 1e-12);
}

#[test]
fn test_rules_coincide_for_unit_coupling() {
    let boltzmann = SystemParams::new(1.7, 1.0, 0.1).unwrap();
    let scaled = SystemParams::with_rule(1.7, 1.0, 0.1, AcceptanceRule::CouplingScaled).unwrap();

    let lattice = Lattice::random_with(&mut ChaCha20Rng::seed_from_u64(5), 10).unwrap();
    let mut a = SpinState::new(lattice.clone(), &boltzmann);
    let mut b = SpinState::new(lattice, &scaled);
    let mut rng_a = ChaCha20Rng::seed_from_u64(77);
    let mut rng_b = ChaCha20Rng::seed_from_u64(77);

    for _ in 0..20 {
        metropolis_sweep(&mut a, &boltzmann, &mut rng_a);
        metropolis_sweep(&mut b, &scaled, &mut rng_b);
    }
    assert_eq!(a.lattice(), b.lattice());
}

#[test]
fn test_acceptance_rate_between_extremes() {
    let params = SystemParams::new(2.0, 1.0, 0.0).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0xDEADBEEF);
    let mut state = SpinState::new(Lattice::random_with(&mut rng, 16).unwrap(), &params);

    let mut accepted = 0usize;
    let n_sweeps = 200;
    for _ in 0..n_sweeps {
        accepted += metropolis_sweep(&mut state, &params, &mut rng).accepted;
    }
    let acc_rate = accepted as f64 / (n_sweeps * 256) as f64;

    assert!(
        (0.01..=0.99).contains(&acc_rate),
        "Acceptance rate {acc_rate:.3} is outside plausible range"
    );
}

#[test]
fn test_single_site_torus_tracks_field_only() {
    let params = SystemParams::new(1.0, 1.0, 0.5).unwrap();
    let mut state = SpinState::new(Lattice::uniform(1, -1).unwrap(), &params);
    let mut rng = ChaCha20Rng::seed_from_u64(21);

    for _ in 0..100 {
        metropolis_sweep(&mut state, &params, &mut rng);
        assert_consistent(&state, &params);
    }
}
