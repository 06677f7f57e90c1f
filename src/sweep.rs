// sweep.rs - single-spin-flip Metropolis updates

use crate::energy::site_energy;
use crate::params::SystemParams;
use crate::state::SpinState;
use rand::Rng;

/// Returned by [`metropolis_sweep`] so the driver can track acceptance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepInfo {
    /// Number of accepted flips in this sweep.
    pub accepted: usize,
    /// Change in the raw Hamiltonian over the sweep.
    pub delta_energy: f64,
    /// Change in the signed spin sum over the sweep.
    pub delta_spin: i64,
}

/// Metropolis decision for site `(x, y)`, applied immediately.
///
/// A uniform draw is consumed only when ΔE ≥ 0, so a given RNG stream
/// always produces the same trajectory.
#[inline]
pub fn metropolis_step(
    state: &mut SpinState,
    x: usize,
    y: usize,
    params: &SystemParams,
    rng: &mut impl Rng,
) -> Option<f64> {
    // On a 1x1 torus every neighbour is the site itself, so only the field
    // term changes on a flip.
    let coupling = if state.lattice().size() == 1 { 0.0 } else { params.coupling() };
    let delta_energy = -2.0 * site_energy(state.lattice(), x, y, coupling, params.field());

    let accept = if delta_energy < 0.0 {
        true
    } else {
        (-delta_energy / params.acceptance_denominator()).exp() > rng.gen::<f64>()
    };

    if accept {
        state.apply_flip(x, y, delta_energy);
        Some(delta_energy)
    } else {
        None
    }
}

/// One sweep: every site visited once in raster order (x outer, y inner),
/// each decision seeing all flips made earlier in the same sweep.
pub fn metropolis_sweep(
    state: &mut SpinState,
    params: &SystemParams,
    rng: &mut impl Rng,
) -> SweepInfo {
    let n = state.lattice().size();
    let spin_before = state.spin_sum();
    let mut info = SweepInfo::default();

    for x in 0..n {
        for y in 0..n {
            if let Some(delta) = metropolis_step(state, x, y, params, rng) {
                info.accepted += 1;
                info.delta_energy += delta;
            }
        }
    }

    info.delta_spin = state.spin_sum() - spin_before;
    info
}
