// state.rs - lattice plus the running scalars kept in step with it

use crate::energy::total_energy;
use crate::lattice::Lattice;
use crate::params::SystemParams;

/// Mutable microstate owned by exactly one simulation.
///
/// `energy` is the raw Hamiltonian and `spin_sum` the signed Σ s. Both are
/// computed by full summation once, in [`SpinState::new`], and afterwards only
/// changed through [`SpinState::apply_flip`].
#[derive(Debug, Clone)]
pub struct SpinState {
    lattice: Lattice,
    energy: f64,
    spin_sum: i64,
}

impl SpinState {
    pub fn new(lattice: Lattice, params: &SystemParams) -> Self {
        let energy = total_energy(&lattice, params);
        let spin_sum = lattice.spin_sum();
        Self { lattice, energy, spin_sum }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    /// Flip `(x, y)` and fold its energy change into the running totals.
    #[inline]
    pub(crate) fn apply_flip(&mut self, x: usize, y: usize, delta_energy: f64) {
        let new_spin = self.lattice.flip(x, y);
        self.energy += delta_energy;
        self.spin_sum += 2 * new_spin as i64;
    }

    /// Running H / N².
    #[inline]
    pub fn energy_per_site(&self) -> f64 {
        self.energy / self.lattice.n_sites() as f64
    }

    /// Running |Σ s| / N².
    #[inline]
    pub fn magnetisation(&self) -> f64 {
        self.spin_sum.abs() as f64 / self.lattice.n_sites() as f64
    }

    /// Signed Σ s.
    #[inline]
    pub fn spin_sum(&self) -> i64 {
        self.spin_sum
    }
}
