// observables.rs - macroscopic averages over a recorded trajectory

/// Mean and mean-of-squares of the energy and magnetisation trajectories.
///
/// Heat capacity and susceptibility are fluctuation observables derived from
/// these four numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub mean_energy: f64,
    pub mean_magnetisation: f64,
    pub mean_energy_sq: f64,
    pub mean_magnetisation_sq: f64,
}

impl Summary {
    pub fn from_series(energy: &[f64], magnetisation: &[f64]) -> Self {
        Self {
            mean_energy: mean(energy),
            mean_magnetisation: mean(magnetisation),
            mean_energy_sq: mean_sq(energy),
            mean_magnetisation_sq: mean_sq(magnetisation),
        }
    }

    /// ⟨E²⟩ − ⟨E⟩².
    pub fn heat_capacity(&self) -> f64 {
        self.mean_energy_sq - self.mean_energy.powi(2)
    }

    /// ⟨M²⟩ − ⟨M⟩².
    pub fn susceptibility(&self) -> f64 {
        self.mean_magnetisation_sq - self.mean_magnetisation.powi(2)
    }

    /// Specific heat per site from the fluctuation-dissipation relation,
    /// `N² var(E) / T²` for per-site energies.
    pub fn specific_heat(&self, temperature: f64, n_sites: usize) -> f64 {
        n_sites as f64 * self.heat_capacity() / (temperature * temperature)
    }

    /// `N² var(M) / T`.
    pub fn scaled_susceptibility(&self, temperature: f64, n_sites: usize) -> f64 {
        n_sites as f64 * self.susceptibility() / temperature
    }
}

fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

fn mean_sq(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments() {
        let s = Summary::from_series(&[-2.0, -1.0, 0.0], &[1.0, 0.5, 0.0]);
        assert_relative_eq!(s.mean_energy, -1.0);
        assert_relative_eq!(s.mean_energy_sq, 5.0 / 3.0);
        assert_relative_eq!(s.mean_magnetisation, 0.5);
        assert_relative_eq!(s.mean_magnetisation_sq, 1.25 / 3.0);
        assert_relative_eq!(s.heat_capacity(), 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(s.susceptibility(), 1.25 / 3.0 - 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_has_no_fluctuations() {
        let s = Summary::from_series(&[-2.0; 10], &[1.0; 10]);
        assert_eq!(s.heat_capacity(), 0.0);
        assert_eq!(s.susceptibility(), 0.0);
        assert_eq!(s.specific_heat(1.5, 100), 0.0);
    }

    #[test]
    fn test_scaled_forms() {
        let s = Summary::from_series(&[-1.0, 1.0], &[0.0, 1.0]);
        // var(E) = 1, var(M) = 0.25
        assert_relative_eq!(s.specific_heat(2.0, 16), 4.0);
        assert_relative_eq!(s.scaled_susceptibility(2.0, 16), 2.0);
    }
}
