//! Simulation driver: owns one microstate and runs Metropolis sweeps over it.
//!
//! The RNG is never stored; every call that needs randomness takes one, so a
//! seeded generator reproduces a run exactly.

use crate::error::Result;
use crate::lattice::Lattice;
use crate::measure::{Recorder, Trajectory};
use crate::observables::Summary;
use crate::params::SystemParams;
use crate::state::SpinState;
use crate::sweep::metropolis_sweep;
use rand::Rng;
use tracing::debug;

/// Output of [`IsingSystem::run`].
#[derive(Debug, Clone)]
pub struct Run {
    /// `num_sweeps + 1` entries, sweep 0 included.
    pub trajectory: Trajectory,
    pub summary: Summary,
    /// Accepted flips / attempted flips over all sweeps.
    pub acceptance_rate: f64,
    /// Lattice after every sweep boundary, when recording was enabled.
    pub snapshots: Option<Vec<Lattice>>,
}

/// A 2D Ising system at fixed (T, J, h).
#[derive(Debug, Clone)]
pub struct IsingSystem {
    params: SystemParams,
    state: SpinState,
    keep_snapshots: bool,
}

impl IsingSystem {
    /// Random ±1 lattice of linear size `size`, drawn from `rng`.
    pub fn new_with(rng: &mut impl Rng, size: usize, params: SystemParams) -> Result<Self> {
        let lattice = Lattice::random_with(rng, size)?;
        Ok(Self::from_lattice(lattice, params))
    }

    /// Start from a given configuration.
    pub fn from_lattice(lattice: Lattice, params: SystemParams) -> Self {
        Self {
            state: SpinState::new(lattice, &params),
            params,
            keep_snapshots: false,
        }
    }

    /// Retain a full lattice copy per sweep in [`Run::snapshots`].
    pub fn record_snapshots(mut self, keep: bool) -> Self {
        self.keep_snapshots = keep;
        self
    }

    pub fn params(&self) -> &SystemParams {
        &self.params
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn lattice(&self) -> &Lattice {
        self.state.lattice()
    }

    /// Record the current state, then perform `num_sweeps` sweeps recording
    /// after each one.
    pub fn run(&mut self, num_sweeps: usize, rng: &mut impl Rng) -> Run {
        let n_sites = self.state.lattice().n_sites();
        debug!(
            size = self.state.lattice().size(),
            temperature = self.params.temperature(),
            coupling = self.params.coupling(),
            field = self.params.field(),
            rule = %self.params.rule(),
            num_sweeps,
            "starting Metropolis run"
        );

        let mut recorder = Recorder::new(num_sweeps + 1, self.keep_snapshots);
        recorder.push(&self.state);

        let mut accepted = 0usize;
        for _ in 0..num_sweeps {
            let info = metropolis_sweep(&mut self.state, &self.params, rng);
            accepted += info.accepted;
            recorder.push(&self.state);
        }

        let attempts = num_sweeps * n_sites;
        let acceptance_rate = if attempts > 0 {
            accepted as f64 / attempts as f64
        } else {
            0.0
        };
        let summary = recorder.trajectory.summary();

        debug!(
            acceptance_rate,
            mean_energy = summary.mean_energy,
            mean_magnetisation = summary.mean_magnetisation,
            "Metropolis run finished"
        );

        Run {
            trajectory: recorder.trajectory,
            summary,
            acceptance_rate,
            snapshots: recorder.snapshots,
        }
    }
}
