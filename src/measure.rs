/// Record per-sweep observables of a run
use crate::lattice::Lattice;
use crate::observables::Summary;
use crate::state::SpinState;

/// Append-only energy / magnetisation history, one entry per sweep boundary
/// (entry 0 is the initial state).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub energy: Vec<f64>,
    pub magnetisation: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            energy: Vec::with_capacity(n),
            magnetisation: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// ⟨E⟩, ⟨M⟩, ⟨E²⟩, ⟨M²⟩ over the whole trajectory.
    pub fn summary(&self) -> Summary {
        Summary::from_series(&self.energy, &self.magnetisation)
    }
}

/// Collects the trajectory and, when asked, a full lattice copy per sweep.
#[derive(Debug, Default)]
pub struct Recorder {
    pub trajectory: Trajectory,
    pub snapshots: Option<Vec<Lattice>>,
}

impl Recorder {
    pub fn new(n_records: usize, keep_snapshots: bool) -> Self {
        Self {
            trajectory: Trajectory::with_capacity(n_records),
            snapshots: keep_snapshots.then(|| Vec::with_capacity(n_records)),
        }
    }

    /// Push the running scalars of `state` (and its lattice, if retained).
    pub fn push(&mut self, state: &SpinState) {
        self.trajectory.energy.push(state.energy_per_site());
        self.trajectory.magnetisation.push(state.magnetisation());
        if let Some(snaps) = &mut self.snapshots {
            snaps.push(state.lattice().clone());
        }
    }
}
