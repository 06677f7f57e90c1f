//! Metropolis Monte Carlo for the 2D Ising model on a periodic square lattice.

pub mod error;
pub mod lattice;
pub mod params;
pub mod energy;
pub mod state;
pub mod sweep;
pub mod measure;
pub mod observables;
pub mod simulation;
pub mod autocorrelation;
pub mod io;
pub mod scan;
pub mod utils;

pub use error::{IsingError, Result};
pub use lattice::Lattice;
pub use params::{AcceptanceRule, SystemParams};
pub use simulation::{IsingSystem, Run};
