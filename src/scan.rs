//! Temperature scans: one independent run per temperature.
//!
//! Each temperature gets its own lattice and its own RNG stream derived from
//! the master seed and the temperature's index, so a scan is reproducible
//! regardless of how rayon schedules the runs.

use crate::autocorrelation::{autocorrelation, check_equilibration, decorr_time, integrated_time};
use crate::error::{IsingError, Result};
use crate::observables::Summary;
use crate::params::{AcceptanceRule, SystemParams};
use crate::simulation::IsingSystem;
use crate::utils::rng::stream_rng;
use rayon::prelude::*;
use tracing::{info, warn};

/// Run-time configuration of a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub size: usize,
    pub temperatures: Vec<f64>,
    pub coupling: f64,
    pub field: f64,
    pub rule: AcceptanceRule,
    pub num_sweeps: usize,
    /// Sweeps discarded before the magnetisation autocorrelation.
    pub equilibration: usize,
    pub seed: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            size: 10,
            temperatures: linspace(0.1, 3.0, 30),
            coupling: 1.0,
            field: 0.0,
            rule: AcceptanceRule::Boltzmann,
            num_sweeps: 50_000,
            equilibration: 1_000,
            seed: 0x5EED,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(IsingError::InvalidParameter("size must be >= 1".into()));
        }
        if self.temperatures.is_empty() {
            return Err(IsingError::InvalidParameter(
                "at least one temperature is required".into(),
            ));
        }
        check_equilibration(self.equilibration, self.num_sweeps)?;
        for &t in &self.temperatures {
            SystemParams::with_rule(t, self.coupling, self.field, self.rule)?;
        }
        Ok(())
    }
}

/// Macroscopic result at one temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPoint {
    pub temperature: f64,
    pub summary: Summary,
    pub acceptance_rate: f64,
    /// Sweeps until |M| decorrelates to 1/e; `None` if it never does or the
    /// post-equilibration series is constant.
    pub decorrelation: Option<usize>,
    pub integrated_time: Option<f64>,
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Run every temperature of `cfg`, results sorted by temperature.
pub fn run_scan(cfg: &ScanConfig) -> Result<Vec<ScanPoint>> {
    run_scan_with(cfg, |_| {})
}

/// As [`run_scan`], calling `on_point` as each temperature finishes.
pub fn run_scan_with<F>(cfg: &ScanConfig, on_point: F) -> Result<Vec<ScanPoint>>
where
    F: Fn(&ScanPoint) + Sync + Send,
{
    cfg.validate()?;
    info!(
        size = cfg.size,
        n_temperatures = cfg.temperatures.len(),
        num_sweeps = cfg.num_sweeps,
        rule = %cfg.rule,
        "starting temperature scan"
    );

    let mut points = cfg
        .temperatures
        .par_iter()
        .enumerate()
        .map(|(idx, &temperature)| {
            let point = run_point(cfg, idx, temperature)?;
            on_point(&point);
            Ok(point)
        })
        .collect::<Result<Vec<_>>>()?;

    points.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
    Ok(points)
}

fn run_point(cfg: &ScanConfig, idx: usize, temperature: f64) -> Result<ScanPoint> {
    let params = SystemParams::with_rule(temperature, cfg.coupling, cfg.field, cfg.rule)?;
    let mut rng = stream_rng(cfg.seed, idx);
    let mut system = IsingSystem::new_with(&mut rng, cfg.size, params)?;
    let run = system.run(cfg.num_sweeps, &mut rng);

    let (decorrelation, integrated) =
        match autocorrelation(&run.trajectory.magnetisation, cfg.equilibration) {
            Ok(corr) => (decorr_time(&corr), Some(integrated_time(&corr))),
            Err(IsingError::ZeroVariance) => (None, None),
            Err(e) => return Err(e),
        };
    if decorrelation.is_none() {
        warn!(temperature, "magnetisation never decorrelated to 1/e");
    }

    info!(
        temperature,
        mean_energy = run.summary.mean_energy,
        mean_magnetisation = run.summary.mean_magnetisation,
        acceptance_rate = run.acceptance_rate,
        "temperature done"
    );

    Ok(ScanPoint {
        temperature,
        summary: run.summary,
        acceptance_rate: run.acceptance_rate,
        decorrelation,
        integrated_time: integrated,
    })
}
