//! Equilibration study: E and |M| against sweep number for several lattice
//! sizes and temperatures.
//!
//! Every (N, T) pair is an independent run. Each trajectory goes to its own
//! CSV; a `decorrelation.csv` table collects the 1/e decorrelation time of
//! both observables after the equilibration cut.
//
//  Reproduce the size study:        `cargo run --release --bin equilibration`
//  Reproduce the temperature study: `... -- --sizes 25 --temperatures 0.1,0.5,1,2,2.2,2.4,2.6,3 --sweeps 5000`

use clap::Parser;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use ising_mc::autocorrelation::{autocorrelation, check_equilibration, decorr_time};
use ising_mc::io::save_trajectory;
use ising_mc::utils::rng::stream_rng;
use ising_mc::{AcceptanceRule, IsingError, IsingSystem, SystemParams};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Lattice sizes to study
    #[arg(long, default_value = "10,20,30,40", value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Temperatures to study
    #[arg(long, default_value = "1.0", value_delimiter = ',')]
    temperatures: Vec<f64>,

    /// Exchange coupling J
    #[arg(long, default_value = "1.0")]
    coupling: f64,

    /// External field h
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    field: f64,

    /// Acceptance rule: boltzmann or coupling-scaled
    #[arg(long, default_value = "boltzmann")]
    acceptance: AcceptanceRule,

    /// Metropolis sweeps per run
    #[arg(short, long, default_value = "50000")]
    sweeps: usize,

    /// Sweeps discarded before the autocorrelation analysis
    #[arg(long, default_value = "1000")]
    equilibration: usize,

    /// Master RNG seed
    #[arg(long, default_value = "24301")]
    seed: u64,

    /// Output directory
    #[arg(long, default_value = "equilibration")]
    output_dir: PathBuf,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
struct Row {
    size: usize,
    temperature: f64,
    final_energy: f64,
    final_magnetisation: f64,
    tau_energy: Option<usize>,
    tau_magnetisation: Option<usize>,
}

/// Decorrelation time of `x` after the cut; a constant tail has none.
fn tau(x: &[f64], equilibration: usize) -> Result<Option<usize>, IsingError> {
    match autocorrelation(x, equilibration) {
        Ok(corr) => Ok(decorr_time(&corr)),
        Err(IsingError::ZeroVariance) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Append `row`; a worker that panicked mid-push leaves the table usable.
fn record(rows: &Mutex<Vec<Row>>, row: Row) {
    rows.lock().unwrap_or_else(PoisonError::into_inner).push(row);
}

fn fmt_tau(t: Option<usize>) -> String {
    t.map(|v| v.to_string()).unwrap_or_default()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    check_equilibration(args.equilibration, args.sweeps)?;

    // Validate every parameter set before spending any compute.
    let mut jobs = Vec::new();
    for &size in &args.sizes {
        for &t in &args.temperatures {
            let params = SystemParams::with_rule(t, args.coupling, args.field, args.acceptance)?;
            jobs.push((size, params));
        }
    }
    info!("Running {} equilibration runs of {} sweeps", jobs.len(), args.sweeps);

    fs::create_dir_all(&args.output_dir)?;

    let bar = ProgressBar::new(jobs.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let rows: Mutex<Vec<Row>> = Mutex::new(Vec::new());

    jobs.par_iter()
        .enumerate()
        .try_for_each(|(idx, &(size, params))| -> Result<(), IsingError> {
            let mut rng = stream_rng(args.seed, idx);
            let mut system = IsingSystem::new_with(&mut rng, size, params)?;
            let run = system.run(args.sweeps, &mut rng);

            let name = format!("trajectory_n{size}_t{}.csv", params.temperature());
            save_trajectory(args.output_dir.join(name), &run.trajectory)?;

            let tau_energy = tau(&run.trajectory.energy, args.equilibration)?;
            let tau_magnetisation = tau(&run.trajectory.magnetisation, args.equilibration)?;
            if tau_magnetisation.is_none() {
                warn!(size, temperature = params.temperature(), "|M| never decorrelated to 1/e");
            }

            let row = Row {
                size,
                temperature: params.temperature(),
                final_energy: run.trajectory.energy.last().copied().unwrap_or(f64::NAN),
                final_magnetisation: run.trajectory.magnetisation.last().copied().unwrap_or(f64::NAN),
                tau_energy,
                tau_magnetisation,
            };
            record(&rows, row);
            bar.inc(1);
            Ok(())
        })?;
    bar.finish();

    let mut rows = rows.into_inner().unwrap_or_else(PoisonError::into_inner);
    rows.sort_by(|a, b| {
        a.size
            .cmp(&b.size)
            .then(a.temperature.total_cmp(&b.temperature))
    });

    let mut wtr = WriterBuilder::new().from_path(args.output_dir.join("decorrelation.csv"))?;
    wtr.write_record([
        "size",
        "temperature",
        "final_energy",
        "final_magnetisation",
        "tau_energy",
        "tau_magnetisation",
    ])?;
    for r in &rows {
        info!(
            "N={:>3} T={:<5} E_final={:>9.5} |M|_final={:.5} tau_E={} tau_M={}",
            r.size,
            r.temperature,
            r.final_energy,
            r.final_magnetisation,
            fmt_tau(r.tau_energy),
            fmt_tau(r.tau_magnetisation),
        );
        wtr.write_record(&[
            r.size.to_string(),
            r.temperature.to_string(),
            r.final_energy.to_string(),
            r.final_magnetisation.to_string(),
            fmt_tau(r.tau_energy),
            fmt_tau(r.tau_magnetisation),
        ])?;
    }
    wtr.flush()?;

    info!("Equilibration study complete → {}", args.output_dir.display());
    Ok(())
}
