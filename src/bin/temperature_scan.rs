//! Macroscopic observables against temperature.
//!
//! Runs one independent simulation per temperature (in parallel), writes a
//! combined CSV plus one flat array file per observable so a plotting script
//! can reload E(T), M(T), C(T) and χ(T) individually.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_mc::io::{save_array, save_scan};
use ising_mc::scan::{linspace, run_scan_with, ScanConfig, ScanPoint};
use ising_mc::AcceptanceRule;
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Linear lattice size N
    #[arg(short = 'n', long, default_value = "10")]
    size: usize,

    /// Temperature grid (min,max,count)
    #[arg(long, default_value = "0.1,3.0,30", value_delimiter = ',')]
    t_range: Vec<f64>,

    /// Explicit temperatures; overrides --t-range
    #[arg(long, value_delimiter = ',')]
    temperatures: Option<Vec<f64>>,

    /// Exchange coupling J
    #[arg(long, default_value = "1.0")]
    coupling: f64,

    /// External field h
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    field: f64,

    /// Acceptance rule: boltzmann or coupling-scaled
    #[arg(long, default_value = "boltzmann")]
    acceptance: AcceptanceRule,

    /// Metropolis sweeps per temperature
    #[arg(short, long, default_value = "50000")]
    sweeps: usize,

    /// Sweeps discarded before the autocorrelation analysis
    #[arg(long, default_value = "1000")]
    equilibration: usize,

    /// Master RNG seed
    #[arg(long, default_value = "24301")]
    seed: u64,

    /// Output directory
    #[arg(long, default_value = "macro_variables")]
    output_dir: PathBuf,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn temperatures(args: &Cli) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    if let Some(t) = &args.temperatures {
        return Ok(t.clone());
    }
    match args.t_range.as_slice() {
        &[lo, hi, count] if count >= 1.0 && count.fract() == 0.0 => {
            Ok(linspace(lo, hi, count as usize))
        }
        _ => Err("--t-range expects min,max,count with an integer count >= 1".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let cfg = ScanConfig {
        size: args.size,
        temperatures: temperatures(&args)?,
        coupling: args.coupling,
        field: args.field,
        rule: args.acceptance,
        num_sweeps: args.sweeps,
        equilibration: args.equilibration,
        seed: args.seed,
    };
    info!("Scan configuration:\n{cfg:#?}");

    fs::create_dir_all(&args.output_dir)?;

    let bar = ProgressBar::new(cfg.temperatures.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let points = run_scan_with(&cfg, |_| bar.inc(1))?;
    bar.finish();

    let n_sites = cfg.size * cfg.size;
    save_scan(args.output_dir.join("scan.csv"), &points, n_sites)?;

    let column = |f: fn(&ScanPoint) -> f64| points.iter().map(f).collect::<Vec<f64>>();
    save_array(args.output_dir.join("T.csv"), &column(|p| p.temperature))?;
    save_array(args.output_dir.join("E.csv"), &column(|p| p.summary.mean_energy))?;
    save_array(args.output_dir.join("M.csv"), &column(|p| p.summary.mean_magnetisation))?;
    save_array(args.output_dir.join("C.csv"), &column(|p| p.summary.heat_capacity()))?;
    save_array(args.output_dir.join("chi.csv"), &column(|p| p.summary.susceptibility()))?;

    info!("Scan complete → {}", args.output_dir.display());
    Ok(())
}
