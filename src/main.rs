//! Single Metropolis run of the 2D Ising model.
//!
//! Prints the four macroscopic averages and, optionally, dumps the energy /
//! magnetisation trajectory for plotting.

use clap::Parser;
use ising_mc::autocorrelation::{autocorrelation, check_equilibration, decorr_time};
use ising_mc::io::save_trajectory;
use ising_mc::utils::rng::stream_rng;
use ising_mc::{AcceptanceRule, IsingError, IsingSystem, SystemParams};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Linear lattice size N
    #[arg(short = 'n', long, default_value = "10")]
    size: usize,

    /// Temperature in units of J/k_B
    #[arg(short, long, default_value = "1.0")]
    temperature: f64,

    /// Exchange coupling J
    #[arg(long, default_value = "1.0")]
    coupling: f64,

    /// External field h
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    field: f64,

    /// Number of Metropolis sweeps
    #[arg(short, long, default_value = "1000")]
    sweeps: usize,

    /// Acceptance rule: boltzmann or coupling-scaled
    #[arg(long, default_value = "boltzmann")]
    acceptance: AcceptanceRule,

    /// Sweeps discarded before the autocorrelation analysis
    #[arg(long, default_value = "100")]
    equilibration: usize,

    /// RNG seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Write the trajectory to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let params = SystemParams::with_rule(args.temperature, args.coupling, args.field, args.acceptance)?;
    check_equilibration(args.equilibration, args.sweeps)?;
    let mut rng = stream_rng(args.seed, 0);
    let mut system = IsingSystem::new_with(&mut rng, args.size, params)?;
    let run = system.run(args.sweeps, &mut rng);

    if let Some(path) = &args.output {
        save_trajectory(path, &run.trajectory)?;
        info!("Trajectory written to {}", path.display());
    }

    let p = system.params();
    println!(
        "N = {}, T = {}, J = {}, h = {}, {} acceptance",
        args.size,
        p.temperature(),
        p.coupling(),
        p.field(),
        p.rule()
    );

    let s = &run.summary;
    println!("<E>    = {:.6}", s.mean_energy);
    println!("<|M|>  = {:.6}", s.mean_magnetisation);
    println!("<E^2>  = {:.6}", s.mean_energy_sq);
    println!("<M^2>  = {:.6}", s.mean_magnetisation_sq);
    println!("C      = {:.6}", s.heat_capacity());
    println!("chi    = {:.6}", s.susceptibility());
    println!("acc.   = {:.4}", run.acceptance_rate);

    match autocorrelation(&run.trajectory.magnetisation, args.equilibration) {
        Ok(corr) => match decorr_time(&corr) {
            Some(tau) => println!("tau_M  = {tau} sweeps"),
            None => println!("tau_M  = undefined"),
        },
        Err(IsingError::ZeroVariance) => println!("tau_M  = undefined (constant |M|)"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
