// io.rs - flat numeric array dumps for plotting collaborators
//
// Values are written with `f64::to_string`, the shortest representation that
// parses back to the same bits, so a save/load cycle is lossless.

use crate::error::{IsingError, Result};
use crate::measure::Trajectory;
use crate::scan::ScanPoint;
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

fn parse_f64(field: &str, line: u64) -> Result<f64> {
    field
        .trim()
        .parse()
        .map_err(|e| IsingError::Parse(format!("line {line}: '{field}': {e}")))
}

fn opt_to_field<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// One value per line, no header.
pub fn save_array(path: impl AsRef<Path>, values: &[f64]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
    for v in values {
        wtr.write_record([v.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Inverse of [`save_array`].
pub fn load_array(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let mut rdr = ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let field = record
            .get(0)
            .ok_or_else(|| IsingError::Parse(format!("line {}: empty record", i + 1)))?;
        out.push(parse_f64(field, i as u64 + 1)?);
    }
    Ok(out)
}

/// `sweep,energy,magnetisation` rows.
pub fn save_trajectory(path: impl AsRef<Path>, trajectory: &Trajectory) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["sweep", "energy", "magnetisation"])?;
    for (sweep, (e, m)) in trajectory
        .energy
        .iter()
        .zip(trajectory.magnetisation.iter())
        .enumerate()
    {
        wtr.write_record(&[sweep.to_string(), e.to_string(), m.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Inverse of [`save_trajectory`]; the sweep column must count up from 0.
pub fn load_trajectory(path: impl AsRef<Path>) -> Result<Trajectory> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut traj = Trajectory::default();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = i as u64 + 2;
        if record.len() != 3 {
            return Err(IsingError::Parse(format!(
                "line {line}: expected 3 fields, got {}",
                record.len()
            )));
        }
        let sweep: usize = record[0]
            .trim()
            .parse()
            .map_err(|e| IsingError::Parse(format!("line {line}: sweep '{}': {e}", &record[0])))?;
        if sweep != i {
            return Err(IsingError::Parse(format!(
                "line {line}: expected sweep {i}, found {sweep}"
            )));
        }
        traj.energy.push(parse_f64(&record[1], line)?);
        traj.magnetisation.push(parse_f64(&record[2], line)?);
    }
    Ok(traj)
}

/// One row per temperature; undefined decorrelation data is left empty.
pub fn save_scan(path: impl AsRef<Path>, points: &[ScanPoint], n_sites: usize) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "temperature",
        "mean_energy",
        "mean_magnetisation",
        "mean_energy_sq",
        "mean_magnetisation_sq",
        "heat_capacity",
        "susceptibility",
        "specific_heat",
        "scaled_susceptibility",
        "acceptance_rate",
        "decorrelation_time",
        "integrated_time",
    ])?;
    for p in points {
        let s = &p.summary;
        wtr.write_record(&[
            p.temperature.to_string(),
            s.mean_energy.to_string(),
            s.mean_magnetisation.to_string(),
            s.mean_energy_sq.to_string(),
            s.mean_magnetisation_sq.to_string(),
            s.heat_capacity().to_string(),
            s.susceptibility().to_string(),
            s.specific_heat(p.temperature, n_sites).to_string(),
            s.scaled_susceptibility(p.temperature, n_sites).to_string(),
            p.acceptance_rate.to_string(),
            opt_to_field(p.decorrelation),
            opt_to_field(p.integrated_time),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
