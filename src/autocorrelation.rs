// autocorrelation.rs - time-lag correlation of recorded trajectories

use crate::error::{IsingError, Result};

/// Normalised autocorrelation of `x` after discarding its first
/// `equilibration` entries.
///
/// For the remaining series `y` of length `n`, with mean and (population)
/// variance taken over all of `y`:
///
/// `ρ(0) = 1`, `ρ(l) = Σ_t (y[t+l] - ȳ)(y[t] - ȳ) / (n · var)` for `l = 1..n`.
///
/// The normalisation uses `n` for every lag, so ρ decays towards zero at the
/// tail rather than being re-windowed per lag.
pub fn autocorrelation(x: &[f64], equilibration: usize) -> Result<Vec<f64>> {
    if equilibration >= x.len() {
        return Err(IsingError::EquilibrationOutOfRange {
            index: equilibration,
            len: x.len(),
        });
    }
    let y = &x[equilibration..];
    let n = y.len() as f64;

    let mean = y.iter().sum::<f64>() / n;
    let dev: Vec<f64> = y.iter().map(|&v| v - mean).collect();
    let var = dev.iter().map(|d| d * d).sum::<f64>() / n;
    if var == 0.0 {
        return Err(IsingError::ZeroVariance);
    }

    let corr = (0..dev.len())
        .map(|lag| {
            if lag == 0 {
                return 1.0;
            }
            let c: f64 = dev[lag..]
                .iter()
                .zip(dev.iter())
                .map(|(a, b)| a * b)
                .sum();
            c / n / var
        })
        .collect();
    Ok(corr)
}

/// Reject an equilibration cut that would leave nothing of a
/// `num_sweeps`-sweep run (whose trajectory has `num_sweeps + 1` entries).
pub fn check_equilibration(equilibration: usize, num_sweeps: usize) -> Result<()> {
    if equilibration > num_sweeps {
        return Err(IsingError::EquilibrationOutOfRange {
            index: equilibration,
            len: num_sweeps + 1,
        });
    }
    Ok(())
}

/// First lag at which the autocorrelation has fallen to 1/e or below,
/// or `None` when it never does within the available lags.
pub fn decorr_time(autocorr: &[f64]) -> Option<usize> {
    let threshold = (-1.0f64).exp();
    autocorr.iter().position(|&c| c <= threshold)
}

/// Integrated autocorrelation time with automatic windowing (Sokal 1989):
/// `τ = ½ + Σ_{t≥1} ρ(t)`, summed until `t ≥ 6τ` or the series ends.
pub fn integrated_time(autocorr: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (t, &rho) in autocorr.iter().enumerate().skip(1) {
        tau += rho;
        if t as f64 >= 6.0 * tau {
            break;
        }
    }
    tau.max(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hand_computed_lags() {
        // mean 2.5, var 1.25, deviations [-1.5, -0.5, 0.5, 1.5]
        let corr = autocorrelation(&[1.0, 2.0, 3.0, 4.0], 0).unwrap();
        assert_eq!(corr.len(), 4);
        assert_eq!(corr[0], 1.0);
        assert_relative_eq!(corr[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(corr[2], -0.3, epsilon = 1e-12);
        assert_relative_eq!(corr[3], -0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_equilibration_prefix_is_discarded() {
        let full = autocorrelation(&[1.0, 2.0, 3.0, 4.0], 0).unwrap();
        let trimmed = autocorrelation(&[100.0, -7.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(full, trimmed);
    }

    #[test]
    fn test_equilibration_cut_must_fit_the_run() {
        assert!(check_equilibration(0, 0).is_ok());
        assert!(check_equilibration(100, 100).is_ok());
        assert!(matches!(
            check_equilibration(100, 50),
            Err(IsingError::EquilibrationOutOfRange { index: 100, len: 51 })
        ));
    }

    #[test]
    fn test_decorr_time_threshold() {
        assert_eq!(decorr_time(&[1.0, 0.25, -0.3]), Some(1));
        assert_eq!(decorr_time(&[1.0, 0.5, 0.37, 0.36]), Some(3));
        assert_eq!(decorr_time(&[1.0, 0.9, 0.8, 0.5]), None);
        assert_eq!(decorr_time(&[]), None);
    }

    #[test]
    fn test_integrated_time_uncorrelated() {
        let mut rho = vec![0.0; 50];
        rho[0] = 1.0;
        assert_relative_eq!(integrated_time(&rho), 0.5);
    }

    #[test]
    fn test_integrated_time_exponential_decay() {
        // ρ(t) = a^t gives τ = ½ + a/(1-a) = 4.5; the window closes at t = 27,
        // truncating the tail by 4·0.8^27 ≈ 0.01.
        let a: f64 = 0.8;
        let rho: Vec<f64> = (0..400).map(|t| a.powi(t)).collect();
        let tau = integrated_time(&rho);
        assert!(tau < 4.5);
        assert_relative_eq!(tau, 0.5 + a / (1.0 - a), epsilon = 2e-2);
    }
}
