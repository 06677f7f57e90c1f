//! Typed errors for lattice construction, simulation parameters, trajectory
//! analysis and array persistence.

use std::fmt;

/// Errors arising from invalid parameters, degenerate input or file I/O.
#[derive(Debug)]
pub enum IsingError {
    /// A construction or run parameter is out of range (message says which).
    InvalidParameter(String),

    /// A cell handed to `Lattice::from_spins` is not ±1.
    InvalidSpin { index: usize, value: i8 },

    /// The equilibration index leaves no samples to analyse.
    EquilibrationOutOfRange { index: usize, len: usize },

    /// The post-equilibration series is constant, so it cannot be normalised.
    ZeroVariance,

    /// Underlying filesystem error.
    Io(std::io::Error),

    /// Malformed or unwritable CSV record.
    Csv(csv::Error),

    /// A stored value could not be parsed back into a number.
    Parse(String),
}

impl fmt::Display for IsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::InvalidSpin { index, value } => {
                write!(f, "Spin at index {index} is {value}, expected +1 or -1")
            }
            Self::EquilibrationOutOfRange { index, len } => write!(
                f,
                "Equilibration index {index} leaves no samples in a series of length {len}"
            ),
            Self::ZeroVariance => write!(f, "Series has zero variance after equilibration"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for IsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IsingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for IsingError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

pub type Result<T> = std::result::Result<T, IsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_parameter() {
        let err = IsingError::InvalidParameter("temperature must be > 0, got 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: temperature must be > 0, got 0"
        );
    }

    #[test]
    fn display_equilibration_out_of_range() {
        let err = IsingError::EquilibrationOutOfRange { index: 12, len: 10 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn io_error_converts_and_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: IsingError = io.into();
        let dyn_err: &dyn std::error::Error = &err;
        assert!(dyn_err.source().is_some());
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn zero_variance_has_no_source() {
        let err = IsingError::ZeroVariance;
        let dyn_err: &dyn std::error::Error = &err;
        assert!(dyn_err.source().is_none());
    }
}
