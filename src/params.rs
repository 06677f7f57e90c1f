// params.rs - physical parameters of one simulation run

use crate::error::{IsingError, Result};
use std::fmt;
use std::str::FromStr;

/// Denominator used in the Metropolis acceptance probability
/// `exp(-ΔE / denominator)` for non-negative ΔE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptanceRule {
    /// `exp(-ΔE / T)`.
    #[default]
    Boltzmann,
    /// `exp(-ΔE / (J·T))`. Equal to `Boltzmann` only when J = 1.
    CouplingScaled,
}

impl FromStr for AcceptanceRule {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "boltzmann" => Ok(Self::Boltzmann),
            "coupling-scaled" => Ok(Self::CouplingScaled),
            _ => Err(IsingError::InvalidParameter(format!(
                "unknown acceptance rule '{s}', expected 'boltzmann' or 'coupling-scaled'"
            ))),
        }
    }
}

impl fmt::Display for AcceptanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boltzmann => write!(f, "boltzmann"),
            Self::CouplingScaled => write!(f, "coupling-scaled"),
        }
    }
}

/// Temperature, exchange coupling and external field (k_B = 1).
///
/// Immutable once built; every constructor validates, so a `SystemParams`
/// value always yields a finite, positive acceptance denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemParams {
    temperature: f64,
    coupling: f64,
    field: f64,
    rule: AcceptanceRule,
}

impl SystemParams {
    pub fn new(temperature: f64, coupling: f64, field: f64) -> Result<Self> {
        Self::with_rule(temperature, coupling, field, AcceptanceRule::default())
    }

    pub fn with_rule(
        temperature: f64,
        coupling: f64,
        field: f64,
        rule: AcceptanceRule,
    ) -> Result<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "temperature must be finite and > 0, got {temperature}"
            )));
        }
        if !coupling.is_finite() {
            return Err(IsingError::InvalidParameter(format!(
                "exchange coupling must be finite, got {coupling}"
            )));
        }
        if !field.is_finite() {
            return Err(IsingError::InvalidParameter(format!(
                "external field must be finite, got {field}"
            )));
        }
        if rule == AcceptanceRule::CouplingScaled && coupling * temperature <= 0.0 {
            return Err(IsingError::InvalidParameter(format!(
                "coupling-scaled acceptance needs J*T > 0, got J={coupling}, T={temperature}"
            )));
        }
        Ok(Self { temperature, coupling, field, rule })
    }

    #[inline(always)]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[inline(always)]
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    #[inline(always)]
    pub fn field(&self) -> f64 {
        self.field
    }

    #[inline(always)]
    pub fn rule(&self) -> AcceptanceRule {
        self.rule
    }

    /// Divisor of ΔE in the acceptance exponent.
    #[inline]
    pub fn acceptance_denominator(&self) -> f64 {
        match self.rule {
            AcceptanceRule::Boltzmann => self.temperature,
            AcceptanceRule::CouplingScaled => self.coupling * self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_temperature() {
        assert!(SystemParams::new(0.0, 1.0, 0.0).is_err());
        assert!(SystemParams::new(-1.0, 1.0, 0.0).is_err());
        assert!(SystemParams::new(f64::NAN, 1.0, 0.0).is_err());
        assert!(SystemParams::new(f64::INFINITY, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_coupling_scaled_needs_positive_denominator() {
        let r = AcceptanceRule::CouplingScaled;
        assert!(SystemParams::with_rule(1.0, 0.0, 0.0, r).is_err());
        assert!(SystemParams::with_rule(1.0, -1.0, 0.0, r).is_err());
        // Zero coupling is fine when T alone is the denominator.
        assert!(SystemParams::new(1.0, 0.0, 0.5).is_ok());
        // Antiferromagnet under the Boltzmann rule.
        assert!(SystemParams::new(1.0, -1.0, 0.0).is_ok());
    }

    #[test]
    fn test_denominator_by_rule() {
        let b = SystemParams::new(2.0, 0.5, 0.0).unwrap();
        assert_eq!(b.acceptance_denominator(), 2.0);
        let c = SystemParams::with_rule(2.0, 0.5, 0.0, AcceptanceRule::CouplingScaled).unwrap();
        assert_eq!(c.acceptance_denominator(), 1.0);
    }

    #[test]
    fn test_rule_parses_and_displays() {
        for rule in [AcceptanceRule::Boltzmann, AcceptanceRule::CouplingScaled] {
            assert_eq!(rule.to_string().parse::<AcceptanceRule>().unwrap(), rule);
        }
        assert!("metropolis".parse::<AcceptanceRule>().is_err());
    }
}
