//! # Solver Settings
//!
//! Constants of the commercial-diameter solver, loadable from TOML.
//!
//! ```rust
//! use vbelt_core::config::SolverSettings;
//!
//! let settings = SolverSettings::from_toml_str("time_budget_ms = 250").unwrap();
//! assert_eq!(settings.time_budget_ms, 250);
//! assert_eq!(settings.rounding_base, 10.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Tuning of [`select_commercial_diameter_with`](crate::commercial::select_commercial_diameter_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Half-width of the accepted output speed window around the reference
    /// output speed, rpm
    pub rpm_window: f64,

    /// Relative diameter error at which the iteration stops
    pub tolerance: f64,

    /// Wall-clock budget before giving up, ms
    pub time_budget_ms: u64,

    /// Commercial diameters are multiples of this, mm
    pub rounding_base: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            rpm_window: 100.0,
            tolerance: 0.01,
            time_budget_ms: 4000,
            rounding_base: 10.0,
        }
    }
}

impl SolverSettings {
    /// Parse settings from TOML; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let settings: SolverSettings = toml::from_str(source).map_err(|e| CalcError::config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.rpm_window.is_finite() && self.rpm_window > 0.0) {
            return Err(CalcError::config(format!("rpm_window must be positive, got {}", self.rpm_window)));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CalcError::config(format!("tolerance must be positive, got {}", self.tolerance)));
        }
        if self.time_budget_ms == 0 {
            return Err(CalcError::config("time_budget_ms must be positive"));
        }
        if !(self.rounding_base.is_finite() && self.rounding_base > 0.0) {
            return Err(CalcError::config(format!(
                "rounding_base must be positive, got {}",
                self.rounding_base
            )));
        }
        Ok(())
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}
