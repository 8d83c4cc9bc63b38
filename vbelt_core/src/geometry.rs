//! # Belt Length and Center Distance
//!
//! From the two pulley diameters to a commercial belt and the center
//! distance it gives.
//!
//! 1. Uncorrected center distance `C = (3d + D) / 2`
//! 2. Uncorrected pitch length `L = 2C + 1.57 (D + d) + (D − d)² / 4C`
//! 3. Nearest commercial length `L_c` of the profile
//! 4. Center correction factor `h`, from the `h_factor` table by `(D − d) / L_c`
//! 5. Adjusted length `L_a = L_c − 1.57 (D − d)`
//! 6. Corrected center distance `C_c = (L_a − h (D − d)) / 2`
//!
//! `d` is the smaller and `D` the larger pulley, all lengths in mm.
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::Profile;
//! use vbelt_core::geometry::{calculate, BeltLengthInput};
//!
//! let result = calculate(&BeltLengthInput {
//!     profile: Profile::A,
//!     min_diam: 120.0,
//!     maj_diam: 240.0,
//! })
//! .unwrap();
//! assert_eq!(result.belt_type, "A-46");
//! assert!((result.center_distance - 502.8).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::belts::Profile;
use crate::commercial::select_commercial_belt;
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::tables::TableSearch;

/// Center distance before a commercial belt is chosen.
pub fn uncorrected_center_distance(min_diam: f64, maj_diam: f64) -> f64 {
    (3.0 * min_diam + maj_diam) / 2.0
}

/// Pitch length for two pulleys at `center_distance`.
pub fn uncorrected_length(min_diam: f64, maj_diam: f64, center_distance: f64) -> f64 {
    2.0 * center_distance
        + 1.57 * (maj_diam + min_diam)
        + (maj_diam - min_diam).powi(2) / (4.0 * center_distance)
}

/// Center distance correction factor for a commercial belt length.
pub fn h_factor(min_diam: f64, maj_diam: f64, length: f64) -> CalcResult<f64> {
    ensure_positive("length", length)?;
    let search = TableSearch::open("h_factor", &["factor", "h"])?;
    Ok(search.exact_or_interpolate((maj_diam - min_diam) / length)?.value)
}

/// Commercial length less the wrap of the pulleys.
pub fn adjusted_length(length: f64, min_diam: f64, maj_diam: f64) -> f64 {
    length - 1.57 * (maj_diam - min_diam)
}

pub fn corrected_center_distance(adjusted_length: f64, h: f64, min_diam: f64, maj_diam: f64) -> f64 {
    (adjusted_length - h * (maj_diam - min_diam)) / 2.0
}

/// Input for [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile": "A",
///   "min_diam": 130.0,
///   "maj_diam": 240.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeltLengthInput {
    /// Belt profile, picks the commercial length table
    pub profile: Profile,

    /// Smaller pulley diameter, mm
    pub min_diam: f64,

    /// Larger pulley diameter, mm
    pub maj_diam: f64,
}

impl BeltLengthInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("min_diam", self.min_diam)?;
        ensure_positive("maj_diam", self.maj_diam)?;
        if self.min_diam > self.maj_diam {
            return Err(CalcError::invalid_input(
                "min_diam",
                self.min_diam.to_string(),
                format!("Smaller pulley exceeds the larger one ({} mm)", self.maj_diam),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltLengthResult {
    /// Uncorrected center distance, mm
    pub center_uncorrected: f64,
    /// Uncorrected pitch length, mm
    pub length_uncorrected: f64,
    /// Commercial pitch length, mm
    pub length: f64,
    /// Commercial belt designation
    pub belt_type: String,
    /// Center distance correction factor
    pub h: f64,
    /// Adjusted length, mm
    pub length_adjusted: f64,
    /// Corrected center distance, mm
    pub center_distance: f64,
}

/// Commercial belt and corrected center distance for a pair of pulleys.
pub fn calculate(input: &BeltLengthInput) -> CalcResult<BeltLengthResult> {
    input.validate()?;
    let (d, big_d) = (input.min_diam, input.maj_diam);

    let center_uncorrected = uncorrected_center_distance(d, big_d);
    let length_uncorrected = uncorrected_length(d, big_d, center_uncorrected);
    let belt = select_commercial_belt(input.profile, length_uncorrected)?;
    let h = h_factor(d, big_d, belt.length)?;
    let length_adjusted = adjusted_length(belt.length, d, big_d);

    Ok(BeltLengthResult {
        center_uncorrected,
        length_uncorrected,
        length: belt.length,
        belt_type: belt.belt_type,
        h,
        length_adjusted,
        center_distance: corrected_center_distance(length_adjusted, h, d, big_d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncorrected_geometry() {
        let c = uncorrected_center_distance(120.0, 240.0);
        assert_eq!(c, 300.0);
        assert!((uncorrected_length(120.0, 240.0, c) - 1177.2).abs() < 1e-9);
    }

    #[test]
    fn test_h_factor() {
        assert_eq!(h_factor(120.0, 240.0, 1200.0).unwrap(), 0.05);
        // 0.11 between 0.10 -> 0.05 and 0.12 -> 0.06
        assert!((h_factor(120.0, 230.0, 1000.0).unwrap() - 0.055).abs() < 1e-9);
        assert_eq!(h_factor(100.0, 100.0, 900.0).unwrap(), 0.0);
        assert_eq!(h_factor(100.0, 700.0, 1000.0).unwrap_err().error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_calculate() {
        let result = calculate(&BeltLengthInput {
            profile: Profile::A,
            min_diam: 120.0,
            maj_diam: 240.0,
        })
        .unwrap();
        assert_eq!(result.center_uncorrected, 300.0);
        assert_eq!((result.length, result.belt_type.as_str()), (1200.0, "A-46"));
        assert_eq!(result.h, 0.05);
        assert!((result.length_adjusted - 1011.6).abs() < 1e-9);
        assert!((result.center_distance - 502.8).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        let input = BeltLengthInput {
            profile: Profile::B,
            min_diam: 300.0,
            maj_diam: 200.0,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
