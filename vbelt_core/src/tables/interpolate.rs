//! Linear interpolation and nearest-value selection between two bracketing
//! table entries.

use crate::errors::{CalcError, CalcResult};

/// Linear interpolation between `(x_min, y_min)` and `(x_max, y_max)`.
///
/// ```text
/// y = y_max − ((x_max − x) / (x_max − x_min)) · (y_max − y_min)
/// ```
///
/// Returns `y_min` at `x_min` and `y_max` at `x_max`. The bracket keys must
/// differ.
///
/// # Example
///
/// ```rust
/// use vbelt_core::tables::interpolate;
///
/// let y = interpolate(0.5, 0.0, 1.0, 10.0, 20.0).unwrap();
/// assert_eq!(y, 15.0);
/// assert!(interpolate(0.5, 1.0, 1.0, 10.0, 20.0).is_err());
/// ```
pub fn interpolate(x: f64, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> CalcResult<f64> {
    if x_max == x_min {
        return Err(CalcError::invalid_input(
            "x_max",
            x_max.to_string(),
            "Interpolation needs two distinct bracket keys",
        ));
    }
    Ok(y_max - ((x_max - x) / (x_max - x_min)) * (y_max - y_min))
}

/// Pick whichever of `x_min` / `x_max` is relatively closer to `x`.
///
/// Distances are taken relative to `x`; an exact tie goes to `x_max`.
///
/// ```rust
/// use vbelt_core::tables::nearest;
///
/// assert_eq!(nearest(680.0, 675.0, 710.0), 675.0);
/// assert_eq!(nearest(15.0, 10.0, 20.0), 20.0);
/// ```
pub fn nearest(x: f64, x_min: f64, x_max: f64) -> f64 {
    let dist_min = (x - x_min) / x;
    let dist_max = (x_max - x) / x;
    if dist_min < dist_max {
        x_min
    } else {
        x_max
    }
}
