//! # Pulley Relations
//!
//! Gear ratio, driving/driven diameters and the catalogue minimum diameter of
//! the driving pulley.
//!
//! Gear ratios are driving speed over driven speed, so a speed reducer has a
//! ratio above 1 and the driven pulley is the larger one.
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::BeltModel;
//! use vbelt_core::pulley::{driven_diameter, gear_ratio, min_pulley_diameter};
//!
//! let ratio = gear_ratio(1750.0, 950.0).unwrap();
//! let driven = driven_diameter(130.0, ratio).unwrap();
//! assert!((driven - 239.47).abs() < 0.01);
//!
//! let min = min_pulley_diameter(BeltModel::HiPower, 3.0, 1750.0).unwrap();
//! assert!((min.0 - 60.96).abs() < 1e-9);
//! ```

use crate::belts::BeltModel;
use crate::errors::{ensure_positive, CalcResult};
use crate::tables::TableSearch;
use crate::units::{Inches, Millimeters};

/// Gear ratio from input and output speeds (rpm).
pub fn gear_ratio(rpm_input: f64, rpm_output: f64) -> CalcResult<f64> {
    ensure_positive("rpm_input", rpm_input)?;
    ensure_positive("rpm_output", rpm_output)?;
    Ok(rpm_input / rpm_output)
}

/// Driven pulley diameter for a driving diameter and gear ratio.
pub fn driven_diameter(driving_diameter: f64, gear_ratio: f64) -> CalcResult<f64> {
    ensure_positive("driving_diameter", driving_diameter)?;
    ensure_positive("gear_ratio", gear_ratio)?;
    Ok(driving_diameter * gear_ratio)
}

/// Driving pulley diameter for a driven diameter and gear ratio.
pub fn driving_diameter(driven_diameter: f64, gear_ratio: f64) -> CalcResult<f64> {
    ensure_positive("driven_diameter", driven_diameter)?;
    ensure_positive("gear_ratio", gear_ratio)?;
    Ok(driven_diameter / gear_ratio)
}

/// Catalogue minimum pulley diameter in inches.
///
/// `axle_power` in hp, `axle_speed` of the fastest axle in rpm. The speed
/// picks the rpm band and the diameter is interpolated on power. Combinations
/// the catalogue leaves blank are out of range.
pub fn min_pulley_diameter_in(model: BeltModel, axle_power: f64, axle_speed: f64) -> CalcResult<Inches> {
    ensure_positive("axle_power", axle_power)?;
    ensure_positive("axle_speed", axle_speed)?;
    let search = TableSearch::open(&model.min_diameter_table(), &["rpm_low", "rpm_high", "power", "diameter"])?;
    let found = search.range_band_catalogued(axle_speed, axle_power)?;
    Ok(Inches(found.value))
}

/// Catalogue minimum pulley diameter in millimetres.
pub fn min_pulley_diameter(model: BeltModel, axle_power: f64, axle_speed: f64) -> CalcResult<Millimeters> {
    min_pulley_diameter_in(model, axle_power, axle_speed).map(Millimeters::from)
}
