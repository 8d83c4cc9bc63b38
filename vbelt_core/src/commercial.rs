//! # Commercial Sizes
//!
//! Snapping calculated belt lengths and pulley diameters to what can be
//! bought.
//!
//! - [`select_commercial_belt`] picks the catalogued belt of a profile whose
//!   pitch length is nearest to the calculated one.
//! - [`select_commercial_diameter`] iterates a driven diameter toward a
//!   desired size while keeping the output speed within a window of the
//!   reference, then rounds it to a commercial multiple.
//!
//! The desired diameter is first pulled onto the speed window, so a request
//! the window cannot honour ends on the window edge. From the seed each step
//! grows the diameter by the remaining error fraction; the error squares on
//! every step and the iteration never overshoots its target. A wall-clock
//! budget still bounds the loop; running out of time is a
//! [`CalcError::Convergence`].
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::Profile;
//! use vbelt_core::commercial::{select_commercial_belt, select_commercial_diameter};
//!
//! let belt = select_commercial_belt(Profile::V3, 680.0).unwrap();
//! assert_eq!((belt.length, belt.belt_type.as_str()), (675.0, "3V265"));
//!
//! let pulley = select_commercial_diameter(1.846, 1750.0, 130.0, 120.0).unwrap();
//! assert_eq!(pulley.diameter, 240.0);
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::belts::Profile;
use crate::config::SolverSettings;
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::tables::TableSearch;

/// A catalogued belt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialBelt {
    /// Pitch length, mm
    pub length: f64,
    /// Catalogue designation (e.g. "A-46", "3V265")
    pub belt_type: String,
}

/// Nearest catalogued belt of `profile` to `target_length` (mm).
///
/// A tabulated length comes back unchanged; between two lengths the
/// relatively nearer wins, a tie going to the longer belt.
pub fn select_commercial_belt(profile: Profile, target_length: f64) -> CalcResult<CommercialBelt> {
    ensure_positive("target_length", target_length)?;
    let table = profile.model().length_table();
    let search = TableSearch::open(&table, &["profile", "length", "type"])?;
    let found = search.nearest_commercial(profile.code(), target_length)?;
    tracing::debug!(profile = %profile, target_length, length = found.size, belt_type = found.name, "selected commercial belt");
    Ok(CommercialBelt {
        length: found.size,
        belt_type: found.name.to_string(),
    })
}

/// A commercial driven pulley and the drive it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialDiameter {
    /// Driven diameter, mm
    pub diameter: f64,
    /// Gear ratio realised with `diameter`
    pub gear_ratio: f64,
    /// Input speed, rpm
    pub rpm_input: f64,
    /// Output speed realised with `diameter`, rpm
    pub rpm_output: f64,
}

/// [`select_commercial_diameter_with`] using the default [`SolverSettings`].
pub fn select_commercial_diameter(
    gear_ratio: f64,
    rpm_input: f64,
    driving_diameter: f64,
    desired_diameter: f64,
) -> CalcResult<CommercialDiameter> {
    select_commercial_diameter_with(
        &SolverSettings::default(),
        gear_ratio,
        rpm_input,
        driving_diameter,
        desired_diameter,
    )
}

/// Commercial driven diameter for a reference gear ratio, input speed (rpm),
/// driving diameter and desired driven diameter (mm).
///
/// The speed window `rpm_input / gear_ratio ± settings.rpm_window` bounds the
/// driven diameter; `desired_diameter` is clamped into it to give the target.
/// Starting from the seed `gear_ratio * driving_diameter`, the diameter grows
/// by `error = 1 - diameter / target` until `error <= settings.tolerance`. A
/// target at or below the seed keeps the seed. The diameter is then rounded
/// (half to even) to a multiple of `settings.rounding_base`.
pub fn select_commercial_diameter_with(
    settings: &SolverSettings,
    gear_ratio: f64,
    rpm_input: f64,
    driving_diameter: f64,
    desired_diameter: f64,
) -> CalcResult<CommercialDiameter> {
    settings.validate()?;
    ensure_positive("gear_ratio", gear_ratio)?;
    ensure_positive("rpm_input", rpm_input)?;
    ensure_positive("driving_diameter", driving_diameter)?;
    ensure_positive("desired_diameter", desired_diameter)?;

    let rpm_output_ref = rpm_input / gear_ratio;
    if rpm_output_ref <= settings.rpm_window {
        return Err(CalcError::out_of_range(
            "commercial diameter",
            "gear_ratio",
            gear_ratio,
            format!(
                "output speed {} rpm leaves no room for a {} rpm window",
                rpm_output_ref, settings.rpm_window
            ),
        ));
    }
    let gear_ratio_max = rpm_input / (rpm_output_ref - settings.rpm_window);
    let gear_ratio_min = rpm_input / (rpm_output_ref + settings.rpm_window);

    let target = desired_diameter.clamp(gear_ratio_min * driving_diameter, gear_ratio_max * driving_diameter);
    let (diameter, iterations) = refine(gear_ratio * driving_diameter, target, settings.tolerance, settings.time_budget())
        .map_err(|err| {
            tracing::warn!(gear_ratio, rpm_input, driving_diameter, desired_diameter, "commercial diameter did not converge");
            err
        })?;

    let base = settings.rounding_base;
    let commercial = base * (diameter / base).round_ties_even();
    if commercial <= 0.0 {
        return Err(CalcError::out_of_range(
            "commercial diameter",
            "desired_diameter",
            desired_diameter,
            format!("converged diameter {} mm rounds to zero", diameter),
        ));
    }
    let gear_ratio_out = commercial / driving_diameter;
    let rpm_output = rpm_input / gear_ratio_out;

    tracing::debug!(diameter = commercial, gear_ratio = gear_ratio_out, rpm_output, iterations, "selected commercial diameter");
    Ok(CommercialDiameter {
        diameter: commercial,
        gear_ratio: gear_ratio_out,
        rpm_input,
        rpm_output,
    })
}

/// Grow `seed` toward `target` until the relative shortfall is within
/// `tolerance`. Returns the diameter and the number of steps taken.
fn refine(seed: f64, target: f64, tolerance: f64, budget: Duration) -> CalcResult<(f64, u64)> {
    let start = Instant::now();
    let mut diameter = seed;
    let mut error = 1.0 - diameter / target;
    let mut iterations = 0u64;
    while error > tolerance {
        diameter += diameter * error;
        error = 1.0 - diameter / target;
        iterations += 1;

        let elapsed = start.elapsed();
        if error > tolerance && elapsed >= budget {
            return Err(CalcError::convergence(
                elapsed.as_millis() as u64,
                format!(
                    "diameter stalled at {:.1} mm against a {:.1} mm target after {} steps; try other speeds or diameters",
                    diameter, target, iterations
                ),
            ));
        }
    }
    Ok((diameter, iterations))
}
