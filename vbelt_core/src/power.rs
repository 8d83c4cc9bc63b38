//! # Power Capacity
//!
//! How much power one belt transmits, and how many belts a drive needs.
//!
//! The capacity of a single belt is
//!
//! ```text
//! P_belt = (P_b + P_a) · f_cc · f_cac
//! ```
//!
//! - `P_b` - basic power, by small pulley diameter and fastest rpm
//! - `P_a` - additional power, by gear ratio and fastest rpm
//! - `f_cc` - length correction factor, by commercial belt type
//! - `f_cac` - contact arc correction factor, by `(D - d) / C`
//!
//! Basic power tables only list standard pulley diameters. A pulley between
//! two of them is read at the next larger diameter and then derated:
//!
//! | Tabulated power (hp) | Derating |
//! |----------------------|----------|
//! | up to 0.3            | none     |
//! | (0.3, 1]             | −0.25    |
//! | (1, 10]              | −0.5     |
//! | (10, 120]            | −2.5     |
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::{BeltModel, Profile};
//! use vbelt_core::power::{lookup_additional_power, lookup_basic_power, lookup_contact_arc_factor};
//!
//! assert_eq!(lookup_basic_power(BeltModel::HiPower, Profile::A, 65.0, 950.0).unwrap(), 0.55);
//! assert_eq!(lookup_additional_power(BeltModel::HiPower, Profile::A, 1.05, 300.0).unwrap(), 0.01);
//! assert_eq!(lookup_contact_arc_factor(450.0, 254.0, 200.0).unwrap(), 0.83);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::belts::{BeltModel, Profile};
use crate::errors::{ensure_finite, ensure_positive, CalcError, CalcResult};
use crate::tables::TableSearch;

const CONTACT_ARC_TABLE: &str = "fcac_contact_arc";

// ============================================================================
// Basic and additional power
// ============================================================================

/// Derate a basic power read at a larger tabulated diameter.
pub fn oversize_derating(tabulated: f64) -> CalcResult<f64> {
    ensure_finite("power_b", tabulated)?;
    let derated = match tabulated {
        p if p <= 0.3 => p,
        p if p <= 1.0 => p - 0.25,
        p if p <= 10.0 => p - 0.5,
        p if p <= 120.0 => p - 2.5,
        p => {
            return Err(CalcError::out_of_range(
                "basic power",
                "power_b",
                p,
                "no derating band above 120 hp",
            ))
        }
    };
    Ok(derated)
}

/// Basic power per belt (hp) for the small pulley `diameter` (mm) at `rpm`.
pub fn lookup_basic_power(model: BeltModel, profile: Profile, diameter: f64, rpm: f64) -> CalcResult<f64> {
    profile.ensure_model(model)?;
    ensure_positive("diameter", diameter)?;
    ensure_positive("rpm", rpm)?;

    let search = TableSearch::open(&profile.basic_power_table(), &["diameter", "rpm", "power_b"])?;
    let found = search.two_key(diameter, rpm)?;
    tracing::trace!(
        profile = %profile,
        diameter,
        rpm,
        exact = found.lookup.is_exact(),
        oversized = found.needs_adjustment,
        "basic power"
    );
    if found.needs_adjustment {
        oversize_derating(found.lookup.value)
    } else {
        Ok(found.lookup.value)
    }
}

/// Additional power per belt (hp) for a gear ratio at `rpm`.
///
/// Ratios below 1 (speed increasers) are read as their inverse.
pub fn lookup_additional_power(model: BeltModel, profile: Profile, gear_ratio: f64, rpm: f64) -> CalcResult<f64> {
    profile.ensure_model(model)?;
    ensure_positive("gear_ratio", gear_ratio)?;
    ensure_positive("rpm", rpm)?;

    let ratio = if gear_ratio < 1.0 { 1.0 / gear_ratio } else { gear_ratio };
    let search = TableSearch::open(&profile.additional_power_table(), &["gr_low", "gr_high", "rpm", "power_a"])?;
    Ok(search.range_band(ratio, rpm)?.value)
}

// ============================================================================
// Correction factors
// ============================================================================

/// Length correction factor of a commercial belt type (e.g. "A-46").
pub fn lookup_length_correction_factor(model: BeltModel, belt_type: &str) -> CalcResult<f64> {
    let search = TableSearch::open(&model.length_correction_table(), &["type", "fcc"])?;
    search.find_text(&[belt_type])
}

fn arc_factor(max_diam: f64, min_diam: f64, center_distance: f64) -> CalcResult<f64> {
    ensure_finite("max_diam", max_diam)?;
    ensure_finite("min_diam", min_diam)?;
    ensure_positive("center_distance", center_distance)?;
    Ok((max_diam.max(min_diam) - max_diam.min(min_diam)) / center_distance)
}

/// Contact arc correction factor for two pulley diameters and their center
/// distance (mm).
pub fn lookup_contact_arc_factor(max_diam: f64, min_diam: f64, center_distance: f64) -> CalcResult<f64> {
    let factor = arc_factor(max_diam, min_diam, center_distance)?;
    let search = TableSearch::open(CONTACT_ARC_TABLE, &["factor", "contact_arc", "fcac"])?;
    Ok(search.choose(factor, 3)?.value)
}

/// Belt wrap on the small pulley, radians.
pub fn contact_arc_angle(max_diam: f64, min_diam: f64, center_distance: f64) -> CalcResult<f64> {
    let factor = arc_factor(max_diam, min_diam, center_distance)?;
    let search = TableSearch::open(CONTACT_ARC_TABLE, &["factor", "contact_arc", "fcac"])?;
    let degrees = search.choose(factor, 2)?.value;
    Ok(PI * degrees / 180.0)
}

// ============================================================================
// Transmission
// ============================================================================

/// Power one belt transmits (hp).
pub fn belt_transmission(basic_power: f64, additional_power: f64, fcc: f64, fcac: f64) -> f64 {
    (basic_power + additional_power) * fcc * fcac
}

/// Input for [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "model": "HiPower",
///   "profile": "A",
///   "belt_type": "A-46",
///   "est_power": 3.3,
///   "gear_ratio": 1.846,
///   "center_distance": 502.8,
///   "min_diam": 130.0,
///   "maj_diam": 240.0,
///   "rpm": 1750.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionInput {
    pub model: BeltModel,
    pub profile: Profile,

    /// Commercial belt designation
    pub belt_type: String,

    /// Design power, hp
    pub est_power: f64,

    /// Gear ratio of the drive
    pub gear_ratio: f64,

    /// Corrected center distance, mm
    pub center_distance: f64,

    /// Smaller pulley diameter, mm
    pub min_diam: f64,

    /// Larger pulley diameter, mm
    pub maj_diam: f64,

    /// Speed of the fastest axle, rpm
    pub rpm: f64,
}

impl TransmissionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.profile.ensure_model(self.model)?;
        if self.belt_type.trim().is_empty() {
            return Err(CalcError::invalid_input("belt_type", &self.belt_type, "Belt type is required"));
        }
        ensure_positive("est_power", self.est_power)?;
        ensure_positive("gear_ratio", self.gear_ratio)?;
        ensure_positive("center_distance", self.center_distance)?;
        ensure_positive("min_diam", self.min_diam)?;
        ensure_positive("maj_diam", self.maj_diam)?;
        ensure_positive("rpm", self.rpm)?;
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
pub struct TransmissionResult {
    /// Basic power per belt, hp
    pub basic_power: f64,
    /// Additional power per belt, hp
    pub additional_power: f64,
    /// Length correction factor
    pub fcc: f64,
    /// Contact arc correction factor
    pub fcac: f64,
    /// Power one belt transmits, hp
    pub capacity_per_belt: f64,
    /// Design power over capacity per belt
    pub belt_quantity: f64,
    /// Belts to install
    pub belt_count: u32,
}

/// Transmission capacity of one belt and the number of belts for the drive.
pub fn calculate(input: &TransmissionInput) -> CalcResult<TransmissionResult> {
    input.validate()?;

    let basic_power = lookup_basic_power(input.model, input.profile, input.min_diam, input.rpm)?;
    let additional_power = lookup_additional_power(input.model, input.profile, input.gear_ratio, input.rpm)?;
    let fcc = lookup_length_correction_factor(input.model, &input.belt_type)?;
    let fcac = lookup_contact_arc_factor(input.maj_diam, input.min_diam, input.center_distance)?;

    let capacity_per_belt = belt_transmission(basic_power, additional_power, fcc, fcac);
    if capacity_per_belt <= 0.0 {
        return Err(CalcError::out_of_range(
            input.profile.basic_power_table(),
            "capacity_per_belt",
            capacity_per_belt,
            "belt transmits no power at this diameter and speed",
        ));
    }
    let belt_quantity = input.est_power / capacity_per_belt;

    Ok(TransmissionResult {
        basic_power,
        additional_power,
        fcc,
        fcac,
        capacity_per_belt,
        belt_quantity,
        belt_count: belt_quantity.ceil() as u32,
    })
}
