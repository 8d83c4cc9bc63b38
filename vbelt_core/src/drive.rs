//! # Drive Sizing
//!
//! Sizes a complete two-pulley V-belt drive from the motor and the driven
//! machine:
//!
//! 1. Service factor and design power
//! 2. Belt profile from design power and the fastest axle speed
//! 3. Driven pulley: theoretical diameter, then a commercial one
//! 4. Minimum diameter check of the smaller pulley
//! 5. Commercial belt and corrected center distance
//! 6. Capacity per belt and number of belts
//! 7. Belt speed and, when materials are given, belt forces
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::{BeltModel, Profile};
//! use vbelt_core::drive::{calculate, DriveInput};
//!
//! let input = DriveInput {
//!     label: "Mixer".to_string(),
//!     model: BeltModel::HiPower,
//!     engine_power: 3.0,
//!     machine: "stirrer".to_string(),
//!     drive: "normal torque ac".to_string(),
//!     hours_service: 8.0,
//!     rpm_input: 1750.0,
//!     rpm_output: 950.0,
//!     driving_diameter: 130.0,
//!     desired_driven_diameter: None,
//!     materials: None,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.profile, Profile::A);
//! assert_eq!(result.commercial.diameter, 240.0);
//! assert_eq!(result.length.belt_type, "A-46");
//! ```

use serde::{Deserialize, Serialize};

use crate::belts::{select_profile, BeltModel, Profile};
use crate::commercial::{select_commercial_diameter, CommercialDiameter};
use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::force::{self, BeltMaterial, ForceInput, ForceResult, PulleyMaterial};
use crate::geometry::{self, BeltLengthInput, BeltLengthResult};
use crate::power::{self, TransmissionInput, TransmissionResult};
use crate::pulley::{driven_diameter, gear_ratio, min_pulley_diameter};
use crate::service_factor::{self, ServiceFactorInput, ServiceFactorResult};
use crate::units::Millimeters;

/// Belt and pulley materials, for the force calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveMaterials {
    pub belt: BeltMaterial,
    pub pulley: PulleyMaterial,
}

/// Input for a complete drive.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Mixer",
///   "model": "HiPower",
///   "engine_power": 3.0,
///   "machine": "stirrer",
///   "drive": "normal torque ac",
///   "hours_service": 8.0,
///   "rpm_input": 1750.0,
///   "rpm_output": 950.0,
///   "driving_diameter": 130.0,
///   "materials": { "belt": "rubber", "pulley": "steel" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveInput {
    /// User label for this drive
    #[serde(default)]
    pub label: String,

    /// Belt model family
    pub model: BeltModel,

    /// Motor power, hp
    pub engine_power: f64,

    /// Driven machine description (see [`service_factor::MACHINE_LEXICON`])
    pub machine: String,

    /// Drive description (see [`service_factor::DRIVE_LEXICON`])
    pub drive: String,

    /// Daily hours of service
    pub hours_service: f64,

    /// Motor shaft speed, rpm
    pub rpm_input: f64,

    /// Wanted machine shaft speed, rpm
    pub rpm_output: f64,

    /// Driving (motor) pulley diameter, mm
    pub driving_diameter: f64,

    /// Driven diameter to converge on; the theoretical one when absent, mm
    #[serde(default)]
    pub desired_driven_diameter: Option<f64>,

    #[serde(default)]
    pub materials: Option<DriveMaterials>,
}

impl DriveInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("engine_power", self.engine_power)?;
        ensure_positive("rpm_input", self.rpm_input)?;
        ensure_positive("rpm_output", self.rpm_output)?;
        ensure_positive("driving_diameter", self.driving_diameter)?;
        if let Some(desired) = self.desired_driven_diameter {
            ensure_positive("desired_driven_diameter", desired)?;
        }
        Ok(())
    }

    /// Speed of the faster axle, rpm
    pub fn rpm_fastest(&self) -> f64 {
        self.rpm_input.max(self.rpm_output)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveResult {
    pub service: ServiceFactorResult,
    pub profile: Profile,
    /// Reference gear ratio from the requested speeds
    pub gear_ratio: f64,
    /// Theoretical driven diameter, mm
    pub driven_diameter: f64,
    pub commercial: CommercialDiameter,
    /// Catalogue minimum for the smaller pulley
    pub min_diameter: Millimeters,
    pub length: BeltLengthResult,
    pub transmission: TransmissionResult,
    /// Belt speed, m/s
    pub peripheral_speed: f64,
    pub forces: Option<ForceResult>,
}

/// Size a complete drive.
pub fn calculate(input: &DriveInput) -> CalcResult<DriveResult> {
    input.validate()?;

    let service = service_factor::calculate(&ServiceFactorInput {
        engine_power: input.engine_power,
        machine: input.machine.clone(),
        drive: input.drive.clone(),
        hours_service: input.hours_service,
    })?;
    let est_power = service.estimated_power;
    let profile = select_profile(input.model, est_power, input.rpm_fastest())?;

    let gear_ratio = gear_ratio(input.rpm_input, input.rpm_output)?;
    let driven = driven_diameter(input.driving_diameter, gear_ratio)?;
    let desired = input.desired_driven_diameter.unwrap_or(driven);
    let commercial = select_commercial_diameter(gear_ratio, input.rpm_input, input.driving_diameter, desired)?;

    let min_diam = input.driving_diameter.min(commercial.diameter);
    let maj_diam = input.driving_diameter.max(commercial.diameter);
    let rpm_fastest = commercial.rpm_input.max(commercial.rpm_output);

    let min_diameter = min_pulley_diameter(input.model, est_power, rpm_fastest)?;
    if min_diam < min_diameter.value() {
        return Err(CalcError::out_of_range(
            input.model.min_diameter_table(),
            "min_diam",
            min_diam,
            format!("below the catalogue minimum of {:.1} mm", min_diameter.value()),
        ));
    }

    let length = geometry::calculate(&BeltLengthInput {
        profile,
        min_diam,
        maj_diam,
    })?;

    let transmission = power::calculate(&TransmissionInput {
        model: input.model,
        profile,
        belt_type: length.belt_type.clone(),
        est_power,
        gear_ratio: commercial.gear_ratio,
        center_distance: length.center_distance,
        min_diam,
        maj_diam,
        rpm: rpm_fastest,
    })?;

    let peripheral_speed = force::peripheral_speed(input.driving_diameter, input.rpm_input)?;

    let forces = input
        .materials
        .map(|materials| {
            force::calculate(&ForceInput {
                power: est_power,
                rpm: input.rpm_input,
                driving_diameter: input.driving_diameter,
                driven_diameter: commercial.diameter,
                center_distance: length.center_distance,
                belt_material: materials.belt,
                pulley_material: materials.pulley,
            })
        })
        .transpose()?;

    tracing::debug!(
        label = %input.label,
        profile = %profile,
        belt_type = %length.belt_type,
        belts = transmission.belt_count,
        "sized drive"
    );

    Ok(DriveResult {
        service,
        profile,
        gear_ratio,
        driven_diameter: driven,
        commercial,
        min_diameter,
        length,
        transmission,
        peripheral_speed,
        forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixer() -> DriveInput {
        DriveInput {
            label: "Mixer".to_string(),
            model: BeltModel::HiPower,
            engine_power: 3.0,
            machine: "stirrer".to_string(),
            drive: "normal torque ac".to_string(),
            hours_service: 8.0,
            rpm_input: 1750.0,
            rpm_output: 950.0,
            driving_diameter: 130.0,
            desired_driven_diameter: None,
            materials: None,
        }
    }

    #[test]
    fn test_mixer_drive() {
        let result = calculate(&mixer()).unwrap();
        assert_eq!(result.service.service_factor, 1.1);
        assert!((result.service.estimated_power - 3.3).abs() < 1e-12);
        assert_eq!(result.profile, Profile::A);
        assert_eq!(result.commercial.diameter, 240.0);
        assert!((result.commercial.rpm_output - 947.9166666666666).abs() < 1e-9);
        assert!((result.min_diameter.value() - 2.43 * 25.4).abs() < 1e-9);
        assert_eq!((result.length.length, result.length.belt_type.as_str()), (1200.0, "A-46"));
        assert_eq!(result.transmission.basic_power, 3.43);
        assert_eq!(result.transmission.additional_power, 0.24);
        assert_eq!(result.transmission.fcc, 0.86);
        assert_eq!(result.transmission.belt_count, 2);
        assert!(result.forces.is_none());
    }

    #[test]
    fn test_drive_with_forces() {
        let input = DriveInput {
            materials: Some(DriveMaterials {
                belt: BeltMaterial::Rubber,
                pulley: PulleyMaterial::Steel,
            }),
            ..mixer()
        };
        let result = calculate(&input).unwrap();
        let forces = result.forces.unwrap();
        assert_eq!(forces.friction_coefficient, 0.3);
        assert!((forces.peripheral_speed - result.peripheral_speed).abs() < 1e-12);
    }

    #[test]
    fn test_driving_pulley_below_minimum() {
        let input = DriveInput {
            driving_diameter: 40.0,
            ..mixer()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_unknown_machine() {
        let input = DriveInput {
            machine: "robot".to_string(),
            ..mixer()
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "NOT_VALID");
    }

    #[test]
    fn test_json_roundtrip() {
        let json = r#"{
            "model": "HiPower",
            "engine_power": 3.0,
            "machine": "stirrer",
            "drive": "normal torque ac",
            "hours_service": 8.0,
            "rpm_input": 1750.0,
            "rpm_output": 950.0,
            "driving_diameter": 130.0,
            "materials": { "belt": "rubber", "pulley": "steel" }
        }"#;
        let input: DriveInput = serde_json::from_str(json).unwrap();
        assert!(input.label.is_empty());
        assert!(input.desired_driven_diameter.is_none());
        let result = calculate(&input).unwrap();
        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("\"profile\":\"A\""));
    }
}
