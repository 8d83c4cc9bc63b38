//! # Speed and Forces
//!
//! Belt speed, shaft torque and the belt forces of the Euler-Eytelwein
//! relation:
//!
//! ```text
//! F_u = 9.81 T / (d / 2000)          effective pull, N
//! F_0 = F_u / (e^{μθ} − 1)           slack side, N
//! F_1 = F_u e^{μθ} / (e^{μθ} − 1)    tight side, N
//! F_z = F_u (e^{μθ} + 1) / (e^{μθ} − 1)   on the axle, N
//! ```
//!
//! `T` is the torque in kgf·m, `d` the driving diameter in mm, `θ` the
//! contact arc and `μ` the belt/pulley friction coefficient.
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::force::{peripheral_speed, torque};
//!
//! assert!((peripheral_speed(240.0, 1750.0).unwrap() - 21.991148575128552).abs() < 1e-12);
//! assert!((torque(3.0, 1750.0).unwrap() - 1.2277).abs() < 1e-4);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcError, CalcResult};
use crate::power::contact_arc_angle;
use crate::tables::TableSearch;
use crate::units::{KilogramForce, Newtons, GRAVITY};

// ============================================================================
// Materials
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeltMaterial {
    Polyurethane,
    Nylon,
    Rubber,
}

impl BeltMaterial {
    pub const ALL: [BeltMaterial; 3] = [BeltMaterial::Polyurethane, BeltMaterial::Nylon, BeltMaterial::Rubber];

    /// Key in the friction table
    pub fn code(&self) -> &'static str {
        match self {
            BeltMaterial::Polyurethane => "polyurethane",
            BeltMaterial::Nylon => "nylon",
            BeltMaterial::Rubber => "rubber",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "polyurethane" | "pu" => Ok(BeltMaterial::Polyurethane),
            "nylon" => Ok(BeltMaterial::Nylon),
            "rubber" => Ok(BeltMaterial::Rubber),
            _ => Err(CalcError::not_valid(
                "belt_material",
                s,
                "expected polyurethane, nylon or rubber",
            )),
        }
    }
}

impl std::fmt::Display for BeltMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulleyMaterial {
    Steel,
    Aluminum,
}

impl PulleyMaterial {
    pub const ALL: [PulleyMaterial; 2] = [PulleyMaterial::Steel, PulleyMaterial::Aluminum];

    /// Key in the friction table
    pub fn code(&self) -> &'static str {
        match self {
            PulleyMaterial::Steel => "steel",
            PulleyMaterial::Aluminum => "aluminum",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "steel" | "cast iron" => Ok(PulleyMaterial::Steel),
            "aluminum" | "aluminium" => Ok(PulleyMaterial::Aluminum),
            _ => Err(CalcError::not_valid("pulley_material", s, "expected steel or aluminum")),
        }
    }
}

impl std::fmt::Display for PulleyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Friction coefficient between a belt and a pulley material.
pub fn friction_coefficient(belt: BeltMaterial, pulley: PulleyMaterial) -> CalcResult<f64> {
    TableSearch::open("fric_coef", &["belt_material", "pulley_material", "fric_coef"])?
        .find_text(&[belt.code(), pulley.code()])
}

// ============================================================================
// Speed and torque
// ============================================================================

/// Mean belt speed, m/s, for a pulley diameter (mm) at `rpm`.
pub fn peripheral_speed(diameter: f64, rpm: f64) -> CalcResult<f64> {
    ensure_positive("diameter", diameter)?;
    ensure_positive("rpm", rpm)?;
    let diameter_m = diameter / 1000.0;
    Ok(PI * (diameter_m / 2.0) * rpm / 30.0)
}

/// Shaft torque, kgf·m, for a power (hp) at `rpm`.
pub fn torque(power: f64, rpm: f64) -> CalcResult<f64> {
    ensure_positive("power", power)?;
    ensure_positive("rpm", rpm)?;
    Ok(2250.0 * power / (PI * rpm))
}

// ============================================================================
// Forces
// ============================================================================

/// Belt forces of a two-pulley drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeltForces {
    /// Effective pull
    pub effective: Newtons,
    /// Slack side force F_0
    pub slack_side: Newtons,
    /// Tight side force F_1
    pub tight_side: Newtons,
    /// Resultant on the axle F_z
    pub axle: Newtons,
}

impl BeltForces {
    /// Axle load in kgf
    pub fn axle_force(&self) -> KilogramForce {
        self.axle.into()
    }

    /// Tight minus slack side, kgf
    pub fn tangential_force(&self) -> KilogramForce {
        (self.tight_side - self.slack_side).into()
    }
}

/// Belt forces for a torque (kgf·m) on the driving pulley.
///
/// Diameters and center distance in mm.
pub fn belt_forces(
    torque: f64,
    driving_diameter: f64,
    driven_diameter: f64,
    center_distance: f64,
    belt: BeltMaterial,
    pulley: PulleyMaterial,
) -> CalcResult<BeltForces> {
    ensure_positive("torque", torque)?;
    ensure_positive("driving_diameter", driving_diameter)?;
    ensure_positive("driven_diameter", driven_diameter)?;

    let effective = torque * GRAVITY / (driving_diameter / 2000.0);
    let theta = contact_arc_angle(driving_diameter, driven_diameter, center_distance)?;
    let mu = friction_coefficient(belt, pulley)?;
    let wrap = (mu * theta).exp();

    Ok(BeltForces {
        effective: Newtons(effective),
        slack_side: Newtons(effective / (wrap - 1.0)),
        tight_side: Newtons(effective * wrap / (wrap - 1.0)),
        axle: Newtons(effective * (wrap + 1.0) / (wrap - 1.0)),
    })
}

/// Input for [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "power": 3.0,
///   "rpm": 1750.0,
///   "driving_diameter": 130.0,
///   "driven_diameter": 240.0,
///   "center_distance": 500.0,
///   "belt_material": "rubber",
///   "pulley_material": "steel"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceInput {
    /// Transmitted power, hp
    pub power: f64,
    /// Driving pulley speed, rpm
    pub rpm: f64,
    /// mm
    pub driving_diameter: f64,
    /// mm
    pub driven_diameter: f64,
    /// Corrected center distance, mm
    pub center_distance: f64,
    pub belt_material: BeltMaterial,
    pub pulley_material: PulleyMaterial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceResult {
    /// kgf·m
    pub torque: f64,
    /// m/s
    pub peripheral_speed: f64,
    /// Contact arc on the small pulley, rad
    pub contact_arc: f64,
    pub friction_coefficient: f64,
    pub forces: BeltForces,
    pub axle_force: KilogramForce,
    pub tangential_force: KilogramForce,
}

/// Speed, torque and belt forces of a drive.
pub fn calculate(input: &ForceInput) -> CalcResult<ForceResult> {
    let torque = torque(input.power, input.rpm)?;
    let forces = belt_forces(
        torque,
        input.driving_diameter,
        input.driven_diameter,
        input.center_distance,
        input.belt_material,
        input.pulley_material,
    )?;
    Ok(ForceResult {
        torque,
        peripheral_speed: peripheral_speed(input.driving_diameter, input.rpm)?,
        contact_arc: contact_arc_angle(input.driving_diameter, input.driven_diameter, input.center_distance)?,
        friction_coefficient: friction_coefficient(input.belt_material, input.pulley_material)?,
        axle_force: forces.axle_force(),
        tangential_force: forces.tangential_force(),
        forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_peripheral_speed() {
        assert!(approx_eq(peripheral_speed(240.0, 1750.0).unwrap(), 21.991148575128552, 1e-12));
        assert!(peripheral_speed(0.0, 1750.0).is_err());
    }

    #[test]
    fn test_torque() {
        let t = torque(3.0, 1750.0).unwrap();
        assert!(approx_eq(t, 6750.0 / (PI * 1750.0), 1e-12));
    }

    #[test]
    fn test_friction_coefficients() {
        assert_eq!(friction_coefficient(BeltMaterial::Rubber, PulleyMaterial::Steel).unwrap(), 0.3);
        assert_eq!(friction_coefficient(BeltMaterial::Nylon, PulleyMaterial::Aluminum).unwrap(), 0.18);
        for belt in BeltMaterial::ALL {
            for pulley in PulleyMaterial::ALL {
                assert!(friction_coefficient(belt, pulley).is_ok());
            }
        }
    }

    #[test]
    fn test_material_parsing() {
        assert_eq!(BeltMaterial::from_str_flexible(" Rubber ").unwrap(), BeltMaterial::Rubber);
        assert_eq!(PulleyMaterial::from_str_flexible("aluminium").unwrap(), PulleyMaterial::Aluminum);
        assert_eq!(BeltMaterial::from_str_flexible("leather").unwrap_err().error_code(), "NOT_VALID");
    }

    #[test]
    fn test_force_balance() {
        let forces = belt_forces(1.2, 130.0, 240.0, 500.0, BeltMaterial::Rubber, PulleyMaterial::Steel).unwrap();
        let fu = forces.effective.value();
        assert!(approx_eq(fu, 1.2 * GRAVITY / 0.065, 1e-9));
        assert!(approx_eq(forces.tight_side.value() - forces.slack_side.value(), fu, 1e-9));
        assert!(approx_eq(forces.tight_side.value() + forces.slack_side.value(), forces.axle.value(), 1e-9));

        // 168° of wrap at (240 - 130) / 500 = 0.22
        let wrap = (0.3 * 168.0_f64.to_radians()).exp();
        assert!(approx_eq(forces.tight_side.value() / forces.slack_side.value(), wrap, 1e-9));
    }

    #[test]
    fn test_axle_and_tangential_force() {
        let forces = belt_forces(1.2, 130.0, 240.0, 500.0, BeltMaterial::Nylon, PulleyMaterial::Steel).unwrap();
        assert!(approx_eq(forces.axle_force().value(), forces.axle.value() / GRAVITY, 1e-12));
        assert!(approx_eq(forces.tangential_force().value(), 1.2 / 0.065, 1e-9));
        assert!(forces.tangential_force().value() > 0.0);
    }

    #[test]
    fn test_calculate() {
        let input = ForceInput {
            power: 3.0,
            rpm: 1750.0,
            driving_diameter: 130.0,
            driven_diameter: 240.0,
            center_distance: 500.0,
            belt_material: BeltMaterial::Rubber,
            pulley_material: PulleyMaterial::Steel,
        };
        let result = calculate(&input).unwrap();
        assert!(approx_eq(result.contact_arc, 168.0_f64.to_radians(), 1e-12));
        assert_eq!(result.friction_coefficient, 0.3);
        assert!(approx_eq(result.tangential_force.value(), result.torque / 0.065, 1e-9));
    }

    #[test]
    fn test_arc_outside_table() {
        let err = belt_forces(1.2, 130.0, 900.0, 100.0, BeltMaterial::Rubber, PulleyMaterial::Steel).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }
}
