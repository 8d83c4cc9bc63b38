//! # Service Factor
//!
//! Oversizing factor applied to the engine power, from the driven machine,
//! the kind of drive and the daily hours of service.
//!
//! Machines fall into four groups (1 = smooth running, 4 = heavy shock) and
//! drives into two (1 = normal starting torque, 2 = high starting torque or
//! intermittent drives). Descriptions are matched against a fixed keyword
//! lexicon: an exact keyword, or the leading words of one ("heavy conveyor"
//! finds "heavy conveyor belt").
//!
//! | Machine group | ≤ 5 h | ≤ 10 h | ≤ 24 h |
//! |---------------|-------|--------|--------|
//! | 1             | 1.0   | 1.1    | 1.2    |
//! | 2             | 1.1   | 1.2    | 1.3    |
//! | 3             | 1.2   | 1.3    | 1.4    |
//! | 4             | 1.3   | 1.4    | 1.5    |
//!
//! Group 2 drives add 0.1 for machine groups 1 and 2, 0.2 for group 3 (0.1
//! when the partial factor is 1.4) and 0.3 for group 4 (0.2 when the partial
//! factor is 1.4).
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::service_factor::{estimated_power, service_factor};
//!
//! let sf = service_factor("crane", "clutch", 20.0).unwrap();
//! assert_eq!(sf, 1.8);
//! assert_eq!(estimated_power(2.0, sf).unwrap(), 3.6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, ensure_positive, CalcError, CalcResult};

/// Driven machines and their groups.
pub const MACHINE_LEXICON: [(&str, u8); 24] = [
    ("stirrer", 1),
    ("small blower", 1),
    ("exhaustor", 1),
    ("centrifugal pump", 1),
    ("regular compressor", 1),
    ("light conveyor belt", 1),
    ("heavy conveyor belt", 2),
    ("large blower", 2),
    ("generator", 2),
    ("transmission axle", 2),
    ("laundry machine", 2),
    ("press", 2),
    ("graphical machine", 2),
    ("positive displacement pump", 2),
    ("sieving machine", 2),
    ("pottery machine", 3),
    ("bucket elevator", 3),
    ("reciprocating compressor", 3),
    ("mill", 3),
    ("carpentry machine", 3),
    ("textile machine", 3),
    ("crusher", 4),
    ("crane", 4),
    ("tire shop machine", 4),
];

/// Drives and their groups.
pub const DRIVE_LEXICON: [(&str, u8); 16] = [
    ("normal torque ac", 1),
    ("ring cage ac", 1),
    ("synchronous ac", 1),
    ("phase division ac", 1),
    ("derivation dc", 1),
    ("multiple cylinder combustion", 1),
    ("high torque ac", 2),
    ("high slipping ac", 2),
    ("repulsion induction ac", 2),
    ("monophasic ac", 2),
    ("series winding dc", 2),
    ("collector rings ac", 2),
    ("mixed winding dc", 2),
    ("single cylinder combustion", 2),
    ("transmission axle", 2),
    ("clutch", 2),
];

const MACHINE_GROUPS: u8 = 4;
const DRIVE_GROUPS: u8 = 2;

/// Upper edges of the daily service bands, hours
const SERVICE_BANDS: [f64; 3] = [5.0, 10.0, 24.0];

fn normalise(description: &str) -> String {
    description
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group of a free-text description in `lexicon`.
fn classify(field: &str, description: &str, lexicon: &[(&str, u8)]) -> CalcResult<u8> {
    let wanted = normalise(description);
    if wanted.is_empty() {
        return Err(CalcError::not_valid(field, description, "description is empty"));
    }

    if let Some(&(_, group)) = lexicon.iter().find(|(keyword, _)| *keyword == wanted) {
        return Ok(group);
    }
    lexicon
        .iter()
        .find(|(keyword, _)| {
            keyword
                .strip_prefix(wanted.as_str())
                .is_some_and(|rest| rest.starts_with(' '))
        })
        .map(|&(_, group)| group)
        .ok_or_else(|| CalcError::not_valid(field, description, "no matching entry in the lexicon"))
}

/// Group (1-4) of a driven machine description.
pub fn machine_group(machine: &str) -> CalcResult<u8> {
    classify("machine", machine, &MACHINE_LEXICON)
}

/// Group (1-2) of a drive description.
pub fn drive_group(drive: &str) -> CalcResult<u8> {
    classify("drive", drive, &DRIVE_LEXICON)
}

fn check_group(field: &str, group: u8, groups: u8) -> CalcResult<()> {
    if group == 0 || group > groups {
        return Err(CalcError::not_valid(
            field,
            group.to_string(),
            format!("groups run from 1 to {}", groups),
        ));
    }
    Ok(())
}

fn partial_tenths(machine_group: u8, hours_service: f64) -> CalcResult<u8> {
    check_group("machine_group", machine_group, MACHINE_GROUPS)?;
    ensure_finite("hours_service", hours_service)?;
    let band = if hours_service > 0.0 {
        SERVICE_BANDS.iter().position(|&upper| hours_service <= upper)
    } else {
        None
    };
    let band = band.ok_or_else(|| {
        CalcError::out_of_range(
            "service factor",
            "hours_service",
            hours_service,
            "daily service must be within (0, 24] hours",
        )
    })?;
    Ok(10 + (machine_group - 1) + band as u8)
}

/// Service factor before the drive correction.
pub fn partial_service_factor(machine_group: u8, hours_service: f64) -> CalcResult<f64> {
    Ok(f64::from(partial_tenths(machine_group, hours_service)?) / 10.0)
}

/// Service factor from already classified groups.
pub fn service_factor_for_groups(machine_group: u8, drive_group: u8, hours_service: f64) -> CalcResult<f64> {
    check_group("drive_group", drive_group, DRIVE_GROUPS)?;
    let partial = partial_tenths(machine_group, hours_service)?;
    let adder = match (machine_group, drive_group) {
        (_, 1) => 0,
        (1 | 2, _) => 1,
        (3, _) if partial == 14 => 1,
        (3, _) => 2,
        (_, _) if partial == 14 => 2,
        (_, _) => 3,
    };
    Ok(f64::from(partial + adder) / 10.0)
}

/// Service factor from machine and drive descriptions.
pub fn service_factor(machine: &str, drive: &str, hours_service: f64) -> CalcResult<f64> {
    let machine_group = machine_group(machine)?;
    let drive_group = drive_group(drive)?;
    let factor = service_factor_for_groups(machine_group, drive_group, hours_service)?;
    tracing::debug!(machine, machine_group, drive, drive_group, hours_service, factor, "service factor");
    Ok(factor)
}

/// Design power: engine power (hp) times the service factor.
pub fn estimated_power(engine_power: f64, service_factor: f64) -> CalcResult<f64> {
    ensure_positive("engine_power", engine_power)?;
    ensure_positive("service_factor", service_factor)?;
    Ok(engine_power * service_factor)
}

/// Input for [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "engine_power": 3.0,
///   "machine": "stirrer",
///   "drive": "normal torque ac",
///   "hours_service": 8.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceFactorInput {
    /// Engine power, hp
    pub engine_power: f64,

    /// Driven machine description
    pub machine: String,

    /// Drive description
    pub drive: String,

    /// Daily hours of service
    pub hours_service: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFactorResult {
    pub machine_group: u8,
    pub drive_group: u8,
    pub service_factor: f64,
    /// Engine power times the service factor, hp
    pub estimated_power: f64,
}

/// Classify the machine and drive and compute the design power.
pub fn calculate(input: &ServiceFactorInput) -> CalcResult<ServiceFactorResult> {
    let machine_group = machine_group(&input.machine)?;
    let drive_group = drive_group(&input.drive)?;
    let service_factor = service_factor_for_groups(machine_group, drive_group, input.hours_service)?;
    Ok(ServiceFactorResult {
        machine_group,
        drive_group,
        service_factor,
        estimated_power: estimated_power(input.engine_power, service_factor)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(machine_group("stirrer").unwrap(), 1);
        assert_eq!(machine_group("  Heavy   Conveyor Belt ").unwrap(), 2);
        assert_eq!(machine_group("heavy conveyor").unwrap(), 2);
        assert_eq!(machine_group("tire shop machine").unwrap(), 4);
        assert_eq!(drive_group("transmission axle").unwrap(), 2);
        assert_eq!(drive_group("normal torque ac").unwrap(), 1);
    }

    #[test]
    fn test_classification_requires_word_boundary() {
        assert!(machine_group("cran").is_err());
        assert!(machine_group("conveyor").is_err());
        assert_eq!(machine_group("").unwrap_err().error_code(), "NOT_VALID");
        assert_eq!(drive_group("steam turbine").unwrap_err().error_code(), "NOT_VALID");
    }

    #[test]
    fn test_partial_factor_table() {
        assert_eq!(partial_service_factor(1, 4.0).unwrap(), 1.0);
        assert_eq!(partial_service_factor(1, 5.0).unwrap(), 1.0);
        assert_eq!(partial_service_factor(2, 5.5).unwrap(), 1.2);
        assert_eq!(partial_service_factor(3, 24.0).unwrap(), 1.4);
        assert_eq!(partial_service_factor(4, 10.0).unwrap(), 1.4);
    }

    #[test]
    fn test_hours_out_of_range() {
        assert_eq!(partial_service_factor(1, 0.0).unwrap_err().error_code(), "OUT_OF_RANGE");
        assert_eq!(partial_service_factor(1, 25.0).unwrap_err().error_code(), "OUT_OF_RANGE");
        assert!(partial_service_factor(5, 8.0).is_err());
    }

    #[test]
    fn test_service_factor_cases() {
        let cases = [
            ("stirrer", "normal torque ac", 4.0, 1.0),
            ("stirrer", "high torque ac", 4.0, 1.1),
            ("generator", "series winding dc", 12.0, 1.4),
            ("mill", "clutch", 5.0, 1.4),
            ("mill", "clutch", 20.0, 1.5),
            ("crane", "clutch", 5.0, 1.6),
            ("crane", "clutch", 10.0, 1.6),
            ("crane", "clutch", 20.0, 1.8),
            ("crusher", "derivation dc", 20.0, 1.5),
        ];
        for (machine, drive, hours, expected) in cases {
            assert_eq!(service_factor(machine, drive, hours).unwrap(), expected, "{} / {} / {} h", machine, drive, hours);
        }
    }

    #[test]
    fn test_calculate() {
        let input = ServiceFactorInput {
            engine_power: 2.0,
            machine: "crusher".to_string(),
            drive: "monophasic ac".to_string(),
            hours_service: 18.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.machine_group, 4);
        assert_eq!(result.drive_group, 2);
        assert_eq!(result.service_factor, 1.8);
        assert!((result.estimated_power - 3.6).abs() < 1e-12);
    }
}
