//! # Unit Types
//!
//! Type-safe wrappers for the units that cross module boundaries. These stay
//! plain `f64` newtypes so JSON serialization is just a number.
//!
//! The catalogues mix systems: minimum pulley diameters are tabulated in
//! inches, everything else in millimetres. Forces follow the technical system
//! used by the belt catalogues (kgf, with g = 9.81 m/s²).
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::units::{Inches, Millimeters};
//!
//! let pitch = Inches(2.5);
//! let pitch_mm: Millimeters = pitch.into();
//! assert_eq!(pitch_mm.0, 63.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Standard gravity as used by the catalogue formulas (m/s²)
pub const GRAVITY: f64 = 9.81;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilogram-force
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilogramForce(pub f64);

impl From<Newtons> for KilogramForce {
    fn from(n: Newtons) -> Self {
        KilogramForce(n.0 / GRAVITY)
    }
}

impl From<KilogramForce> for Newtons {
    fn from(kgf: KilogramForce) -> Self {
        Newtons(kgf.0 * GRAVITY)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Inches);
impl_arithmetic!(Newtons);
impl_arithmetic!(KilogramForce);
