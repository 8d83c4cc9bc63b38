//! # Belt Models and Profiles
//!
//! The two catalogued belt families and their cross-section profiles:
//!
//! | Model   | Profiles       | Power validity |
//! |---------|----------------|----------------|
//! | HiPower | A, B, C, D     | 1 - 500 hp     |
//! | SuperHC | 3V, 5V, 8V     | 1 - 1000 hp    |
//!
//! Both are valid between 100 and 5000 rpm on the fastest axle.
//!
//! Every model/profile pair maps onto its own bundled tables (basic power,
//! additional power), and every model onto its length, length-correction and
//! minimum-diameter tables.
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::belts::{BeltModel, Profile};
//!
//! let model = BeltModel::from_str_flexible("hi_power").unwrap();
//! let profile = Profile::from_str_flexible("a").unwrap();
//! assert_eq!(profile.model(), model);
//! assert_eq!(profile.basic_power_table(), "hi_power_a_pb");
//! ```

pub mod selector;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub use selector::select_profile;

/// V-belt model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltModel {
    /// Classical section belts (A, B, C, D)
    #[serde(rename = "HiPower")]
    HiPower,
    /// Narrow wedge belts (3V, 5V, 8V)
    #[serde(rename = "SuperHC")]
    SuperHc,
}

impl BeltModel {
    pub const ALL: [BeltModel; 2] = [BeltModel::HiPower, BeltModel::SuperHc];

    /// Prefix of this model's dataset names (e.g. "hi_power")
    pub fn code(&self) -> &'static str {
        match self {
            BeltModel::HiPower => "hi_power",
            BeltModel::SuperHc => "super_hc",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "hipower" | "hp" => Ok(BeltModel::HiPower),
            "superhc" | "shc" => Ok(BeltModel::SuperHc),
            _ => Err(CalcError::not_valid("model", s, "expected 'hi_power' or 'super_hc'")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BeltModel::HiPower => "HiPower",
            BeltModel::SuperHc => "SuperHC",
        }
    }

    /// Profiles of this model, smallest section first
    pub fn profiles(&self) -> &'static [Profile] {
        match self {
            BeltModel::HiPower => &[Profile::A, Profile::B, Profile::C, Profile::D],
            BeltModel::SuperHc => &[Profile::V3, Profile::V5, Profile::V8],
        }
    }

    pub fn length_table(&self) -> String {
        format!("{}_length", self.code())
    }

    pub fn length_correction_table(&self) -> String {
        format!("{}_fcc", self.code())
    }

    pub fn min_diameter_table(&self) -> String {
        format!("{}_min_diam", self.code())
    }
}

impl std::fmt::Display for BeltModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Belt cross-section profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    A,
    B,
    C,
    D,
    #[serde(rename = "3V")]
    V3,
    #[serde(rename = "5V")]
    V5,
    #[serde(rename = "8V")]
    V8,
}

impl Profile {
    pub const ALL: [Profile; 7] = [
        Profile::A,
        Profile::B,
        Profile::C,
        Profile::D,
        Profile::V3,
        Profile::V5,
        Profile::V8,
    ];

    /// Profile name as printed in the catalogues and length tables (e.g. "3V")
    pub fn code(&self) -> &'static str {
        match self {
            Profile::A => "A",
            Profile::B => "B",
            Profile::C => "C",
            Profile::D => "D",
            Profile::V3 => "3V",
            Profile::V5 => "5V",
            Profile::V8 => "8V",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Profile::A),
            "B" => Ok(Profile::B),
            "C" => Ok(Profile::C),
            "D" => Ok(Profile::D),
            "3V" | "V3" => Ok(Profile::V3),
            "5V" | "V5" => Ok(Profile::V5),
            "8V" | "V8" => Ok(Profile::V8),
            _ => Err(CalcError::not_valid("profile", s, "expected one of A, B, C, D, 3V, 5V, 8V")),
        }
    }

    /// The model family this profile belongs to
    pub fn model(&self) -> BeltModel {
        match self {
            Profile::A | Profile::B | Profile::C | Profile::D => BeltModel::HiPower,
            Profile::V3 | Profile::V5 | Profile::V8 => BeltModel::SuperHc,
        }
    }

    /// Check that this profile belongs to `model`.
    pub fn ensure_model(&self, model: BeltModel) -> CalcResult<()> {
        if self.model() != model {
            return Err(CalcError::not_valid(
                "profile",
                self.code(),
                format!("not a {} profile", model.display_name()),
            ));
        }
        Ok(())
    }

    pub fn basic_power_table(&self) -> String {
        format!("{}_{}_pb", self.model().code(), self.code().to_lowercase())
    }

    pub fn additional_power_table(&self) -> String {
        format!("{}_{}_pa", self.model().code(), self.code().to_lowercase())
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parsing() {
        assert_eq!(BeltModel::from_str_flexible("HiPower").unwrap(), BeltModel::HiPower);
        assert_eq!(BeltModel::from_str_flexible("super_hc").unwrap(), BeltModel::SuperHc);
        assert_eq!(BeltModel::from_str_flexible("Super HC").unwrap(), BeltModel::SuperHc);
        let err = BeltModel::from_str_flexible("ultra").unwrap_err();
        assert_eq!(err.error_code(), "NOT_VALID");
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!(Profile::from_str_flexible("a").unwrap(), Profile::A);
        assert_eq!(Profile::from_str_flexible("3v").unwrap(), Profile::V3);
        assert!(Profile::from_str_flexible("E").is_err());
    }

    #[test]
    fn test_profile_model() {
        for model in BeltModel::ALL {
            for profile in model.profiles() {
                assert_eq!(profile.model(), model);
                assert!(profile.ensure_model(model).is_ok());
            }
        }
        assert!(Profile::V5.ensure_model(BeltModel::HiPower).is_err());
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Profile::V8.additional_power_table(), "super_hc_8v_pa");
        assert_eq!(Profile::D.basic_power_table(), "hi_power_d_pb");
        assert_eq!(BeltModel::SuperHc.length_table(), "super_hc_length");
        assert_eq!(BeltModel::HiPower.min_diameter_table(), "hi_power_min_diam");
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Profile::V3).unwrap(), "\"3V\"");
        assert_eq!(serde_json::to_string(&BeltModel::SuperHc).unwrap(), "\"SuperHC\"");
    }
}
