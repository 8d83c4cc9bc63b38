//! Profile selection from estimated power and fastest axle speed.
//!
//! Each model's selection chart is split into bands by boundary curves, one
//! per profile except the largest. A boundary rises linearly with power up to
//! a breakpoint and is flat beyond it. The fastest rpm is compared against
//! the boundaries from the smallest profile down; the first boundary it
//! reaches picks the profile, and anything below every boundary gets the
//! largest profile of the model.

use crate::belts::{BeltModel, Profile};
use crate::errors::{ensure_finite, CalcError, CalcResult};

/// Lower rpm edge of a profile band as a function of power.
#[derive(Debug, Clone, Copy)]
struct Boundary {
    profile: Profile,
    slope: f64,
    intercept: f64,
    plateau: f64,
    breakpoint: f64,
}

impl Boundary {
    fn rpm_at(&self, power: f64) -> f64 {
        if power < self.breakpoint {
            (self.slope * power + self.intercept).abs()
        } else {
            self.plateau
        }
    }
}

const HI_POWER_BOUNDARIES: [Boundary; 3] = [
    Boundary {
        profile: Profile::A,
        slope: 74.1950272674027,
        intercept: 47.215442190042,
        plateau: 3322.0,
        breakpoint: 50.7,
    },
    Boundary {
        profile: Profile::B,
        slope: 19.3889694765281,
        intercept: 32.2532889843209,
        plateau: 2151.4,
        breakpoint: 122.3,
    },
    Boundary {
        profile: Profile::C,
        slope: 4.94622293507244,
        intercept: 19.7301462298106,
        plateau: 1335.9,
        breakpoint: 277.35,
    },
];

const SUPER_HC_BOUNDARIES: [Boundary; 2] = [
    Boundary {
        profile: Profile::V3,
        slope: 40.6961726224751,
        intercept: 11.8866879052094,
        plateau: 3316.25,
        breakpoint: 91.0,
    },
    Boundary {
        profile: Profile::V5,
        slope: 4.30114168431602,
        intercept: 3.84423100031302,
        plateau: 1332.74,
        breakpoint: 309.0,
    },
];

/// Validity window of a model's selection chart: (rpm_min, rpm_max, power_min, power_max)
fn validity(model: BeltModel) -> (f64, f64, f64, f64) {
    match model {
        BeltModel::HiPower => (100.0, 5000.0, 1.0, 500.0),
        BeltModel::SuperHc => (100.0, 5000.0, 1.0, 1000.0),
    }
}

fn boundaries(model: BeltModel) -> &'static [Boundary] {
    match model {
        BeltModel::HiPower => &HI_POWER_BOUNDARIES,
        BeltModel::SuperHc => &SUPER_HC_BOUNDARIES,
    }
}

/// Select the belt profile for an estimated power (hp) and the speed of the
/// fastest axle (rpm).
///
/// # Example
///
/// ```rust
/// use vbelt_core::belts::{select_profile, BeltModel, Profile};
///
/// assert_eq!(select_profile(BeltModel::HiPower, 9.0, 400.0).unwrap(), Profile::B);
/// assert_eq!(select_profile(BeltModel::SuperHc, 30.0, 690.0).unwrap(), Profile::V5);
/// assert!(select_profile(BeltModel::HiPower, 600.0, 400.0).is_err());
/// ```
pub fn select_profile(model: BeltModel, est_power: f64, rpm_fastest: f64) -> CalcResult<Profile> {
    ensure_finite("est_power", est_power)?;
    ensure_finite("rpm_fastest", rpm_fastest)?;

    let chart = format!("{} selection chart", model.display_name());
    let (rpm_min, rpm_max, power_min, power_max) = validity(model);
    if rpm_fastest < rpm_min || rpm_fastest > rpm_max {
        return Err(CalcError::out_of_range(
            chart,
            "rpm_fastest",
            rpm_fastest,
            format!("must be between {} and {} rpm", rpm_min, rpm_max),
        ));
    }
    if est_power < power_min || est_power > power_max {
        return Err(CalcError::out_of_range(
            chart,
            "est_power",
            est_power,
            format!("must be between {} and {} hp", power_min, power_max),
        ));
    }

    let profile = boundaries(model)
        .iter()
        .find(|b| rpm_fastest >= b.rpm_at(est_power))
        .map(|b| b.profile)
        .unwrap_or_else(|| *model.profiles().last().unwrap_or(&Profile::D));

    tracing::debug!(model = %model, est_power, rpm_fastest, profile = %profile, "selected profile");
    Ok(profile)
}
