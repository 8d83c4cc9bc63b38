//! # vbelt_core - V-Belt Drive Sizing Engine
//!
//! `vbelt_core` sizes V-belt transmissions from manufacturer catalogue data:
//! service factor, belt profile, pulley diameters, belt length and center
//! distance, power capacity per belt and the number of belts. All inputs and
//! outputs are JSON-serializable.
//!
//! At its heart is a small table engine: catalogue tables ship inside the
//! library, and every catalogue quantity is read from them either exactly,
//! by linear interpolation between bracketing rows, or by snapping to the
//! nearest commercial size. Queries outside a table are errors, never
//! extrapolations.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over immutable, lazily loaded tables
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the table and parameter
//!
//! ## Quick Start
//!
//! ```rust
//! use vbelt_core::belts::{BeltModel, Profile};
//! use vbelt_core::power::lookup_basic_power;
//! use vbelt_core::commercial::select_commercial_belt;
//!
//! let pb = lookup_basic_power(BeltModel::HiPower, Profile::A, 65.0, 950.0).unwrap();
//! assert_eq!(pb, 0.55);
//!
//! let belt = select_commercial_belt(Profile::V3, 680.0).unwrap();
//! assert_eq!(belt.belt_type, "3V265");
//! ```
//!
//! ## Modules
//!
//! - [`tables`] - Dataset store, interpolation and table search
//! - [`belts`] - Belt models, profiles and profile selection
//! - [`service_factor`] - Service factor and design power
//! - [`pulley`] - Gear ratio, pulley diameters, catalogue minimum diameter
//! - [`commercial`] - Commercial belt lengths and pulley diameters
//! - [`geometry`] - Belt length and center distance
//! - [`power`] - Basic/additional power, correction factors, belt count
//! - [`force`] - Belt speed, torque and belt forces
//! - [`drive`] - Complete drive sizing
//! - [`config`] - Solver settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (dataset loads, table brackets at
//! `trace`, selections at `debug`, solver timeouts at `warn`) and leaves the
//! choice of subscriber to the application.

pub mod belts;
pub mod commercial;
pub mod config;
pub mod drive;
pub mod errors;
pub mod force;
pub mod geometry;
pub mod power;
pub mod pulley;
pub mod service_factor;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use belts::{select_profile, BeltModel, Profile};
pub use commercial::{select_commercial_belt, select_commercial_diameter, select_commercial_diameter_with};
pub use config::SolverSettings;
pub use errors::{CalcError, CalcResult};
pub use power::{lookup_additional_power, lookup_basic_power, lookup_contact_arc_factor, lookup_length_correction_factor};
pub use tables::{interpolate, nearest};
