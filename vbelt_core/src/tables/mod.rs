//! # Catalogue Tables
//!
//! Bundled catalogue data and the lookup machinery that reads it:
//!
//! - [`store`] - named, immutable datasets parsed once per process
//! - [`interpolate()`] / [`nearest()`] - two-point interpolation and
//!   nearest-size selection
//! - [`search`] - the scan-and-bracket table search in all its modes
//!
//! ## Example
//!
//! ```rust
//! use vbelt_core::tables::TableSearch;
//!
//! let search = TableSearch::open("hi_power_a_pb", &["diameter", "rpm", "power_b"]).unwrap();
//! let found = search.two_key(65.0, 950.0).unwrap();
//! assert_eq!(found.lookup.value, 0.55);
//! assert!(!found.needs_adjustment);
//! ```

pub mod interpolate;
pub mod search;
pub mod store;

pub use interpolate::{interpolate, nearest};
pub use search::{CommercialMatch, Lookup, Resolution, TableSearch, TwoKeyLookup};
pub use store::{Cell, Table};
