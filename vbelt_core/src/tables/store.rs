//! Bundled dataset store.
//!
//! Every catalogue table ships inside the library as a TOML document compiled
//! in with `include_str!`. A dataset is parsed the first time it is asked for
//! and then cached for the lifetime of the process; tables are never mutated
//! after that, so lookups can run from any thread without locking.
//!
//! ## Dataset format
//!
//! ```toml
//! name = "h_factor"
//! revision = 1
//! columns = ["factor", "h"]
//! rows = [
//!     [0.0, 0.0],
//!     [0.02, 0.01],
//! ]
//! ```
//!
//! `columns` is the header row. Numeric cells are bare floats and string
//! cells are quoted. Row order is significant: rows are stored sorted
//! ascending on their key columns and are never re-sorted.

use std::collections::HashMap;

use once_cell::sync::{Lazy, OnceCell};
use serde::Deserialize;

use crate::errors::{CalcError, CalcResult};

macro_rules! dataset {
    ($name:literal) => {
        ($name, include_str!(concat!("../../data/", $name, ".toml")))
    };
}

/// Every bundled dataset, by name.
const DATASETS: &[(&str, &str)] = &[
    dataset!("fcac_contact_arc"),
    dataset!("fric_coef"),
    dataset!("h_factor"),
    dataset!("hi_power_a_pa"),
    dataset!("hi_power_a_pb"),
    dataset!("hi_power_b_pa"),
    dataset!("hi_power_b_pb"),
    dataset!("hi_power_c_pa"),
    dataset!("hi_power_c_pb"),
    dataset!("hi_power_d_pa"),
    dataset!("hi_power_d_pb"),
    dataset!("hi_power_fcc"),
    dataset!("hi_power_length"),
    dataset!("hi_power_min_diam"),
    dataset!("super_hc_3v_pa"),
    dataset!("super_hc_3v_pb"),
    dataset!("super_hc_5v_pa"),
    dataset!("super_hc_5v_pb"),
    dataset!("super_hc_8v_pa"),
    dataset!("super_hc_8v_pb"),
    dataset!("super_hc_fcc"),
    dataset!("super_hc_length"),
    dataset!("super_hc_min_diam"),
];

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// On-disk shape of a dataset.
#[derive(Debug, Deserialize)]
struct RawTable {
    name: String,
    revision: u32,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// An immutable, ordered table of typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    revision: u32,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Parse a dataset document, checking that it is the table `name` and
    /// that every row is as wide as the header.
    pub fn parse(name: &str, source: &str) -> CalcResult<Self> {
        let raw: RawTable = toml::from_str(source).map_err(|e| CalcError::data_format(name, e.to_string()))?;

        if raw.name != name {
            return Err(CalcError::data_format(
                name,
                format!("document declares itself as '{}'", raw.name),
            ));
        }
        if raw.columns.is_empty() {
            return Err(CalcError::data_format(name, "header row is empty"));
        }
        if let Some((idx, row)) = raw
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != raw.columns.len())
        {
            return Err(CalcError::data_format(
                name,
                format!(
                    "row {} has {} cells, header has {} columns",
                    idx,
                    row.len(),
                    raw.columns.len()
                ),
            ));
        }

        Ok(Table {
            name: raw.name,
            revision: raw.revision,
            columns: raw.columns,
            rows: raw.rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column.
    pub fn column(&self, column: &str) -> CalcResult<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| CalcError::data_format(&self.name, format!("no column named '{}'", column)))
    }

    /// Numeric cell at (`row`, `col`).
    pub fn number_at(&self, row: usize, col: usize) -> CalcResult<f64> {
        match self.cell(row, col)? {
            Cell::Number(v) => Ok(*v),
            Cell::Text(s) => Err(CalcError::data_format(
                &self.name,
                format!("expected a number in column '{}' of row {}, found \"{}\"", self.columns[col], row, s),
            )),
        }
    }

    /// Text cell at (`row`, `col`).
    pub fn text_at(&self, row: usize, col: usize) -> CalcResult<&str> {
        match self.cell(row, col)? {
            Cell::Text(s) => Ok(s.as_str()),
            Cell::Number(v) => Err(CalcError::data_format(
                &self.name,
                format!("expected text in column '{}' of row {}, found {}", self.columns[col], row, v),
            )),
        }
    }

    fn cell(&self, row: usize, col: usize) -> CalcResult<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or_else(|| CalcError::data_format(&self.name, format!("no cell at row {}, column {}", row, col)))
    }
}

struct Dataset {
    source: &'static str,
    table: OnceCell<Table>,
}

static STORE: Lazy<HashMap<&'static str, Dataset>> = Lazy::new(|| {
    DATASETS
        .iter()
        .map(|&(name, source)| {
            (
                name,
                Dataset {
                    source,
                    table: OnceCell::new(),
                },
            )
        })
        .collect()
});

/// Load a bundled table by name.
///
/// # Example
///
/// ```rust
/// use vbelt_core::tables::store;
///
/// let table = store::load("fcac_contact_arc").unwrap();
/// assert_eq!(table.columns(), ["factor", "contact_arc", "fcac"]);
/// assert!(store::load("no_such_table").is_err());
/// ```
pub fn load(name: &str) -> CalcResult<&'static Table> {
    let dataset = STORE.get(name).ok_or_else(|| CalcError::data_not_found(name))?;
    dataset.table.get_or_try_init(|| {
        let table = Table::parse(name, dataset.source)?;
        tracing::debug!(table = name, revision = table.revision, rows = table.len(), "loaded dataset");
        Ok(table)
    })
}

/// Names of all bundled datasets.
pub fn dataset_names() -> impl Iterator<Item = &'static str> {
    DATASETS.iter().map(|&(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name = "sample"
revision = 2
columns = ["profile", "length", "type"]
rows = [
    ["3V", 635.0, "3V250"],
    ["3V", 675.0, "3V265"],
]
"#;

    #[test]
    fn test_parse_typed_cells() {
        let table = Table::parse("sample", SAMPLE).unwrap();
        assert_eq!(table.revision(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.text_at(1, 0).unwrap(), "3V");
        assert_eq!(table.number_at(1, 1).unwrap(), 675.0);
        assert_eq!(table.column("type").unwrap(), 2);
    }

    #[test]
    fn test_cell_type_mismatch() {
        let table = Table::parse("sample", SAMPLE).unwrap();
        assert_eq!(table.number_at(0, 0).unwrap_err().error_code(), "DATA_FORMAT");
        assert_eq!(table.text_at(0, 1).unwrap_err().error_code(), "DATA_FORMAT");
        assert!(table.column("missing").is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let source = r#"
name = "ragged"
revision = 1
columns = ["factor", "h"]
rows = [[0.0, 0.0], [0.02]]
"#;
        let err = Table::parse("ragged", source).unwrap_err();
        assert!(matches!(err, CalcError::DataFormat { .. }));
    }

    #[test]
    fn test_name_mismatch_rejected() {
        assert!(Table::parse("other", SAMPLE).is_err());
    }

    #[test]
    fn test_load_is_cached() {
        let first = load("h_factor").unwrap();
        let second = load("h_factor").unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_missing_dataset() {
        assert_eq!(
            load("hi_power_z_pb").unwrap_err(),
            CalcError::data_not_found("hi_power_z_pb")
        );
    }
}
