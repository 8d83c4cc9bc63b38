//! # Table Search Engine
//!
//! One scan-and-bracket algorithm with several modes. A [`TableSearch`] binds
//! a table to the columns playing each role in the query (keys first, output
//! last), walks the rows in stored order and either stops on an exact key,
//! interpolates between the two rows bracketing the query, or picks the
//! nearer commercial size.
//!
//! | Mode                         | Roles                              |
//! |------------------------------|------------------------------------|
//! | [`TableSearch::exact_or_interpolate`] | key, value               |
//! | [`TableSearch::choose`]      | key, output, output, ...           |
//! | [`TableSearch::two_key`]     | first key, second key, value       |
//! | [`TableSearch::range_band`]  | band low, band high, key, value    |
//! | [`TableSearch::nearest_commercial`] | group, size, name           |
//! | [`TableSearch::find_text`]   | text key, ..., value               |
//!
//! Any query outside the tabulated domain is an `OutOfRange` error.

use crate::errors::{CalcError, CalcResult};
use crate::tables::interpolate::{interpolate, nearest};
use crate::tables::store::{self, Table};

/// How a value was obtained from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The query hit a tabulated key
    Exact,
    /// The value lies between two tabulated rows
    Interpolated,
}

/// A value read from a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    pub value: f64,
    pub resolution: Resolution,
}

impl Lookup {
    fn exact(value: f64) -> Self {
        Lookup {
            value,
            resolution: Resolution::Exact,
        }
    }

    fn interpolated(value: f64) -> Self {
        Lookup {
            value,
            resolution: Resolution::Interpolated,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.resolution == Resolution::Exact
    }
}

/// Outcome of a two-key search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoKeyLookup {
    pub lookup: Lookup,
    /// The first key was not tabulated; the value comes from the next larger
    /// tabulated first key.
    pub needs_adjustment: bool,
}

/// A commercial size picked from a grouped size table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommercialMatch<'a> {
    pub size: f64,
    pub name: &'a str,
    pub exact: bool,
}

/// Bracketed resolution, keeping the bracket outputs for callers that
/// reject marker values.
struct Bracketed {
    lookup: Lookup,
    y_low: f64,
    y_high: f64,
}

/// A table bound to the columns playing each role in a query.
#[derive(Debug, Clone)]
pub struct TableSearch<'a> {
    table: &'a Table,
    roles: Vec<usize>,
}

impl<'a> TableSearch<'a> {
    /// Bind `table` to the named role columns.
    pub fn new(table: &'a Table, roles: &[&str]) -> CalcResult<Self> {
        let roles = roles.iter().map(|r| table.column(r)).collect::<CalcResult<Vec<_>>>()?;
        Ok(TableSearch { table, roles })
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    fn name(&self) -> &'a str {
        self.table.name()
    }

    fn expect_roles(&self, mode: &str, count: usize) -> CalcResult<()> {
        if self.roles.len() != count {
            return Err(CalcError::data_format(
                self.name(),
                format!("{} search needs {} columns, {} bound", mode, count, self.roles.len()),
            ));
        }
        Ok(())
    }

    fn num(&self, row: usize, role: usize) -> CalcResult<f64> {
        self.table.number_at(row, self.roles[role])
    }

    fn text(&self, row: usize, role: usize) -> CalcResult<&'a str> {
        self.table.text_at(row, self.roles[role])
    }

    /// Walk `rows` comparing `query` against the `key` role.
    ///
    /// `origin` is an implicit lower bracket below the first row; without it
    /// a query below the first key is out of range.
    fn resolve(
        &self,
        rows: impl IntoIterator<Item = usize>,
        key: usize,
        value: usize,
        query: f64,
        origin: Option<(f64, f64)>,
        parameter: &str,
    ) -> CalcResult<Bracketed> {
        let mut last = origin;
        for row in rows {
            let k = self.num(row, key)?;
            let v = self.num(row, value)?;
            if query == k {
                tracing::trace!(table = self.name(), row, query, value = v, "exact match");
                return Ok(Bracketed {
                    lookup: Lookup::exact(v),
                    y_low: v,
                    y_high: v,
                });
            }
            if query < k {
                return match last {
                    Some((lk, lv)) if lk < query => {
                        let y = interpolate(query, lk, k, lv, v)?;
                        tracing::trace!(table = self.name(), row, query, low = lk, high = k, value = y, "interpolated");
                        Ok(Bracketed {
                            lookup: Lookup::interpolated(y),
                            y_low: lv,
                            y_high: v,
                        })
                    }
                    _ => Err(CalcError::out_of_range(
                        self.name(),
                        parameter,
                        query,
                        format!("below the first tabulated value {}", k),
                    )),
                };
            }
            last = Some((k, v));
        }
        Err(CalcError::out_of_range(
            self.name(),
            parameter,
            query,
            match last {
                Some((lk, _)) => format!("above the last tabulated value {}", lk),
                None => "no tabulated values".to_string(),
            },
        ))
    }

    /// Single-key lookup: exact key or linear interpolation.
    ///
    /// Roles: `[key, value]`. The first row is bracketed from below by an
    /// implicit `(0, 0)` row.
    pub fn exact_or_interpolate(&self, query: f64) -> CalcResult<Lookup> {
        self.expect_roles("exact-or-interpolate", 2)?;
        self.choose(query, 2)
    }

    /// Single-key lookup returning the output column at 1-based role
    /// position `ordinal` (position 1 is the key itself).
    pub fn choose(&self, query: f64, ordinal: usize) -> CalcResult<Lookup> {
        if ordinal < 2 || ordinal > self.roles.len() {
            return Err(CalcError::invalid_input(
                "ordinal",
                ordinal.to_string(),
                format!("output position must be between 2 and {}", self.roles.len()),
            ));
        }
        let key_name = &self.table.columns()[self.roles[0]];
        self.resolve(0..self.table.len(), 0, ordinal - 1, query, Some((0.0, 0.0)), key_name)
            .map(|b| b.lookup)
    }

    /// Two-key lookup (e.g. diameter then rpm).
    ///
    /// Roles: `[first, second, value]`. Rows are grouped by the first key.
    /// When `first` is tabulated its group is used as is; otherwise the group
    /// of the next larger tabulated first key is used and the result is
    /// flagged for adjustment. The second key is then resolved exactly or by
    /// interpolation inside the group.
    pub fn two_key(&self, first: f64, second: f64) -> CalcResult<TwoKeyLookup> {
        self.expect_roles("two-key", 3)?;
        let first_name = &self.table.columns()[self.roles[0]];
        let second_name = &self.table.columns()[self.roles[1]];

        let mut group = None;
        for row in 0..self.table.len() {
            let k = self.num(row, 0)?;
            if k >= first {
                if row == 0 && k > first {
                    return Err(CalcError::out_of_range(
                        self.name(),
                        first_name,
                        first,
                        format!("below the first tabulated value {}", k),
                    ));
                }
                group = Some(k);
                break;
            }
        }
        let group = group.ok_or_else(|| {
            CalcError::out_of_range(self.name(), first_name, first, "above the last tabulated value")
        })?;

        let mut rows = Vec::new();
        for row in 0..self.table.len() {
            if self.num(row, 0)? == group {
                rows.push(row);
            }
        }
        let resolved = self.resolve(rows, 1, 2, second, None, second_name)?;

        Ok(TwoKeyLookup {
            lookup: resolved.lookup,
            needs_adjustment: group != first,
        })
    }

    fn range_band_bracket(&self, band_query: f64, key_query: f64) -> CalcResult<Bracketed> {
        self.expect_roles("range-band", 4)?;
        let low_name = &self.table.columns()[self.roles[0]];
        let key_name = &self.table.columns()[self.roles[2]];

        let mut rows = Vec::new();
        for row in 0..self.table.len() {
            let low = self.num(row, 0)?;
            let high = self.num(row, 1)?;
            if low <= band_query && band_query < high {
                rows.push(row);
            } else if low > band_query {
                if rows.is_empty() {
                    return Err(CalcError::out_of_range(
                        self.name(),
                        low_name,
                        band_query,
                        format!("below the first band starting at {}", low),
                    ));
                }
                break;
            }
        }
        if rows.is_empty() {
            return Err(CalcError::out_of_range(
                self.name(),
                low_name,
                band_query,
                "above the last tabulated band",
            ));
        }
        self.resolve(rows, 2, 3, key_query, None, key_name)
    }

    /// Half-open band lookup.
    ///
    /// Roles: `[low, high, key, value]`. The rows whose `[low, high)` band
    /// contains `band_query` are searched for `key_query`.
    pub fn range_band(&self, band_query: f64, key_query: f64) -> CalcResult<Lookup> {
        self.range_band_bracket(band_query, key_query).map(|b| b.lookup)
    }

    /// Like [`range_band`](Self::range_band), but a zero in either bracketing
    /// output marks a combination the catalogue does not cover.
    pub fn range_band_catalogued(&self, band_query: f64, key_query: f64) -> CalcResult<Lookup> {
        let bracket = self.range_band_bracket(band_query, key_query)?;
        if bracket.y_low == 0.0 || bracket.y_high == 0.0 {
            let key_name = &self.table.columns()[self.roles[2]];
            return Err(CalcError::out_of_range(
                self.name(),
                key_name,
                key_query,
                "combination not covered by the catalogue",
            ));
        }
        Ok(bracket.lookup)
    }

    /// Nearest commercial size within a group.
    ///
    /// Roles: `[group, size, name]`. An exact size returns that row;
    /// otherwise the relatively nearer of the two bracketing sizes wins, ties
    /// going to the larger.
    pub fn nearest_commercial(&self, group: &str, query: f64) -> CalcResult<CommercialMatch<'a>> {
        self.expect_roles("nearest-commercial", 3)?;
        let group_name = &self.table.columns()[self.roles[0]];
        let size_name = &self.table.columns()[self.roles[1]];

        let mut seen = false;
        let mut last: Option<(f64, &'a str)> = None;
        for row in 0..self.table.len() {
            if self.text(row, 0)? != group {
                continue;
            }
            seen = true;
            let size = self.num(row, 1)?;
            let name = self.text(row, 2)?;
            if size == query {
                return Ok(CommercialMatch { size, name, exact: true });
            }
            if size > query {
                let (last_size, last_name) = last.ok_or_else(|| {
                    CalcError::out_of_range(
                        self.name(),
                        size_name,
                        query,
                        format!("below the smallest {} size {}", group, size),
                    )
                })?;
                let chosen = if nearest(query, last_size, size) == size {
                    CommercialMatch { size, name, exact: false }
                } else {
                    CommercialMatch {
                        size: last_size,
                        name: last_name,
                        exact: false,
                    }
                };
                return Ok(chosen);
            }
            last = Some((size, name));
        }

        if !seen {
            return Err(CalcError::not_valid(
                group_name.as_str(),
                group,
                format!("no rows for this group in '{}'", self.name()),
            ));
        }
        Err(CalcError::out_of_range(
            self.name(),
            size_name,
            query,
            format!("above the largest {} size", group),
        ))
    }

    /// Exact match on text keys.
    ///
    /// Roles: `[text, ..., value]`; returns the value of the first row whose
    /// text cells equal `keys` in order.
    pub fn find_text(&self, keys: &[&str]) -> CalcResult<f64> {
        self.expect_roles("text", keys.len() + 1)?;
        'rows: for row in 0..self.table.len() {
            for (role, key) in keys.iter().enumerate() {
                if self.text(row, role)? != *key {
                    continue 'rows;
                }
            }
            return self.num(row, keys.len());
        }
        Err(CalcError::out_of_range(
            self.name(),
            &self.table.columns()[self.roles[0]],
            keys.join(" / "),
            "no matching row",
        ))
    }
}

impl TableSearch<'static> {
    /// Load a bundled table and bind its role columns.
    pub fn open(name: &str, roles: &[&str]) -> CalcResult<Self> {
        TableSearch::new(store::load(name)?, roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(source: &str) -> Table {
        let name = source
            .lines()
            .find_map(|l| l.strip_prefix("name = "))
            .map(|n| n.trim_matches('"').to_string())
            .unwrap();
        Table::parse(&name, source).unwrap()
    }

    const FACTORS: &str = r#"
name = "factors"
revision = 1
columns = ["factor", "arc", "fc"]
rows = [[0.0, 180.0, 1.0], [0.1, 174.0, 0.99], [0.2, 169.0, 0.97]]
"#;

    const BASIC: &str = r#"
name = "basic"
revision = 1
columns = ["diameter", "rpm", "power_b"]
rows = [
    [65.0, 200.0, 0.22], [65.0, 400.0, 0.3], [65.0, 950.0, 0.55],
    [70.0, 200.0, 0.23], [70.0, 400.0, 0.36], [70.0, 950.0, 0.68],
]
"#;

    const BANDS: &str = r#"
name = "bands"
revision = 1
columns = ["gr_low", "gr_high", "rpm", "power_a"]
rows = [
    [1.0, 1.02, 200.0, 0.0], [1.0, 1.02, 400.0, 0.0],
    [1.02, 1.05, 200.0, 0.01], [1.02, 1.05, 400.0, 0.03],
    [1.05, 2.0, 200.0, 0.0], [1.05, 2.0, 400.0, 0.04],
]
"#;

    const LENGTHS: &str = r#"
name = "lengths"
revision = 1
columns = ["profile", "length", "type"]
rows = [
    ["A", 695.0, "A-26"], ["A", 1100.0, "A-42"], ["A", 1200.0, "A-46"],
    ["3V", 635.0, "3V250"], ["3V", 675.0, "3V265"], ["3V", 710.0, "3V280"],
]
"#;

    #[test]
    fn test_exact_and_interpolated() {
        let t = table(FACTORS);
        let s = TableSearch::new(&t, &["factor", "fc"]).unwrap();
        assert_eq!(s.exact_or_interpolate(0.1).unwrap(), Lookup::exact(0.99));
        let mid = s.exact_or_interpolate(0.15).unwrap();
        assert_eq!(mid.resolution, Resolution::Interpolated);
        assert!((mid.value - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_single_key_out_of_range() {
        let t = table(FACTORS);
        let s = TableSearch::new(&t, &["factor", "fc"]).unwrap();
        assert!(matches!(s.exact_or_interpolate(0.25), Err(CalcError::OutOfRange { .. })));
        assert!(matches!(s.exact_or_interpolate(-0.1), Err(CalcError::OutOfRange { .. })));
    }

    #[test]
    fn test_choose_by_position() {
        let t = table(FACTORS);
        let s = TableSearch::new(&t, &["factor", "arc", "fc"]).unwrap();
        assert_eq!(s.choose(0.2, 2).unwrap().value, 169.0);
        assert_eq!(s.choose(0.2, 3).unwrap().value, 0.97);
        assert!(s.choose(0.2, 1).is_err());
        assert!(s.choose(0.2, 4).is_err());
    }

    #[test]
    fn test_two_key_cases() {
        let t = table(BASIC);
        let s = TableSearch::new(&t, &["diameter", "rpm", "power_b"]).unwrap();

        let exact = s.two_key(65.0, 950.0).unwrap();
        assert_eq!(exact.lookup, Lookup::exact(0.55));
        assert!(exact.lookup.is_exact());
        assert!(!exact.needs_adjustment);

        let between = s.two_key(65.0, 300.0).unwrap();
        assert!(!between.lookup.is_exact());
        assert!((between.lookup.value - 0.26).abs() < 1e-12);
        assert!(!between.needs_adjustment);

        let oversized = s.two_key(68.0, 400.0).unwrap();
        assert_eq!(oversized.lookup.value, 0.36);
        assert!(oversized.needs_adjustment);
    }

    #[test]
    fn test_two_key_out_of_range() {
        let t = table(BASIC);
        let s = TableSearch::new(&t, &["diameter", "rpm", "power_b"]).unwrap();
        assert!(s.two_key(64.0, 400.0).is_err());
        assert!(s.two_key(71.0, 400.0).is_err());
        assert!(s.two_key(65.0, 100.0).is_err());
        assert!(s.two_key(65.0, 1000.0).is_err());
    }

    #[test]
    fn test_range_band() {
        let t = table(BANDS);
        let s = TableSearch::new(&t, &["gr_low", "gr_high", "rpm", "power_a"]).unwrap();
        assert_eq!(s.range_band(1.0, 200.0).unwrap().value, 0.0);
        assert_eq!(s.range_band(1.02, 400.0).unwrap().value, 0.03);
        let mid = s.range_band(1.03, 300.0).unwrap();
        assert!((mid.value - 0.02).abs() < 1e-12);
        assert!(s.range_band(0.99, 300.0).is_err());
        assert!(s.range_band(2.0, 300.0).is_err());
        assert!(s.range_band(1.03, 500.0).is_err());
        assert!(s.range_band(1.03, 100.0).is_err());
    }

    #[test]
    fn test_range_band_catalogued_rejects_zero_marker() {
        let t = table(BANDS);
        let s = TableSearch::new(&t, &["gr_low", "gr_high", "rpm", "power_a"]).unwrap();
        assert!(s.range_band_catalogued(1.5, 300.0).is_err());
        assert_eq!(s.range_band_catalogued(1.5, 400.0).unwrap().value, 0.04);
    }

    #[test]
    fn test_nearest_commercial() {
        let t = table(LENGTHS);
        let s = TableSearch::new(&t, &["profile", "length", "type"]).unwrap();

        let exact = s.nearest_commercial("3V", 675.0).unwrap();
        assert_eq!((exact.size, exact.name, exact.exact), (675.0, "3V265", true));

        let below = s.nearest_commercial("3V", 680.0).unwrap();
        assert_eq!((below.size, below.name), (675.0, "3V265"));

        let above = s.nearest_commercial("A", 1177.2).unwrap();
        assert_eq!((above.size, above.name), (1200.0, "A-46"));
    }

    #[test]
    fn test_nearest_commercial_bounds() {
        let t = table(LENGTHS);
        let s = TableSearch::new(&t, &["profile", "length", "type"]).unwrap();
        assert!(matches!(s.nearest_commercial("3V", 600.0), Err(CalcError::OutOfRange { .. })));
        assert!(matches!(s.nearest_commercial("3V", 720.0), Err(CalcError::OutOfRange { .. })));
        assert!(matches!(s.nearest_commercial("5V", 720.0), Err(CalcError::NotValid { .. })));
    }

    #[test]
    fn test_find_text() {
        let t = table(LENGTHS);
        let s = TableSearch::new(&t, &["profile", "type", "length"]).unwrap();
        assert_eq!(s.find_text(&["A", "A-42"]).unwrap(), 1100.0);
        assert!(s.find_text(&["A", "A-43"]).is_err());
    }

    #[test]
    fn test_unknown_role_column() {
        let t = table(FACTORS);
        assert!(TableSearch::new(&t, &["factor", "nope"]).is_err());
    }
}
