// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The filtered row index derived from the data source.

use gobcharts_table::{ChartTable, Column};
use hashbrown::HashMap;
use tracing::debug;

/// Sentinel category returned for rows that are not in the index.
const INVALID_ROW: &str = "Invalid Row";

/// Derived totals over the valid rows, recomputed with the index.
///
/// Invariant: `total >= max >= 0`; both are 0 when no valid rows exist.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AggregateTotals {
    /// Sum of all valid values.
    pub total: f64,
    /// Largest single valid value.
    pub max: f64,
}

/// The subset of source rows with at least one usable field.
///
/// A row is valid when its category or value cell is non-empty after
/// trimming; missing pieces are substituted with documented defaults. The
/// index is always rebuilt wholesale from a single forward scan, never
/// patched incrementally.
#[derive(Clone, Debug, Default)]
pub struct ValidRowIndex {
    rows: Vec<usize>,
    entries: HashMap<usize, (String, f64)>,
}

impl ValidRowIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the index and re-scans `table` rows `0..end`.
    ///
    /// For each row, the category defaults to `"Uncategorised"` when empty
    /// and the value to `0.0` when empty, non-numeric or negative; each
    /// substitution emits a diagnostic and the scan continues. A row where
    /// both cells are empty is skipped entirely. Returns the totals computed
    /// in the same pass.
    pub fn rebuild(&mut self, table: &ChartTable, end: usize) -> AggregateTotals {
        self.rows.clear();
        self.entries.clear();
        let mut totals = AggregateTotals::default();

        for row in 0..end {
            let cat = table.text(row, Column::Category).unwrap_or("").trim();
            let val = table.text(row, Column::Value).unwrap_or("").trim();

            if cat.is_empty() && val.is_empty() {
                continue;
            }

            let category = if cat.is_empty() {
                debug!("no category provided for row [{}]", row + 1);
                "Uncategorised".to_owned()
            } else {
                cat.to_owned()
            };

            let value = if val.is_empty() {
                debug!("no value provided for row [{}], defaulting to 0.0", row + 1);
                0.0
            } else {
                match val.parse::<f64>() {
                    Ok(v) if v.is_finite() => {
                        if v < 0.0 {
                            debug!("value for row [{}] is negative, defaulting to 0.0", row + 1);
                            0.0
                        } else {
                            v
                        }
                    }
                    _ => {
                        debug!("failed to convert the value of row [{}] to a number", row + 1);
                        0.0
                    }
                }
            };

            totals.total += value;
            totals.max = totals.max.max(value);
            self.rows.push(row);
            self.entries.insert(row, (category, value));
        }

        totals
    }

    /// Returns the valid row identifiers in scan order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Returns the category for `row`, or the `"Invalid Row"` sentinel.
    #[must_use]
    pub fn category(&self, row: usize) -> &str {
        self.entries
            .get(&row)
            .map_or(INVALID_ROW, |(category, _)| category.as_str())
    }

    /// Returns the value for `row`, or `0.0` for unknown rows.
    #[must_use]
    pub fn value(&self, row: usize) -> f64 {
        self.entries.get(&row).map_or(0.0, |(_, value)| *value)
    }

    /// Returns the number of valid rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when no valid rows exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> ChartTable {
        let mut t = ChartTable::new();
        for (cat, val) in rows {
            t.push_row(*cat, *val);
        }
        t
    }

    #[test]
    fn scan_applies_documented_defaults() {
        let t = table(&[("A", "10"), ("", "5"), ("B", "-3")]);
        let mut index = ValidRowIndex::new();
        let totals = index.rebuild(&t, t.row_count());

        assert_eq!(index.rows(), &[0, 1, 2]);
        assert_eq!(index.category(0), "A");
        assert_eq!(index.value(0), 10.0);
        assert_eq!(index.category(1), "Uncategorised");
        assert_eq!(index.value(1), 5.0);
        assert_eq!(index.category(2), "B");
        assert_eq!(index.value(2), 0.0, "negative values clamp to 0");
        assert_eq!(totals, AggregateTotals { total: 15.0, max: 10.0 });
    }

    #[test]
    fn fully_empty_rows_are_skipped() {
        let t = table(&[("", ""), ("A", "1"), ("  ", " ")]);
        let mut index = ValidRowIndex::new();
        index.rebuild(&t, t.row_count());
        assert_eq!(index.rows(), &[1]);
    }

    #[test]
    fn non_numeric_values_default_to_zero() {
        let t = table(&[("A", "ten"), ("B", "2.5")]);
        let mut index = ValidRowIndex::new();
        let totals = index.rebuild(&t, t.row_count());
        assert_eq!(index.value(0), 0.0);
        assert_eq!(index.value(1), 2.5);
        assert_eq!(totals.total, 2.5);
    }

    #[test]
    fn non_negative_values_round_trip_exactly() {
        let t = table(&[("A", "0"), ("B", "3.25"), ("C", "1e3")]);
        let mut index = ValidRowIndex::new();
        index.rebuild(&t, t.row_count());
        assert_eq!(index.value(0), 0.0);
        assert_eq!(index.value(1), 3.25);
        assert_eq!(index.value(2), 1000.0);
    }

    #[test]
    fn unknown_rows_return_sentinels() {
        let index = ValidRowIndex::new();
        assert_eq!(index.category(42), "Invalid Row");
        assert_eq!(index.value(42), 0.0);
        assert!(index.is_empty());
    }

    #[test]
    fn rebuild_discards_previous_state() {
        let mut index = ValidRowIndex::new();
        index.rebuild(&table(&[("A", "1"), ("B", "2")]), 2);
        assert_eq!(index.len(), 2);
        index.rebuild(&table(&[("C", "3")]), 1);
        assert_eq!(index.rows(), &[0]);
        assert_eq!(index.category(0), "C");
        assert_eq!(index.category(1), "Invalid Row");
    }
}
