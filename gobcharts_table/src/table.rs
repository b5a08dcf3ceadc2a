// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-column text grid.

/// The fixed columns a chart understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// Category names (column 0).
    Category,
    /// Data values, as text (column 1).
    Value,
}

impl Column {
    /// Returns the column index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Category => 0,
            Self::Value => 1,
        }
    }
}

/// Change notifications produced by [`ChartTable`] mutators.
///
/// Each variant carries the affected row span, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableEvent {
    /// Cell contents changed within the given rows.
    DataChanged {
        /// First affected row.
        first_row: usize,
        /// Last affected row.
        last_row: usize,
    },
    /// Rows were inserted at the given span.
    RowsInserted {
        /// First inserted row.
        first_row: usize,
        /// Last inserted row.
        last_row: usize,
    },
    /// Rows are about to be removed from the given span.
    RowsAboutToBeRemoved {
        /// First row to remove.
        first_row: usize,
        /// Last row to remove.
        last_row: usize,
    },
}

#[derive(Clone, Debug, Default)]
struct Row {
    category: String,
    value: String,
}

/// An owned two-column (category, value) text grid.
///
/// Writes past the current row count grow the table with empty rows, so a
/// bulk restore can simply write row-by-row.
#[derive(Clone, Debug, Default)]
pub struct ChartTable {
    rows: Vec<Row>,
}

impl ChartTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the text stored at `(row, column)`, or `None` past the end.
    #[must_use]
    pub fn text(&self, row: usize, column: Column) -> Option<&str> {
        self.rows.get(row).map(|r| match column {
            Column::Category => r.category.as_str(),
            Column::Value => r.value.as_str(),
        })
    }

    /// Writes `text` at `(row, column)`, growing the table if needed.
    pub fn set_text(&mut self, row: usize, column: Column, text: impl Into<String>) -> TableEvent {
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Row::default);
        }
        let slot = &mut self.rows[row];
        match column {
            Column::Category => slot.category = text.into(),
            Column::Value => slot.value = text.into(),
        }
        TableEvent::DataChanged {
            first_row: row,
            last_row: row,
        }
    }

    /// Appends a row with the given category and value text.
    pub fn push_row(&mut self, category: impl Into<String>, value: impl Into<String>) -> TableEvent {
        self.rows.push(Row {
            category: category.into(),
            value: value.into(),
        });
        let row = self.rows.len() - 1;
        TableEvent::RowsInserted {
            first_row: row,
            last_row: row,
        }
    }

    /// Inserts `count` empty rows starting at `first_row`.
    pub fn insert_rows(&mut self, first_row: usize, count: usize) -> TableEvent {
        let at = first_row.min(self.rows.len());
        for i in 0..count {
            self.rows.insert(at + i, Row::default());
        }
        TableEvent::RowsInserted {
            first_row: at,
            last_row: at + count.saturating_sub(1),
        }
    }

    /// Removes the inclusive row span `[first_row, last_row]`.
    ///
    /// Returns the event the host should deliver **before** dropping any
    /// derived state, matching the "about to be removed" notification shape.
    pub fn remove_rows(&mut self, first_row: usize, last_row: usize) -> TableEvent {
        let last = last_row.min(self.rows.len().saturating_sub(1));
        if first_row <= last && !self.rows.is_empty() {
            self.rows.drain(first_row..=last);
        }
        TableEvent::RowsAboutToBeRemoved {
            first_row,
            last_row,
        }
    }

    /// Clears the text of every cell without changing the row count.
    pub fn clear_all_text(&mut self) -> TableEvent {
        let last = self.rows.len().saturating_sub(1);
        for row in &mut self.rows {
            row.category.clear();
            row.value.clear();
        }
        TableEvent::DataChanged {
            first_row: 0,
            last_row: last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_grows_the_table() {
        let mut table = ChartTable::new();
        table.set_text(2, Column::Category, "C");
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.text(2, Column::Category), Some("C"));
        assert_eq!(table.text(0, Column::Category), Some(""));
        assert_eq!(table.text(3, Column::Category), None);
    }

    #[test]
    fn events_carry_row_spans() {
        let mut table = ChartTable::new();
        table.push_row("A", "1");
        table.push_row("B", "2");
        assert_eq!(
            table.set_text(1, Column::Value, "3"),
            TableEvent::DataChanged {
                first_row: 1,
                last_row: 1
            }
        );
        assert_eq!(
            table.remove_rows(0, 0),
            TableEvent::RowsAboutToBeRemoved {
                first_row: 0,
                last_row: 0
            }
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.text(0, Column::Category), Some("B"));
    }

    #[test]
    fn clear_all_text_keeps_rows() {
        let mut table = ChartTable::new();
        table.push_row("A", "1");
        table.push_row("B", "2");
        table.clear_all_text();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.text(0, Column::Value), Some(""));
    }
}
