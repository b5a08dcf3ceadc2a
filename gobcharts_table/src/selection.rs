// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-range selection abstraction.

/// A `(row, column)` cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl CellIndex {
    /// Creates a cell index.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Current selection state shared between a chart view and its host.
///
/// Only a single rectangular range is supported; applying a new range
/// replaces the previous one (no additive multi-select).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionModel {
    current: Option<CellIndex>,
    range: Option<(CellIndex, CellIndex)>,
}

impl SelectionModel {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current (focus) cell, if any.
    #[must_use]
    pub fn current(&self) -> Option<CellIndex> {
        self.current
    }

    /// Sets the current (focus) cell without touching the selected range.
    pub fn set_current(&mut self, cell: Option<CellIndex>) {
        self.current = cell;
    }

    /// Returns the selected range as `(top_left, bottom_right)`, if any.
    #[must_use]
    pub fn range(&self) -> Option<(CellIndex, CellIndex)> {
        self.range
    }

    /// Replaces the selection with the given inclusive cell range.
    pub fn select_range(
        &mut self,
        first_row: usize,
        last_row: usize,
        first_column: usize,
        last_column: usize,
    ) {
        self.range = Some((
            CellIndex::new(first_row, first_column),
            CellIndex::new(last_row, last_column),
        ));
    }

    /// Clears both the range and the current cell.
    pub fn clear(&mut self) {
        self.current = None;
        self.range = None;
    }
}
