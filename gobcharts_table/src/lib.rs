// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tabular data source and selection abstraction consumed by GobCharts.
//!
//! Charts read a fixed two-column grid: column 0 holds category names and
//! column 1 the corresponding values, both as text. The grid is owned by the
//! host application; the chart view observes it through [`TableEvent`]s,
//! which every mutating call returns so the host can forward them (the
//! explicit, synchronous stand-in for a signal/slot connection).

mod selection;
mod table;

pub use selection::{CellIndex, SelectionModel};
pub use table::{ChartTable, Column, TableEvent};
