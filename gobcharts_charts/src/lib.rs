// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category/value chart building blocks for `gobcharts_scene`.
//!
//! This crate turns a two-column (category, value) data source into
//! positioned scene items (bars, pie segments or line points) inside a
//! bounded drawing region:
//! - **[`ChartView`]** orchestrates layout, data scanning, item generation,
//!   selection and state serialization.
//! - **Chart kinds** ([`BarChart`], [`PieChart`], [`LineChart`]) are
//!   strategies implementing the [`ChartVariant`] seam.
//! - **[`AutoFitLabel`]** grows or shrinks its font to best fill an assigned
//!   rectangle, for the header and axis labels.
//! - The full visual state round-trips through a `<GobChart>` XML document
//!   ([`parse_state`] / [`write_state`]).
//!
//! Text shaping, rendering and the surrounding widgetry (tool panel, legend
//! list, file dialogs) are out of scope; hosts observe the [`Scene`],
//! the legend entries and the selection model instead.
//!
//! [`Scene`]: gobcharts_scene::Scene

mod bar;
#[cfg(test)]
mod chart_tests;
mod colours;
mod fit_label;
mod graph_items;
mod grid;
mod line;
mod pie;
mod state;
mod valid_rows;
mod variant;
mod view;

pub use bar::BarChart;
pub use colours::ColourCycler;
pub use fit_label::{AutoFitLabel, HAlign, Orientation};
pub use graph_items::{GraphItemRegistry, companion_id, series_id};
pub use grid::GridLines;
pub use line::LineChart;
pub use pie::PieChart;
pub use state::{
    ChartState, DataItem, GridState, LabelState, RangeState, StateError, ToolsState, ViewState,
    parse as parse_state, write as write_state,
};
pub use valid_rows::{AggregateTotals, ValidRowIndex};
pub use variant::{ChartKind, ChartVariant, LegendEntry, VariantCtx};
pub use view::{
    AllowedRange, ChartView, KeyInput, LabelDetails, LabelKind, SelectionOutcome, SharedSelection,
    SharedTable,
};
