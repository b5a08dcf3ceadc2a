// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart view engine.
//!
//! [`ChartView`] orchestrates everything: it derives the drawing geometry
//! from the view rectangle, rebuilds the valid-row index and totals when the
//! data source changes, drives the chart-kind strategy to regenerate scene
//! items, keeps the legend list and selection in sync, and round-trips the
//! whole visual state through the `<GobChart>` XML document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gobcharts_scene::{ItemId, LineStyle, Scene};
use gobcharts_table::{CellIndex, ChartTable, Column, SelectionModel, TableEvent};
use gobcharts_text::{HeuristicTextMeasurer, TextMeasurer, TextStyle};
use kurbo::{Point, Rect};
use peniko::Color;
use tracing::debug;

use crate::bar::BarChart;
use crate::colours::ColourCycler;
use crate::fit_label::{AutoFitLabel, HAlign, Orientation};
use crate::graph_items::GraphItemRegistry;
use crate::grid::GridLines;
use crate::line::LineChart;
use crate::pie::PieChart;
use crate::state::{
    self, ChartState, DataItem, GridState, RangeState, StateError, ToolsState, ViewState,
};
use crate::valid_rows::{AggregateTotals, ValidRowIndex};
use crate::variant::{ChartKind, ChartVariant, LegendEntry, VariantCtx};

// Percentages used for header and label text positioning.
//
// PERC_HEADER_SPACE + PERC_HEADER_TOP <= 1.0
const PERC_HEADER_SPACE: f64 = 0.7; // of total Y margin
const PERC_HEADER_TOP: f64 = 0.2; // from the top of the scene

// PERC_XLABEL_SPACE + (1.0 - PERC_XLABEL_BOTTOM) <= 1.0
const PERC_XLABEL_SPACE: f64 = 0.7; // of total Y margin
const PERC_XLABEL_BOTTOM: f64 = 0.8; // from the bottom of the scene

// PERC_YLABEL_SPACE + PERC_YLABEL_LEFT <= 1.0
const PERC_YLABEL_SPACE: f64 = 0.7; // of total X margin
const PERC_YLABEL_LEFT: f64 = 0.2; // from the left-hand side of the scene

const LEFT_RIGHT_MARGIN_PERC: f64 = 0.15; // of total width
const TOP_BOTTOM_MARGIN_PERC: f64 = 0.15; // of total height

/// Id namespace for the three label items.
const LABEL_ID_BASE: u64 = 4 << 32;

/// A shared handle to the external data source.
pub type SharedTable = Rc<RefCell<ChartTable>>;
/// A shared handle to the external selection model.
pub type SharedSelection = Rc<RefCell<SelectionModel>>;

/// The three logical labels of a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    /// The chart header above the plot.
    Header,
    /// The x-axis label below the plot.
    XLabel,
    /// The y-axis label left of the plot.
    YLabel,
}

/// A label's full style, as exchanged with the surrounding widget layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDetails {
    /// Text content.
    pub text: String,
    /// Font.
    pub font: TextStyle,
    /// Text colour.
    pub colour: Color,
    /// Horizontal alignment.
    pub alignment: HAlign,
}

/// The optional value filter limiting which rows are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AllowedRange {
    /// Draw every valid row.
    #[default]
    Total,
    /// Draw only rows whose value lies within `[lower, upper]`.
    Bounded {
        /// Lowest allowed value.
        lower: f64,
        /// Highest allowed value.
        upper: f64,
    },
}

impl AllowedRange {
    /// Returns whether `value` passes the filter.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::Total => true,
            Self::Bounded { lower, upper } => value >= lower && value <= upper,
        }
    }
}

/// Keyboard input forwarded to the selected label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// A typed character.
    Char(char),
    /// Delete the last character.
    Backspace,
}

/// The outcome of a pointer selection, for the host to mirror outward
/// (e.g. highlighting the matching legend row).
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionOutcome {
    /// Exactly one registered item was hit.
    Selected {
        /// The data row of the hit item.
        row: usize,
        /// The item's legend text.
        legend_text: String,
    },
    /// Zero or several items were hit; the selection was cleared.
    Cleared,
}

fn create_variant(kind: ChartKind) -> Box<dyn ChartVariant> {
    match kind {
        ChartKind::Bar => Box::new(BarChart),
        ChartKind::Pie => Box::new(PieChart),
        ChartKind::Line => Box::new(LineChart),
    }
}

/// A chart of one fixed kind bound to an external data source.
///
/// Changing the kind means destroying the view and creating a new one; the
/// persisted [`ChartState`] carries the kind tag so a host can recreate the
/// right view before restoring.
pub struct ChartView {
    kind: ChartKind,
    variant: Box<dyn ChartVariant>,
    scene: Scene,
    measurer: Box<dyn TextMeasurer>,
    header: AutoFitLabel,
    x_label: AutoFitLabel,
    y_label: AutoFitLabel,
    grid: GridLines,
    items: GraphItemRegistry,
    valid: ValidRowIndex,
    totals: AggregateTotals,
    palette: ColourCycler,
    legend: Vec<LegendEntry>,
    model: Option<SharedTable>,
    selection: Option<SharedSelection>,
    selected_label: Option<LabelKind>,
    selected_legend: String,
    view_rect: Rect,
    inner_rect: Rect,
    range: AllowedRange,
    fixed_colour: Option<Color>,
    grid_colour: Option<Color>,
    // High-water row count over the scans performed so far.
    max_row: usize,
    // Suppresses model-change recomputes during a bulk state restore.
    loading: bool,
}

impl ChartView {
    /// Creates a view of the given kind with the default heuristic text
    /// measurer and no data source.
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        let mut view = Self {
            kind,
            variant: create_variant(kind),
            scene: Scene::new(),
            measurer: Box::new(HeuristicTextMeasurer),
            header: AutoFitLabel::new(
                ItemId::from_raw(LABEL_ID_BASE),
                Orientation::Horizontal,
            ),
            x_label: AutoFitLabel::new(
                ItemId::from_raw(LABEL_ID_BASE + 1),
                Orientation::Horizontal,
            ),
            y_label: AutoFitLabel::new(
                ItemId::from_raw(LABEL_ID_BASE + 2),
                Orientation::Vertical,
            ),
            grid: GridLines::new(),
            items: GraphItemRegistry::new(),
            valid: ValidRowIndex::new(),
            totals: AggregateTotals::default(),
            palette: ColourCycler::new(),
            legend: Vec::new(),
            model: None,
            selection: None,
            selected_label: None,
            selected_legend: String::new(),
            view_rect: Rect::ZERO,
            inner_rect: Rect::ZERO,
            range: AllowedRange::Total,
            fixed_colour: None,
            grid_colour: None,
            max_row: 0,
            loading: false,
        };
        view.calculate_geometries();
        view
    }

    /// Replaces the text measurer used for label fitting.
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.calculate_geometries();
    }

    /// Returns this view's chart kind.
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Binds the external data source and scans its full current extent.
    pub fn attach_model(&mut self, model: SharedTable) {
        let rows = model.borrow().row_count();
        self.model = Some(model);
        self.recompute_totals(rows);
    }

    /// Binds the external selection model.
    pub fn set_selection_model(&mut self, selection: SharedSelection) {
        self.selection = Some(selection);
    }

    /// Delivers a data-source change notification.
    ///
    /// Content changes recompute and redraw (unless a bulk restore is in
    /// progress); row insertions and removals only recompute, since a
    /// content change follows once the new rows are filled in.
    pub fn model_event(&mut self, event: TableEvent) {
        match event {
            TableEvent::DataChanged { last_row, .. } => {
                if self.loading {
                    return;
                }
                let end = (last_row + 1).max(self.max_row);
                self.recompute_totals(end);
                self.redraw();
            }
            TableEvent::RowsInserted { last_row, .. } => {
                let end = (last_row + 1).max(self.max_row);
                self.recompute_totals(end);
            }
            TableEvent::RowsAboutToBeRemoved {
                first_row,
                last_row,
            } => {
                let end = (last_row + 1).max(self.max_row) - (last_row - first_row);
                self.recompute_totals(end);
            }
        }
    }

    fn recompute_totals(&mut self, end: usize) {
        let Some(model) = &self.model else {
            return;
        };
        self.totals = self.valid.rebuild(&model.borrow(), end);
        self.max_row = end;
    }

    /// Sets the view rectangle (e.g. from a resize) and redraws.
    pub fn set_view_rect(&mut self, rect: Rect) {
        self.view_rect = rect;
        self.calculate_geometries();
        self.redraw();
    }

    /// Returns the current inner drawing rectangle.
    #[must_use]
    pub fn inner_rect(&self) -> Rect {
        self.inner_rect
    }

    /// Fully rebuilds the scene from the current state.
    ///
    /// This is never incremental: all chart items are destroyed and
    /// regenerated, and the legend list is rebuilt in row scan order.
    pub fn redraw(&mut self) {
        if self.model.is_none() {
            debug!("no valid data model set");
            return;
        }

        self.calculate_geometries();

        self.items.detach_from_scene(&mut self.scene);
        self.items.delete_all(&mut self.scene);

        if self.variant.needs_grid() {
            self.grid.remove_from_scene(&mut self.scene);
            self.grid.construct_grid();
            self.grid.add_to_scene(&mut self.scene);
        }

        self.palette.reset();
        self.legend.clear();

        let mut ctx = VariantCtx {
            registry: &mut self.items,
            legend: &mut self.legend,
            palette: &mut self.palette,
            fixed_colour: self.fixed_colour,
            inner_rect: self.inner_rect,
            grid_width: self.grid.grid_width(),
            totals: self.totals,
            range: self.range,
            rows: &self.valid,
        };
        self.variant.generate(&mut ctx);

        self.items.attach_to_scene(&mut self.scene);
    }

    // Calculates all the chart's dimensions and allowed areas.
    fn calculate_geometries(&mut self) {
        let rect = self.view_rect;
        let lr_margin = rect.width() * LEFT_RIGHT_MARGIN_PERC;
        let tb_margin = rect.height() * TOP_BOTTOM_MARGIN_PERC;

        self.inner_rect = Rect::new(
            rect.x0 + lr_margin,
            rect.y0 + tb_margin,
            rect.x1 - lr_margin,
            rect.y1 - tb_margin,
        );
        self.grid.set_rect(self.inner_rect);

        let inner = self.inner_rect;
        let header_rect = Rect::new(
            inner.x0,
            rect.y0 + tb_margin * PERC_HEADER_TOP,
            inner.x1,
            rect.y0 + tb_margin * (PERC_HEADER_TOP + PERC_HEADER_SPACE),
        );
        let x_label_rect = Rect::new(
            inner.x0,
            rect.y1 - tb_margin * PERC_XLABEL_BOTTOM,
            inner.x1,
            rect.y1 - tb_margin * (PERC_XLABEL_BOTTOM - PERC_XLABEL_SPACE),
        );
        let y_label_rect = Rect::new(
            rect.x0 + lr_margin * PERC_YLABEL_LEFT,
            inner.y0,
            rect.x0 + lr_margin * (PERC_YLABEL_LEFT + PERC_YLABEL_SPACE),
            inner.y1,
        );

        self.header.set_bounds(header_rect, self.measurer.as_ref());
        self.x_label.set_bounds(x_label_rect, self.measurer.as_ref());
        self.y_label.set_bounds(y_label_rect, self.measurer.as_ref());
        self.header.sync(&mut self.scene);
        self.x_label.sync(&mut self.scene);
        self.y_label.sync(&mut self.scene);
    }

    fn label(&self, kind: LabelKind) -> &AutoFitLabel {
        match kind {
            LabelKind::Header => &self.header,
            LabelKind::XLabel => &self.x_label,
            LabelKind::YLabel => &self.y_label,
        }
    }

    /// Sets a label's full style. The font's point size becomes the label's
    /// new maximum; the fitted size may end up smaller.
    pub fn set_label(
        &mut self,
        kind: LabelKind,
        text: impl Into<String>,
        font: TextStyle,
        colour: Color,
        alignment: HAlign,
    ) {
        let measurer: &dyn TextMeasurer = self.measurer.as_ref();
        let label = match kind {
            LabelKind::Header => &mut self.header,
            LabelKind::XLabel => &mut self.x_label,
            LabelKind::YLabel => &mut self.y_label,
        };
        label.set_text(text, measurer);
        label.set_max_font(font, measurer);
        label.set_alignment(alignment);
        label.set_colour(colour);
        label.sync(&mut self.scene);
    }

    /// Returns a label's style, remembers it as the selected label for
    /// subsequent [`key_input`](Self::key_input), and moves keyboard focus
    /// to its scene item.
    pub fn request_label(&mut self, kind: LabelKind) -> LabelDetails {
        self.selected_label = Some(kind);
        let id = self.label(kind).item_id();
        self.scene.set_focus(Some(id));
        let label = self.label(kind);
        LabelDetails {
            text: label.text().to_owned(),
            font: label.font().clone(),
            colour: label.colour(),
            alignment: label.alignment(),
        }
    }

    /// Forgets the selected label (e.g. after a pointer press elsewhere).
    pub fn clear_label_selection(&mut self) {
        self.selected_label = None;
        self.scene.set_focus(None);
    }

    /// Forwards keyboard input to the selected label, if any.
    pub fn key_input(&mut self, input: KeyInput) {
        let Some(kind) = self.selected_label else {
            return;
        };
        let measurer: &dyn TextMeasurer = self.measurer.as_ref();
        let label = match kind {
            LabelKind::Header => &mut self.header,
            LabelKind::XLabel => &mut self.x_label,
            LabelKind::YLabel => &mut self.y_label,
        };
        match input {
            KeyInput::Char(ch) => label.append_input(ch, measurer),
            KeyInput::Backspace => label.backspace(measurer),
        }
        label.sync(&mut self.scene);
    }

    /// Installs the value filter and redraws.
    pub fn set_allowed_range(&mut self, lower: f64, upper: f64) {
        self.range = AllowedRange::Bounded { lower, upper };
        self.redraw();
    }

    /// Clears the value filter and redraws.
    pub fn show_total_range(&mut self) {
        self.range = AllowedRange::Total;
        self.redraw();
    }

    /// Returns whether `value` passes the installed filter.
    #[must_use]
    pub fn is_within_allowed_range(&self, value: f64) -> bool {
        self.range.contains(value)
    }

    /// Fixes all generated items to a single colour and redraws.
    pub fn set_fixed_colour(&mut self, colour: Color) {
        self.fixed_colour = Some(colour);
        self.redraw();
    }

    /// Re-enables palette cycling and redraws.
    pub fn use_random_colours(&mut self) {
        self.fixed_colour = None;
        self.redraw();
    }

    /// Returns the fixed colour, when fixed-colour mode is on.
    #[must_use]
    pub fn fixed_colour(&self) -> Option<Color> {
        self.fixed_colour
    }

    /// Sets the grid line style and redraws.
    pub fn set_grid_line_style(&mut self, style: LineStyle) {
        self.grid.set_line_style(style);
        self.redraw();
    }

    /// Turns horizontal grid lines on or off and redraws.
    pub fn set_horizontal_grid_lines(&mut self, on: bool, count: u32) {
        self.grid.set_horizontal_lines(on, count);
        self.redraw();
    }

    /// Turns vertical grid lines on or off and redraws.
    pub fn set_vertical_grid_lines(&mut self, on: bool, count: u32) {
        self.grid.set_vertical_lines(on, count);
        self.redraw();
    }

    /// Sets the grid line colour and redraws.
    pub fn set_grid_colour(&mut self, colour: Color) {
        self.grid_colour = Some(colour);
        self.grid.set_colour(colour);
        self.redraw();
    }

    /// Pixels of unused headroom reclaimable at value fraction `perc`.
    ///
    /// The maximum value determines the free space at the top of the chart
    /// that no category will enter; stripping it maximises the visual fill.
    #[must_use]
    pub fn strip_space(&self, perc: f64) -> f64 {
        if self.totals.total > 0.0 && self.totals.max > 0.0 {
            let max_frac = self.totals.max / self.totals.total;
            let free_height = self.inner_rect.height()
                - (max_frac + crate::variant::STRIPSPACE_OFFSET) * self.inner_rect.height();
            (perc / max_frac) * free_height
        } else {
            0.0
        }
    }

    /// Resolves a pointer press to a selection.
    ///
    /// Exactly one registered item under the point selects its row; zero or
    /// multiple hits are ambiguous and clear the highlight instead, keeping
    /// any previously remembered legend selection in the selection model.
    pub fn select_at(&mut self, point: Point) -> SelectionOutcome {
        self.selected_label = None;
        let hits = self.scene.items_at(point);

        if hits.len() == 1
            && let Some(row) = self.items.row_for_item(hits[0])
        {
            let legend_text = self
                .items
                .legend_for_item(hits[0])
                .unwrap_or_default()
                .to_owned();
            self.selected_legend = legend_text.clone();
            self.items.set_highlighted(&mut self.scene, row);
            self.apply_selection(row);
            return SelectionOutcome::Selected { row, legend_text };
        }

        self.items.clear_highlight(&mut self.scene);
        if let Some(row) = self.items.row_for_legend(&self.selected_legend) {
            self.apply_selection(row);
        } else if let Some(selection) = &self.selection {
            selection.borrow_mut().clear();
        }
        SelectionOutcome::Cleared
    }

    fn apply_selection(&self, row: usize) {
        let Some(selection) = &self.selection else {
            debug!("no selection model associated with this view");
            return;
        };
        let mut selection = selection.borrow_mut();
        let value_col = Column::Value.index();
        selection.set_current(Some(CellIndex::new(row, value_col)));
        selection.select_range(row, row, value_col, value_col);
    }

    /// Handles a legend row being picked in the external legend widget.
    ///
    /// Returns the resolved data row, if the text maps to one.
    pub fn legend_item_selected(&mut self, text: &str) -> Option<usize> {
        self.selected_legend = text.to_owned();
        let row = self.items.row_for_legend(text)?;
        self.items.set_highlighted(&mut self.scene, row);
        self.apply_selection(row);
        Some(row)
    }

    /// Returns the topmost registered data row under `point`, if any.
    #[must_use]
    pub fn index_at(&self, point: Point) -> Option<usize> {
        self.scene
            .items_at(point)
            .first()
            .and_then(|id| self.items.row_for_item(*id))
    }

    /// Returns a 1×1 rectangle at the centre of the row's item, if drawn.
    #[must_use]
    pub fn visual_rect(&self, row: usize) -> Option<Rect> {
        self.items.item_rect(&self.scene, row)
    }

    /// Returns the legend entries of the last redraw, in row scan order.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Returns the scene holding this chart's items.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the number of valid rows.
    #[must_use]
    pub fn valid_row_count(&self) -> usize {
        self.valid.len()
    }

    /// Returns the valid row identifiers in scan order.
    #[must_use]
    pub fn valid_rows(&self) -> &[usize] {
        self.valid.rows()
    }

    /// Returns the category for a valid row (see [`ValidRowIndex::category`]).
    #[must_use]
    pub fn category(&self, row: usize) -> &str {
        self.valid.category(row)
    }

    /// Returns the value for a valid row (see [`ValidRowIndex::value`]).
    #[must_use]
    pub fn value(&self, row: usize) -> f64 {
        self.valid.value(row)
    }

    /// Returns the sum of all valid values.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.totals.total
    }

    /// Returns the largest single valid value.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.totals.max
    }

    // -----------------------------------------------------------------------
    // State round-trip

    /// Captures the current visual state as a typed document.
    #[must_use]
    pub fn capture_state(&self, include_data: bool) -> ChartState {
        let data = include_data.then(|| {
            self.valid
                .rows()
                .iter()
                .map(|&row| DataItem {
                    category: self.valid.category(row).to_owned(),
                    value: self.valid.value(row).to_string(),
                })
                .collect()
        });

        let (vertical, vertical_lines) = self.grid.vertical_lines();
        let (horizontal, horizontal_lines) = self.grid.horizontal_lines();
        let range = match self.range {
            AllowedRange::Total => RangeState::default(),
            AllowedRange::Bounded { lower, upper } => RangeState {
                total: false,
                lower,
                upper,
            },
        };

        ChartState {
            view: ViewState {
                header: Some(self.header.state()),
                y_label: Some(self.y_label.state()),
                x_label: Some(self.x_label.state()),
                chart_type: self.kind,
            },
            data,
            tools: Some(ToolsState {
                chart_colour: self.fixed_colour,
                range,
                grid: GridState {
                    colour: self.grid_colour,
                    vertical,
                    vertical_lines,
                    horizontal,
                    horizontal_lines,
                    style: self.grid.line_style(),
                },
            }),
        }
    }

    /// Serializes the current visual state as a `<GobChart>` XML document.
    #[must_use]
    pub fn state_xml(&self, include_data: bool) -> String {
        state::write(&self.capture_state(include_data))
    }

    /// Restores labels, tool settings and (optionally) data from a state
    /// document, then redraws once.
    ///
    /// The data replacement runs inside the loading latch so the change
    /// notifications it would cause cannot trigger recursive recomputes.
    /// Absent sections leave the corresponding state untouched, with a
    /// diagnostic.
    pub fn restore_state(&mut self, chart_state: &ChartState, include_data: bool) {
        let measurer: &dyn TextMeasurer = self.measurer.as_ref();
        match &chart_state.view.header {
            Some(label) => self.header.apply_state(label, measurer),
            None => debug!("header node is invalid or missing"),
        }
        match &chart_state.view.y_label {
            Some(label) => self.y_label.apply_state(label, measurer),
            None => debug!("y label node is invalid or missing"),
        }
        match &chart_state.view.x_label {
            Some(label) => self.x_label.apply_state(label, measurer),
            None => debug!("x label node is invalid or missing"),
        }

        // Chart kinds without a grid (pie) have no axes, so their axis
        // labels make no sense either.
        let axis_labels_visible = self.variant.needs_grid();
        self.x_label.set_visible(axis_labels_visible);
        self.y_label.set_visible(axis_labels_visible);
        self.header.sync(&mut self.scene);
        self.x_label.sync(&mut self.scene);
        self.y_label.sync(&mut self.scene);

        if let Some(tools) = &chart_state.tools {
            self.fixed_colour = tools.chart_colour;
            self.range = if tools.range.total {
                AllowedRange::Total
            } else {
                AllowedRange::Bounded {
                    lower: tools.range.lower,
                    upper: tools.range.upper,
                }
            };
            self.grid_colour = tools.grid.colour;
            if let Some(colour) = tools.grid.colour {
                self.grid.set_colour(colour);
            }
            self.grid
                .set_vertical_lines(tools.grid.vertical, tools.grid.vertical_lines);
            self.grid
                .set_horizontal_lines(tools.grid.horizontal, tools.grid.horizontal_lines);
            self.grid.set_line_style(tools.grid.style);
        }

        if include_data {
            match (&self.model, &chart_state.data) {
                (None, _) => debug!("no data model associated with this view"),
                (Some(_), None) => debug!("data node is invalid or missing"),
                (Some(model), Some(items)) => {
                    self.loading = true;
                    {
                        let mut table = model.borrow_mut();
                        for row in 0..table.row_count() {
                            table.set_text(row, Column::Category, "");
                            table.set_text(row, Column::Value, "");
                        }
                        for (row, item) in items.iter().enumerate() {
                            table.set_text(row, Column::Category, item.category.clone());
                            table.set_text(row, Column::Value, item.value.clone());
                        }
                    }
                    self.loading = false;
                    let written = items.len();
                    self.recompute_totals(written);
                }
            }
        }

        self.redraw();
    }

    /// Parses and restores a `<GobChart>` XML document.
    pub fn restore_from_xml(&mut self, xml: &str, include_data: bool) -> Result<(), StateError> {
        let chart_state = state::parse(xml)?;
        if chart_state.view.chart_type != self.kind {
            debug!(
                "restoring a {:?} document into a {:?} view",
                chart_state.view.chart_type, self.kind
            );
        }
        self.restore_state(&chart_state, include_data);
        Ok(())
    }
}

impl fmt::Debug for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartView")
            .field("kind", &self.kind)
            .field("view_rect", &self.view_rect)
            .field("valid_rows", &self.valid.len())
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
