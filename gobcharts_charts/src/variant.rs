// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart-kind strategy seam.
//!
//! Each supported chart kind implements [`ChartVariant`]: a pure layout
//! algorithm that turns the valid, in-range rows into registered scene items.
//! The view owns the strategy object and drives it once per redraw pass with
//! a fresh [`VariantCtx`].

use gobcharts_scene::Item;
use peniko::Color;

use crate::colours::ColourCycler;
use crate::graph_items::GraphItemRegistry;
use crate::valid_rows::{AggregateTotals, ValidRowIndex};
use crate::view::AllowedRange;
use kurbo::Rect;

/// Fraction of the inner height kept free above the tallest item when
/// stripping unused headroom. Chosen for the resulting cosmetic appearance.
pub(crate) const STRIPSPACE_OFFSET: f64 = 0.05;

/// The supported chart kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Equal-width vertical bars.
    Bar,
    /// A segmented pie.
    Pie,
    /// Connected value points.
    Line,
}

impl ChartKind {
    /// Returns the stable integer tag used in persisted state.
    #[must_use]
    pub const fn type_tag(self) -> i32 {
        match self {
            Self::Bar => 0,
            Self::Pie => 1,
            Self::Line => 2,
        }
    }

    /// Resolves a persisted integer tag back to a kind.
    #[must_use]
    pub const fn from_type_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::Bar),
            1 => Some(Self::Pie),
            2 => Some(Self::Line),
            _ => None,
        }
    }
}

/// One legend row: a colour swatch plus its `"{category} - {value}"` text.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// The swatch colour (the item's fill colour).
    pub colour: Color,
    /// The legend label.
    pub text: String,
}

/// Everything a strategy needs for one generation pass.
#[derive(Debug)]
pub struct VariantCtx<'a> {
    /// Registry receiving the generated items.
    pub registry: &'a mut GraphItemRegistry,
    /// Legend list rebuilt by this pass, in row scan order.
    pub legend: &'a mut Vec<LegendEntry>,
    /// The palette cycler, already reset for this pass.
    pub palette: &'a mut ColourCycler,
    /// Fixed colour override; `None` cycles the palette.
    pub fixed_colour: Option<Color>,
    /// The inner drawing rectangle.
    pub inner_rect: Rect,
    /// Current grid width, the horizontal space items divide up.
    pub grid_width: f64,
    /// Totals over the valid rows.
    pub totals: AggregateTotals,
    /// The installed value filter.
    pub range: AllowedRange,
    /// The valid rows to draw.
    pub rows: &'a ValidRowIndex,
}

impl VariantCtx<'_> {
    /// Returns the colour for the next drawn item.
    pub fn colour(&mut self) -> Color {
        match self.fixed_colour {
            Some(colour) => colour,
            None => self.palette.next(),
        }
    }

    /// Advances the palette for a row that is filtered out, so the chart's
    /// look doesn't change when the user toggles between restricted and full
    /// ranges.
    pub fn skip_colour(&mut self) {
        self.palette.next();
    }

    /// Returns `value` as a fraction of the total (0 when the total is 0).
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        if self.totals.total > 0.0 {
            value / self.totals.total
        } else {
            0.0
        }
    }

    /// Returns whether `value` passes the installed range filter.
    #[must_use]
    pub fn in_range(&self, value: f64) -> bool {
        self.range.contains(value)
    }

    /// Pixels of unused headroom reclaimable for an item at fraction `frac`.
    ///
    /// The tallest item leaves `1 - max/total - offset` of the inner height
    /// unused; stripping scales every item up so the tallest nearly touches
    /// the top of the inner rectangle. Degenerates to 0 without a total.
    #[must_use]
    pub fn strip_space(&self, frac: f64) -> f64 {
        if self.totals.total > 0.0 && self.totals.max > 0.0 {
            let max_frac = self.totals.max / self.totals.total;
            let free_height = self.inner_rect.height()
                - (max_frac + STRIPSPACE_OFFSET) * self.inner_rect.height();
            (frac / max_frac) * free_height
        } else {
            0.0
        }
    }

    /// Registers a generated item with its legend entry.
    pub fn push_item(&mut self, row: usize, item: Item, colour: Color, category: &str, value: f64) {
        let text = format!("{category} - {value}");
        self.legend.push(LegendEntry {
            colour,
            text: text.clone(),
        });
        self.registry.add_item(row, item, text);
    }
}

/// A chart-kind layout strategy.
pub trait ChartVariant {
    /// Generates one pass of scene items from the context's rows.
    fn generate(&self, ctx: &mut VariantCtx<'_>);

    /// Whether this kind draws an axis grid.
    fn needs_grid(&self) -> bool;

    /// The kind this strategy implements.
    fn kind(&self) -> ChartKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_round_trip() {
        for kind in [ChartKind::Bar, ChartKind::Pie, ChartKind::Line] {
            assert_eq!(ChartKind::from_type_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(ChartKind::from_type_tag(3), None);
        assert_eq!(ChartKind::from_type_tag(-1), None);
    }
}
