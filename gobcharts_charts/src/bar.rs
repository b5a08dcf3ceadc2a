// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar chart generation.

use gobcharts_scene::{Item, ShapeKind, z_order};
use kurbo::Rect;
use peniko::Gradient;
use peniko::color::palette::css;
use tracing::debug;

use crate::variant::{ChartKind, ChartVariant, VariantCtx};

/// Gap between adjacent bars, in scene units.
const BAR_SPACING: f64 = 5.0;

/// Equal-width vertical bars, one per valid in-range row.
#[derive(Clone, Copy, Debug, Default)]
pub struct BarChart;

impl ChartVariant for BarChart {
    fn generate(&self, ctx: &mut VariantCtx<'_>) {
        if ctx.rows.is_empty() {
            debug!("bar chart: no valid items");
            return;
        }

        let inner = ctx.inner_rect;
        let bar_col_width = ctx.grid_width / ctx.rows.len() as f64;
        let rows: Vec<usize> = ctx.rows.rows().to_vec();

        for (slot, row) in rows.into_iter().enumerate() {
            let category = ctx.rows.category(row).to_owned();
            let value = ctx.rows.value(row);

            if !ctx.in_range(value) {
                ctx.skip_colour();
                continue;
            }

            let fraction = ctx.fraction(value);
            let left = inner.x0 + bar_col_width * slot as f64;
            let right = left + bar_col_width - BAR_SPACING;

            // A zero-height bar would be unselectable; keep at least a
            // one-pixel sliver so the selection model still has a target.
            let rect = if fraction < 0.01 {
                Rect::new(left, inner.y1 - 1.0, right, inner.y1)
            } else {
                let top = inner.y1 - ctx.strip_space(fraction) - fraction * inner.height();
                Rect::new(left, top, right, inner.y1)
            };

            let colour = ctx.colour();
            let fill = Gradient::new_linear((rect.x0, rect.y1), (rect.x1, rect.y0))
                .with_stops([(0.0, css::WHITE), (1.0, colour)]);
            let item = Item::new(ShapeKind::Rect(rect))
                .with_fill(fill)
                .with_z_index(z_order::SERIES_FILL);

            ctx.push_item(row, item, colour, &category, value);
        }
    }

    fn needs_grid(&self) -> bool {
        true
    }

    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }
}
