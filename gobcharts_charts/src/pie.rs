// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie chart generation.

use gobcharts_scene::{Item, ShapeKind, z_order};
use kurbo::Rect;
use tracing::debug;

use crate::variant::{ChartKind, ChartVariant, VariantCtx};

/// Span angles are in sixteenths of a degree (360 * 16).
const FULL_ELLIPSE: f64 = 5760.0;

/// Consecutive wedges of a single ellipse, one per valid in-range row.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieChart;

impl ChartVariant for PieChart {
    fn generate(&self, ctx: &mut VariantCtx<'_>) {
        if ctx.rows.is_empty() {
            debug!("pie chart: no valid items");
            return;
        }

        let inner = ctx.inner_rect;
        let pie_rect = Rect::new(
            inner.x0,
            inner.y0,
            inner.x0 + ctx.grid_width,
            inner.y0 + inner.height(),
        );

        let mut last_stop_angle = 0_i32;
        let rows: Vec<usize> = ctx.rows.rows().to_vec();

        for row in rows {
            let category = ctx.rows.category(row).to_owned();
            let value = ctx.rows.value(row);

            if !ctx.in_range(value) {
                ctx.skip_colour();
                continue;
            }

            let fraction = ctx.fraction(value);
            let span = (fraction * FULL_ELLIPSE).round() as i32;

            let colour = ctx.colour();
            let item = Item::new(ShapeKind::Segment {
                bounds: pie_rect,
                start_angle: last_stop_angle,
                span_angle: span,
            })
            .with_fill(colour)
            .with_z_index(z_order::SERIES_FILL);

            ctx.push_item(row, item, colour, &category, value);
            last_stop_angle += span;
        }
    }

    fn needs_grid(&self) -> bool {
        false
    }

    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }
}
