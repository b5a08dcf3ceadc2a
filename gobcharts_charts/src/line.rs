// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line chart generation.

use gobcharts_scene::{Item, LineStyle, ShapeKind, Stroke, z_order};
use kurbo::{Line, Point, Rect};
use peniko::color::palette::css;
use tracing::debug;

use crate::variant::{ChartKind, ChartVariant, VariantCtx};

/// Dot diameter in scene units.
const DOT_SIDE: f64 = 7.0;

/// Evenly spaced value dots joined by segments, one dot per valid in-range
/// row. The first drawn dot has no incoming segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineChart;

impl ChartVariant for LineChart {
    fn generate(&self, ctx: &mut VariantCtx<'_>) {
        if ctx.rows.is_empty() {
            debug!("line chart: no valid items");
            return;
        }

        let inner = ctx.inner_rect;
        let count = ctx.rows.len();
        let point_spacing = ctx.grid_width / count as f64;
        let rows: Vec<usize> = ctx.rows.rows().to_vec();
        let mut previous: Option<Point> = None;

        for (slot, row) in rows.into_iter().enumerate() {
            let category = ctx.rows.category(row).to_owned();
            let value = ctx.rows.value(row);

            if !ctx.in_range(value) {
                ctx.skip_colour();
                continue;
            }

            let fraction = ctx.fraction(value);
            let next = Point::new(
                inner.x0 + point_spacing * slot as f64 + point_spacing / 2.0,
                inner.y1 - ctx.strip_space(fraction) - inner.height() * fraction,
            );

            let colour = ctx.colour();
            // Later rows stack beneath earlier ones so overlapping dots stay
            // individually selectable.
            let stack = i32::try_from(count - slot).unwrap_or(i32::MAX);
            let dot = Item::new(ShapeKind::Segment {
                bounds: Rect::new(
                    next.x - DOT_SIDE / 2.0,
                    next.y - DOT_SIDE / 2.0,
                    next.x + DOT_SIDE / 2.0,
                    next.y + DOT_SIDE / 2.0,
                ),
                start_angle: 0,
                span_angle: 5760,
            })
            .with_fill(colour)
            .with_stroke(Stroke::solid(colour, 1.0))
            .with_z_index(z_order::SERIES_POINTS + stack);

            if let Some(previous) = previous {
                let segment = Item::new(ShapeKind::Line(Line::new(previous, next)))
                    .with_stroke(Stroke::solid(css::BLACK, 1.0).with_style(LineStyle::Dot))
                    .with_z_index(z_order::SERIES_STROKE);
                ctx.registry.add_companion(row, segment);
            }

            ctx.push_item(row, dot, colour, &category, value);
            previous = Some(next);
        }
    }

    fn needs_grid(&self) -> bool {
        true
    }

    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }
}
