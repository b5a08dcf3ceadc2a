// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and grid line construction.

use gobcharts_scene::{Item, ItemId, LineStyle, Scene, ShapeKind, Stroke, z_order};
use kurbo::{Line, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};

/// Distance line intercepts extend past the axis.
const EXTEND: f64 = 5.0;

/// Id namespace for grid and axis lines.
const GRID_ID_BASE: u64 = 3 << 32;

/// Builds the two axis lines and the configured grid lines for a rectangle.
///
/// The axes (left and bottom edge) are always built at a heavier stroke.
/// Vertical lines are spaced `width / count` apart starting one step in from
/// the left edge; horizontal lines are spaced `height / count` apart and
/// include the line overlapping the top edge, so `count` produces `count + 1`
/// of them. Construction always discards the previous lines wholesale.
#[derive(Debug)]
pub struct GridLines {
    rect: Rect,
    grid_stroke: Stroke,
    horizontal: bool,
    vertical: bool,
    horizontal_count: u32,
    vertical_count: u32,
    pending: Vec<Item>,
    attached: Vec<ItemId>,
}

impl GridLines {
    /// Creates a grid with no lines configured and a dotted black pen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rect: Rect::ZERO,
            grid_stroke: Stroke::solid(css::BLACK, 1.0).with_style(LineStyle::Dot),
            horizontal: false,
            vertical: false,
            horizontal_count: 0,
            vertical_count: 0,
            pending: Vec::new(),
            attached: Vec::new(),
        }
    }

    /// Assigns the rectangle the grid is confined to.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Returns the configured rectangle's width, used by chart variants for
    /// per-item spacing.
    #[must_use]
    pub fn grid_width(&self) -> f64 {
        self.rect.width()
    }

    /// Turns horizontal grid lines on or off and sets their count.
    pub fn set_horizontal_lines(&mut self, on: bool, count: u32) {
        self.horizontal = on;
        self.horizontal_count = count;
    }

    /// Turns vertical grid lines on or off and sets their count.
    pub fn set_vertical_lines(&mut self, on: bool, count: u32) {
        self.vertical = on;
        self.vertical_count = count;
    }

    /// Returns `(enabled, count)` for the horizontal grid lines.
    #[must_use]
    pub fn horizontal_lines(&self) -> (bool, u32) {
        (self.horizontal, self.horizontal_count)
    }

    /// Returns `(enabled, count)` for the vertical grid lines.
    #[must_use]
    pub fn vertical_lines(&self) -> (bool, u32) {
        (self.vertical, self.vertical_count)
    }

    /// Sets the grid line colour (the axes stay black).
    pub fn set_colour(&mut self, colour: Color) {
        self.grid_stroke.brush = colour.into();
    }

    /// Returns the grid line colour.
    #[must_use]
    pub fn colour(&self) -> Color {
        match &self.grid_stroke.brush {
            Brush::Solid(c) => *c,
            _ => css::BLACK,
        }
    }

    /// Sets the grid line style.
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.grid_stroke.style = style;
    }

    /// Returns the grid line style.
    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        self.grid_stroke.style
    }

    /// Discards the previous lines and constructs new ones from the current
    /// configuration.
    pub fn construct_grid(&mut self) {
        self.pending.clear();
        let r = self.rect;

        let axes_stroke = Stroke::solid(css::BLACK, 2.0);
        self.pending.push(
            Item::new(ShapeKind::Line(Line::new((r.x0, r.y1), (r.x1, r.y1))))
                .with_stroke(axes_stroke.clone())
                .with_z_index(z_order::AXIS_RULES),
        );
        self.pending.push(
            Item::new(ShapeKind::Line(Line::new((r.x0, r.y0), (r.x0, r.y1))))
                .with_stroke(axes_stroke)
                .with_z_index(z_order::AXIS_RULES),
        );

        if self.vertical && self.vertical_count > 0 {
            let spacing = r.width() / f64::from(self.vertical_count);
            for i in 1..=self.vertical_count {
                let x = r.x0 + f64::from(i) * spacing;
                self.pending.push(
                    Item::new(ShapeKind::Line(Line::new((x, r.y0), (x, r.y1 + EXTEND))))
                        .with_stroke(self.grid_stroke.clone())
                        .with_z_index(z_order::GRID_LINES),
                );
            }
        }

        if self.horizontal && self.horizontal_count > 0 {
            let spacing = r.height() / f64::from(self.horizontal_count);
            for i in 0..=self.horizontal_count {
                let y = r.y0 + f64::from(i) * spacing;
                self.pending.push(
                    Item::new(ShapeKind::Line(Line::new((r.x0 - EXTEND, y), (r.x1, y))))
                        .with_stroke(self.grid_stroke.clone())
                        .with_z_index(z_order::GRID_LINES),
                );
            }
        }
    }

    /// Moves the constructed lines into the scene.
    pub fn add_to_scene(&mut self, scene: &mut Scene) {
        for (i, item) in self.pending.drain(..).enumerate() {
            let id = ItemId::from_raw(GRID_ID_BASE + i as u64);
            scene.insert(id, item);
            self.attached.push(id);
        }
    }

    /// Removes this grid's lines from the scene and drops them.
    pub fn remove_from_scene(&mut self, scene: &mut Scene) {
        for id in self.attached.drain(..) {
            scene.remove(id);
        }
    }
}

impl Default for GridLines {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rect: Rect, vertical: (bool, u32), horizontal: (bool, u32)) -> GridLines {
        let mut grid = GridLines::new();
        grid.set_rect(rect);
        grid.set_vertical_lines(vertical.0, vertical.1);
        grid.set_horizontal_lines(horizontal.0, horizontal.1);
        grid.construct_grid();
        grid
    }

    #[test]
    fn axes_are_always_built() {
        let grid = grid_with(Rect::new(0.0, 0.0, 100.0, 50.0), (false, 4), (false, 4));
        assert_eq!(grid.pending.len(), 2, "only the two axis lines");
    }

    #[test]
    fn horizontal_lines_include_the_top_overlap() {
        let grid = grid_with(Rect::new(0.0, 0.0, 100.0, 50.0), (true, 4), (true, 4));
        // 2 axes + 4 vertical + 5 horizontal.
        assert_eq!(grid.pending.len(), 11);
    }

    #[test]
    fn lines_extend_past_the_axes() {
        let grid = grid_with(Rect::new(10.0, 20.0, 110.0, 70.0), (true, 2), (true, 2));
        let lines: Vec<Line> = grid
            .pending
            .iter()
            .filter_map(|item| match item.shape {
                ShapeKind::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        // First vertical line: spans top to bottom + 5.
        let vertical = lines[2];
        assert_eq!(vertical.p0.x, 60.0);
        assert_eq!(vertical.p1.y, 75.0);
        // First horizontal line overlaps the top and starts 5 left of the axis.
        let horizontal = lines[4];
        assert_eq!(horizontal.p0.x, 5.0);
        assert_eq!(horizontal.p0.y, 20.0);
        assert_eq!(horizontal.p1.x, 110.0);
    }

    #[test]
    fn scene_round_trip_discards_old_lines() {
        let mut scene = Scene::new();
        let mut grid = grid_with(Rect::new(0.0, 0.0, 100.0, 50.0), (true, 3), (false, 0));
        grid.add_to_scene(&mut scene);
        assert_eq!(scene.len(), 5);

        grid.remove_from_scene(&mut scene);
        assert!(scene.is_empty());

        grid.set_vertical_lines(false, 0);
        grid.construct_grid();
        grid.add_to_scene(&mut scene);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn grid_width_tracks_the_rect() {
        let mut grid = GridLines::new();
        grid.set_rect(Rect::new(5.0, 0.0, 105.0, 40.0));
        assert_eq!(grid.grid_width(), 100.0);
    }
}
