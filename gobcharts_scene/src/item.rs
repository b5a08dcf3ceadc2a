// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item payloads: shapes, strokes and paint.

use gobcharts_text::TextStyle;
use kurbo::{Line, ParamCurveNearest, Point, Rect};
use peniko::{Brush, Color};

/// Full circle in sixteenths of a degree, the unit used by segment shapes.
pub(crate) const FULL_CIRCLE_16: i32 = 5760;

/// A stable item identity.
///
/// Ids are caller-derived (the component that creates an item also derives
/// its id), so identity survives detach/re-attach cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Stroke line styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    /// A continuous line.
    #[default]
    Solid,
    /// A dashed line.
    Dash,
    /// A dotted line.
    Dot,
}

/// A paint + width + dash pattern for stroked shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub width: f64,
    /// Line style.
    pub style: LineStyle,
}

impl Stroke {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
            style: LineStyle::Solid,
        }
    }

    /// Sets the line style.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

/// A positioned text payload.
///
/// `bounds` is the on-screen rectangle the text occupies (already accounting
/// for rotation); it backs containment and bounding-box queries. `origin` is
/// the anchor the renderer lays the first line out from, rotated by
/// `rotation` degrees (negative = counter-clockwise).
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    /// Layout anchor (top-left for horizontal text, bottom-left for text
    /// rotated -90°).
    pub origin: Point,
    /// Plain text content.
    pub content: String,
    /// Font style used for layout and rendering.
    pub style: TextStyle,
    /// Text colour.
    pub colour: Color,
    /// Rotation in degrees around `origin`.
    pub rotation: f64,
    /// Fixed wrap width along the text direction.
    pub wrap_width: f64,
    /// Occupied on-screen rectangle.
    pub bounds: Rect,
}

/// Shape payloads supported by the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A pie segment of the ellipse inscribed in `bounds`.
    ///
    /// Angles are in sixteenths of a degree; `start_angle` 0 sits at the
    /// 3 o'clock position and positive spans sweep counter-clockwise on
    /// screen (y grows downward). A span of 5760 or more is a full ellipse.
    Segment {
        /// Bounding rectangle of the full ellipse.
        bounds: Rect,
        /// Start angle in sixteenths of a degree.
        start_angle: i32,
        /// Span angle in sixteenths of a degree.
        span_angle: i32,
    },
    /// A straight line segment.
    Line(Line),
    /// A positioned text block.
    Text(TextShape),
}

/// A drawable item: a shape plus paint, opacity and render order.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// The shape payload.
    pub shape: ShapeKind,
    /// Fill paint (ignored for line shapes).
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<Stroke>,
    /// Opacity in `[0, 1]`; items at 0 are invisible and not hit-testable.
    pub opacity: f64,
    /// Rendering order hint; higher draws on top.
    pub z_index: i32,
}

impl Item {
    /// Creates an item with default paint (transparent fill, no stroke).
    #[must_use]
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            fill: Brush::default(),
            stroke: None,
            opacity: 1.0,
            z_index: 0,
        }
    }

    /// Sets the fill paint.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Returns the on-screen bounding rectangle of the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match &self.shape {
            ShapeKind::Rect(r) => *r,
            ShapeKind::Segment { bounds, .. } => *bounds,
            ShapeKind::Line(l) => Rect::from_points(l.p0, l.p1),
            ShapeKind::Text(t) => t.bounds,
        }
    }

    /// Shape-accurate point containment.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match &self.shape {
            ShapeKind::Rect(r) => r.contains(point),
            ShapeKind::Segment {
                bounds,
                start_angle,
                span_angle,
            } => segment_contains(*bounds, *start_angle, *span_angle, point),
            ShapeKind::Line(l) => {
                let tol = self.stroke.as_ref().map_or(1.0, |s| s.width).max(1.0) * 0.5 + 0.5;
                l.nearest(point, 1e-9).distance_sq.sqrt() <= tol
            }
            ShapeKind::Text(t) => t.bounds.contains(point),
        }
    }
}

fn segment_contains(bounds: Rect, start_angle: i32, span_angle: i32, point: Point) -> bool {
    let rx = bounds.width() * 0.5;
    let ry = bounds.height() * 0.5;
    if rx <= 0.0 || ry <= 0.0 || span_angle <= 0 {
        return false;
    }
    let centre = bounds.center();
    let nx = (point.x - centre.x) / rx;
    let ny = (point.y - centre.y) / ry;
    if nx * nx + ny * ny > 1.0 {
        return false;
    }
    if span_angle >= FULL_CIRCLE_16 {
        return true;
    }
    // Screen y grows downward, angles sweep counter-clockwise visually.
    let angle16 = (f64::atan2(-ny, nx).to_degrees() * 16.0).rem_euclid(FULL_CIRCLE_16 as f64);
    let start = (start_angle.rem_euclid(FULL_CIRCLE_16)) as f64;
    (angle16 - start).rem_euclid(FULL_CIRCLE_16 as f64) <= span_angle as f64
}
