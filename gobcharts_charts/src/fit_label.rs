// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-fitting text labels.
//!
//! A label owns a text block, a font, an alignment and an orientation, and
//! grows or shrinks its font point size so the measured text best fills its
//! assigned rectangle without spilling out of it or exceeding a configured
//! maximum size.

use gobcharts_scene::{Item, ItemId, Scene, ShapeKind, TextShape, z_order};
use gobcharts_text::{TextMeasurer, TextStyle, measure_block};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;

/// Margin of difference between a label's height and its allowed height in
/// which resize events are not triggered. This "dead" space prevents the
/// label's growth from triggering a shrinking pass and vice versa.
const DEAD_SPACE_PERC: f64 = 0.05;

/// Margin held back from the available width of the assigned rectangle.
const WIDTH_MARGIN_PERC: f64 = 0.05;

/// Label text orientation, fixed per logical label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Left-to-right text.
    Horizontal,
    /// Text rotated 90° counter-clockwise, read bottom to top.
    Vertical,
}

/// Horizontal text alignment within the label's box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    /// Align to the leading edge.
    Left,
    /// Centre within the box.
    #[default]
    Centre,
    /// Align to the trailing edge.
    Right,
}

fn wider_than(target: Size, measured: Size) -> bool {
    target.width.floor() > measured.width.floor()
}

fn higher_than(target: Size, measured: Size) -> bool {
    target.height.floor() > measured.height.floor()
}

fn same_width(target: Size, measured: Size) -> bool {
    target.width.floor() == measured.width.floor()
}

fn same_height(target: Size, measured: Size) -> bool {
    target.height.floor() == measured.height.floor()
}

/// Returns `true` when the measured box is too large for the target.
///
/// The rule is deliberately asymmetric: a box that is larger in exactly one
/// dimension is tolerated while the other dimension is equal or smaller.
/// Both halves of the comparison floor-round first, so sub-pixel differences
/// cannot flip the verdict back and forth between grow and shrink passes.
fn exceeds(target: Size, measured: Size) -> bool {
    !(((wider_than(target, measured) || same_width(target, measured))
        && higher_than(target, measured))
        || ((higher_than(target, measured) || same_height(target, measured))
            && wider_than(target, measured)))
}

/// A text label that resizes its font to best fill an assigned rectangle.
#[derive(Debug)]
pub struct AutoFitLabel {
    item: ItemId,
    orientation: Orientation,
    alignment: HAlign,
    text: String,
    style: TextStyle,
    colour: Color,
    max_font_size: f64,
    // Target box in the label's own frame: width runs along the text
    // direction, so width/height swap roles for vertical labels.
    target: Size,
    pos: Point,
    visible: bool,
    busy_resizing: bool,
}

impl AutoFitLabel {
    /// Creates a label that syncs into the scene under `item`.
    #[must_use]
    pub fn new(item: ItemId, orientation: Orientation) -> Self {
        Self {
            item,
            orientation,
            alignment: HAlign::default(),
            text: String::new(),
            style: TextStyle::default(),
            colour: css::BLACK,
            max_font_size: 11.0,
            target: Size::ZERO,
            pos: Point::ZERO,
            visible: true,
            busy_resizing: false,
        }
    }

    /// Returns the scene id this label syncs into.
    #[must_use]
    pub fn item_id(&self) -> ItemId {
        self.item
    }

    /// Assigns the rectangle the label must fit inside.
    ///
    /// The target box is inset by the width margin and height dead zone. For
    /// vertical orientation the width/height roles swap and the label anchors
    /// at the rectangle's bottom-left rather than its top-left.
    pub fn set_bounds(&mut self, rect: Rect, measurer: &dyn TextMeasurer) {
        let width_margin = rect.width() * WIDTH_MARGIN_PERC;
        let height_margin = rect.height() * DEAD_SPACE_PERC;

        let mut pos;
        match self.orientation {
            Orientation::Horizontal => {
                self.target = Size::new(
                    rect.width() - width_margin,
                    rect.height() - height_margin,
                );
                pos = Point::new(rect.x0, rect.y0);
                pos.y += height_margin / 2.0;
            }
            Orientation::Vertical => {
                self.target = Size::new(
                    rect.height() - height_margin,
                    rect.width() - width_margin,
                );
                pos = Point::new(rect.x0, rect.y1);
                pos.y -= height_margin / 2.0;
            }
        }
        pos.x += width_margin / 2.0;
        self.pos = pos;

        self.resize(measurer);
    }

    /// Replaces the text content and refits the font.
    pub fn set_text(&mut self, text: impl Into<String>, measurer: &dyn TextMeasurer) {
        self.text = text.into();
        self.resize(measurer);
    }

    /// Returns the text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the font and refits it to the assigned rectangle.
    pub fn set_font(&mut self, font: TextStyle, measurer: &dyn TextMeasurer) {
        self.style = font;
        self.resize(measurer);
    }

    /// Returns the current font.
    #[must_use]
    pub fn font(&self) -> &TextStyle {
        &self.style
    }

    /// Installs `font` and takes its point size as the new user ceiling.
    pub fn set_max_font(&mut self, font: TextStyle, measurer: &dyn TextMeasurer) {
        self.max_font_size = font.font_size;
        self.set_font(font, measurer);
    }

    /// Returns the user-preferred maximum font size.
    #[must_use]
    pub fn max_font_size(&self) -> f64 {
        self.max_font_size
    }

    /// Sets the text alignment. Alignment only re-lays-out text within the
    /// existing box, so no refit happens.
    pub fn set_alignment(&mut self, alignment: HAlign) {
        self.alignment = alignment;
    }

    /// Returns the text alignment.
    #[must_use]
    pub fn alignment(&self) -> HAlign {
        self.alignment
    }

    /// Sets the text colour.
    pub fn set_colour(&mut self, colour: Color) {
        self.colour = colour;
    }

    /// Returns the text colour.
    #[must_use]
    pub fn colour(&self) -> Color {
        self.colour
    }

    /// Shows or hides the label (hidden labels stay in the scene at zero
    /// opacity, so they are neither drawn nor hit).
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns whether the label is visible.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Appends a typed character, as forwarded keyboard input.
    pub fn append_input(&mut self, ch: char, measurer: &dyn TextMeasurer) {
        self.text.push(ch);
        self.resize(measurer);
    }

    /// Deletes the last character, as forwarded keyboard input.
    pub fn backspace(&mut self, measurer: &dyn TextMeasurer) {
        self.text.pop();
        self.resize(measurer);
    }

    /// Grows or shrinks the font until the measured text block best fills
    /// the target box.
    ///
    /// Guarded against re-entry: the final [`set_font`](Self::set_font) call
    /// triggers this method again through the content-changed path, and the
    /// busy flag turns that inner call into a no-op.
    pub fn resize(&mut self, measurer: &dyn TextMeasurer) {
        if self.busy_resizing || self.target.width <= 0.0 || self.target.height <= 0.0 {
            return;
        }
        self.busy_resizing = true;

        let target = self.target;
        let wrap_width = target.width;
        let measure = |style: &TextStyle, size: f64| -> Size {
            let (w, h) = measure_block(&self.text, &style.with_font_size(size), wrap_width, measurer);
            Size::new(w, h)
        };

        let style = self.style.clone();
        let mut font_size = style.font_size;
        let mut measured = measure(&style, font_size);
        let mut font_too_small =
            wider_than(target, measured) || higher_than(target, measured);

        if font_too_small && font_size < self.max_font_size {
            // Increase the size for as long as we stay within the target and
            // under the user's ceiling.
            while font_too_small && !exceeds(target, measured) && font_size < self.max_font_size {
                font_size += 1.0;
                measured = measure(&style, font_size);
                font_too_small = wider_than(target, measured) || higher_than(target, measured);
            }

            // The last step may have pushed the box over the target.
            if exceeds(target, measured) && font_size > 1.0 {
                font_size -= 1.0;
            }
        } else {
            // Decrease until the box fits and the size respects the ceiling.
            while (exceeds(target, measured) || font_size > self.max_font_size)
                && font_size > 1.0
            {
                font_size -= 1.0;
                measured = measure(&style, font_size);
            }
        }

        // 1pt floor, whatever the loops landed on.
        self.set_font(style.with_font_size(font_size.max(1.0)), measurer);
        self.busy_resizing = false;
    }

    /// Captures this label's persistable state.
    #[must_use]
    pub fn state(&self) -> crate::state::LabelState {
        crate::state::LabelState {
            font: self.style.to_descriptor(),
            colour: self.colour,
            max_font_size: self.max_font_size,
            text: self.text.clone(),
            alignment: self.alignment,
        }
    }

    /// Restores this label from persisted state.
    ///
    /// Field order matters: the ceiling is installed before the font so the
    /// font refit respects it, and the text is applied before the alignment
    /// (which never triggers a refit).
    pub fn apply_state(&mut self, state: &crate::state::LabelState, measurer: &dyn TextMeasurer) {
        self.max_font_size = state.max_font_size;
        self.set_font(TextStyle::from_descriptor(&state.font), measurer);
        self.colour = state.colour;
        self.set_text(state.text.clone(), measurer);
        self.alignment = state.alignment;
    }

    /// Writes the label's current state into the scene item it manages.
    pub fn sync(&self, scene: &mut Scene) {
        let bounds = match self.orientation {
            Orientation::Horizontal => Rect::new(
                self.pos.x,
                self.pos.y,
                self.pos.x + self.target.width,
                self.pos.y + self.target.height,
            ),
            Orientation::Vertical => Rect::new(
                self.pos.x,
                self.pos.y - self.target.width,
                self.pos.x + self.target.height,
                self.pos.y,
            ),
        };
        let rotation = match self.orientation {
            Orientation::Horizontal => 0.0,
            Orientation::Vertical => -90.0,
        };
        let mut item = Item::new(ShapeKind::Text(TextShape {
            origin: self.pos,
            content: self.text.clone(),
            style: self.style.clone(),
            colour: self.colour,
            rotation,
            wrap_width: self.target.width,
            bounds,
        }))
        .with_z_index(z_order::TITLES);
        item.set_opacity(if self.visible { 1.0 } else { 0.0 });
        scene.insert(self.item, item);
    }
}

#[cfg(test)]
mod tests {
    use gobcharts_text::HeuristicTextMeasurer;
    use proptest::prelude::*;

    use super::*;

    fn label_with_bounds(rect: Rect, max: f64) -> AutoFitLabel {
        let measurer = HeuristicTextMeasurer;
        let mut label = AutoFitLabel::new(ItemId::from_raw(1), Orientation::Horizontal);
        label.set_max_font(TextStyle::new(max), &measurer);
        label.set_bounds(rect, &measurer);
        label
    }

    fn measured(label: &AutoFitLabel) -> Size {
        let (w, h) = measure_block(
            label.text(),
            label.font(),
            label.target.width,
            &HeuristicTextMeasurer,
        );
        Size::new(w, h)
    }

    #[test]
    fn shrinks_text_that_overflows() {
        let mut label = label_with_bounds(Rect::new(0.0, 0.0, 60.0, 14.0), 40.0);
        label.set_font(TextStyle::new(40.0), &HeuristicTextMeasurer);
        label.set_text("a label far too wide for this box", &HeuristicTextMeasurer);
        let m = measured(&label);
        assert!(
            !exceeds(label.target, m),
            "fitted box still exceeds the target: {m:?} vs {:?}",
            label.target
        );
        assert!(label.font().font_size < 40.0);
    }

    #[test]
    fn grows_small_text_toward_the_ceiling() {
        let mut label = label_with_bounds(Rect::new(0.0, 0.0, 400.0, 100.0), 30.0);
        label.set_font(TextStyle::new(5.0), &HeuristicTextMeasurer);
        label.set_text("Header", &HeuristicTextMeasurer);
        assert!(label.font().font_size > 5.0);
        assert!(label.font().font_size <= 30.0);
    }

    #[test]
    fn never_exceeds_the_user_ceiling() {
        let mut label = label_with_bounds(Rect::new(0.0, 0.0, 1000.0, 500.0), 12.0);
        label.set_text("tiny", &HeuristicTextMeasurer);
        assert!(label.font().font_size <= 12.0);
    }

    #[test]
    fn empty_bounds_suppress_resizing() {
        let measurer = HeuristicTextMeasurer;
        let mut label = AutoFitLabel::new(ItemId::from_raw(1), Orientation::Horizontal);
        label.set_text("text before bounds", &measurer);
        assert_eq!(label.font().font_size, 11.0, "no target, no refit");
    }

    #[test]
    fn vertical_bounds_swap_dimensions() {
        let measurer = HeuristicTextMeasurer;
        let mut label = AutoFitLabel::new(ItemId::from_raw(1), Orientation::Vertical);
        label.set_bounds(Rect::new(10.0, 20.0, 40.0, 220.0), &measurer);
        // Width runs along the text direction: the tall edge of the rect.
        assert!(label.target.width > label.target.height);
        // Anchored at the bottom-left corner, nudged by the margins.
        assert!(label.pos.y < 220.0 && label.pos.y > 210.0);
    }

    #[test]
    fn sync_marks_hidden_labels_invisible() {
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new();
        let mut label = AutoFitLabel::new(ItemId::from_raw(9), Orientation::Horizontal);
        label.set_bounds(Rect::new(0.0, 0.0, 100.0, 20.0), &measurer);
        label.set_visible(false);
        label.sync(&mut scene);
        assert_eq!(scene.item(ItemId::from_raw(9)).unwrap().opacity, 0.0);
    }

    proptest! {
        // The fitted box never exceeds the target in both dimensions at once,
        // and the fitted size never exceeds the ceiling.
        #[test]
        fn fit_invariants_hold(
            width in 20.0_f64..400.0,
            height in 8.0_f64..120.0,
            max in 4.0_f64..48.0,
            words in proptest::collection::vec("[a-zA-Z]{1,12}", 1..12),
        ) {
            let measurer = HeuristicTextMeasurer;
            let mut label = AutoFitLabel::new(ItemId::from_raw(1), Orientation::Horizontal);
            label.set_max_font(TextStyle::new(max), &measurer);
            label.set_bounds(Rect::new(0.0, 0.0, width, height), &measurer);
            label.set_text(words.join(" "), &measurer);

            let size = label.font().font_size;
            prop_assert!(size <= max.max(1.0));
            prop_assert!(size >= 1.0);

            let m = measured(&label);
            let t = label.target;
            // "Larger in both dimensions" is the unambiguous overflow case.
            prop_assert!(
                !(m.width.floor() > t.width.floor() && m.height.floor() > t.height.floor())
                    || size <= 1.0,
                "fitted box {m:?} exceeds target {t:?} at size {size}"
            );
        }
    }
}
