// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart label layout.
//!
//! GobCharts needs to measure text to fit labels into their assigned
//! rectangles. Shaping and glyph layout stay downstream (in whatever renders
//! the scene), so chart code depends only on this tiny measurement interface.
//!
//! Implementations can be:
//! - heuristic (fast, but inaccurate), or
//! - backed by a real shaping engine or platform text measurement.

use std::sync::Arc;

/// A minimal text measurement interface used by the label subsystem.
///
/// Implementors measure a **single line**; callers split on `\n` (or use
/// [`measure_block`] for wrapped multi-line bounds).
pub trait TextMeasurer {
    /// Measure a single line of text.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: just enough to make label fitting
/// consistent. Richer typography belongs in a higher-level text system.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart's coordinate system (typically pixels/points).
    pub font_size: f64,
    /// The preferred font family.
    pub family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub style: FontStyle,
    /// Whether the text is underlined. Purely decorative: it does not affect
    /// measurement, but it round-trips through the font descriptor.
    pub underline: bool,
}

impl TextStyle {
    /// Creates a default style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            family: FontFamily::SansSerif,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
            underline: false,
        }
    }

    /// Returns a copy of this style at a different font size.
    #[must_use]
    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }

    /// Serializes this style as a comma-separated font descriptor:
    /// `family,size,weight,style,underline` (e.g. `sans-serif,11,400,normal,false`).
    ///
    /// This is the form persisted in chart state documents.
    #[must_use]
    pub fn to_descriptor(&self) -> String {
        let style = match self.style {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        };
        format!(
            "{},{},{},{},{}",
            self.family.as_css_family(),
            self.font_size,
            self.weight.0,
            style,
            self.underline
        )
    }

    /// Parses a font descriptor produced by [`TextStyle::to_descriptor`].
    ///
    /// Parsing is best-effort: missing or malformed fields fall back to the
    /// defaults of [`TextStyle::new`] at size 11.
    #[must_use]
    pub fn from_descriptor(descriptor: &str) -> Self {
        let mut parts = descriptor.split(',').map(str::trim);
        let family = match parts.next().unwrap_or("") {
            "" | "sans-serif" => FontFamily::SansSerif,
            "serif" => FontFamily::Serif,
            "monospace" => FontFamily::Monospace,
            name => FontFamily::Named(Arc::from(name)),
        };
        let font_size = parts
            .next()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 1.0)
            .unwrap_or(11.0);
        let weight = parts
            .next()
            .and_then(|s| s.parse::<u16>().ok())
            .map_or(FontWeight::NORMAL, FontWeight);
        let style = match parts.next() {
            Some("italic") => FontStyle::Italic,
            Some("oblique") => FontStyle::Oblique,
            _ => FontStyle::Normal,
        };
        let underline = parts.next() == Some("true");
        Self {
            font_size,
            family,
            weight,
            style,
            underline,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(11.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Measures a word-wrapped block of text.
///
/// The text is split into lines on `\n`, and each line is greedily wrapped at
/// `wrap_width`. A single word wider than `wrap_width` occupies its own,
/// overflowing line. Returns `(width, height)` where width is the widest
/// resulting line and height is `line count * line height`. Empty text
/// measures one line high and zero wide.
pub fn measure_block(
    text: &str,
    style: &TextStyle,
    wrap_width: f64,
    measurer: &dyn TextMeasurer,
) -> (f64, f64) {
    let line_height = measurer.measure("Mg", style).line_height();
    let mut width = 0.0_f64;
    let mut lines = 0_usize;

    for raw_line in text.split('\n') {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            lines += 1;
            continue;
        }

        let mut current = String::new();
        for word in words {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            let advance = measurer.measure(&candidate, style).advance_width;
            if current.is_empty() || advance <= wrap_width {
                current = candidate;
            } else {
                width = width.max(measurer.measure(&current, style).advance_width);
                lines += 1;
                current = word.to_owned();
            }
        }
        width = width.max(measurer.measure(&current, style).advance_width);
        lines += 1;
    }

    (width, lines.max(1) as f64 * line_height)
}

/// A tiny heuristic text measurer suitable for tests and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_round_trips() {
        let style = TextStyle {
            font_size: 14.0,
            family: FontFamily::Named(Arc::from("Inter")),
            weight: FontWeight::BOLD,
            style: FontStyle::Italic,
            underline: true,
        };
        let restored = TextStyle::from_descriptor(&style.to_descriptor());
        assert_eq!(restored, style);
    }

    #[test]
    fn descriptor_defaults_on_garbage() {
        let style = TextStyle::from_descriptor("???,-3,heavy");
        assert_eq!(style.font_size, 11.0);
        assert_eq!(style.weight, FontWeight::NORMAL);
        assert_eq!(style.style, FontStyle::Normal);
        assert!(!style.underline);
    }

    #[test]
    fn block_measure_wraps_at_width() {
        let measurer = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        // Each char is 6 units wide; "aaaa bbbb" is 54 units unwrapped.
        let (w, h) = measure_block("aaaa bbbb", &style, 30.0, &measurer);
        assert_eq!(h, 20.0, "two lines of 10 units each");
        assert_eq!(w, 24.0, "widest wrapped line is a single word");
    }

    #[test]
    fn block_measure_overflows_long_words() {
        let measurer = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        let (w, h) = measure_block("unbreakable", &style, 10.0, &measurer);
        assert!(w > 10.0, "long word keeps its natural width");
        assert_eq!(h, 10.0);
    }

    #[test]
    fn empty_text_is_one_line_high() {
        let measurer = HeuristicTextMeasurer;
        let style = TextStyle::new(12.0);
        let (w, h) = measure_block("", &style, 100.0, &measurer);
        assert_eq!(w, 0.0);
        assert_eq!(h, 12.0);
    }
}
