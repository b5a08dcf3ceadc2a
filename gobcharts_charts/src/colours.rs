// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cyclic category palette.

use peniko::Color;

/// Random colour generation had limited success, so categories draw from a
/// fixed list of colours tuned for pairwise distinctness instead.
const PALETTE: [(u8, u8, u8); 28] = [
    (25, 121, 39),
    (237, 147, 21),
    (238, 65, 21),
    (232, 22, 21),
    (228, 20, 186),
    (20, 25, 222),
    (149, 14, 129),
    (79, 155, 29),
    (237, 169, 20),
    (238, 96, 32),
    (231, 49, 57),
    (243, 51, 205),
    (33, 81, 220),
    (169, 41, 149),
    (91, 176, 34),
    (237, 191, 21),
    (238, 125, 47),
    (243, 42, 51),
    (244, 82, 212),
    (69, 107, 217),
    (164, 64, 149),
    (109, 212, 41),
    (238, 182, 82),
    (251, 65, 74),
    (237, 22, 20),
    (244, 158, 212),
    (109, 138, 181),
    (167, 96, 156),
];

/// A cursor over the fixed category palette.
///
/// The owner resets the cursor once per redraw pass and calls [`next`] once
/// per rendered category (including range-filtered ones), so colour
/// assignment stays stable when a range filter is toggled.
///
/// [`next`]: ColourCycler::next
#[derive(Clone, Copy, Debug, Default)]
pub struct ColourCycler {
    // None until the first `next` call, mirroring a reset cursor.
    index: Option<usize>,
}

impl ColourCycler {
    /// Creates a cycler positioned before the first palette entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct palette entries.
    #[must_use]
    pub const fn palette_len() -> usize {
        PALETTE.len()
    }

    /// Returns the next palette colour, wrapping after the last entry.
    pub fn next(&mut self) -> Color {
        let index = match self.index {
            Some(i) if i + 1 < PALETTE.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.index = Some(index);
        let (r, g, b) = PALETTE[index];
        Color::from_rgb8(r, g, b)
    }

    /// Rewinds the cursor so the next [`next`](Self::next) call returns the
    /// first palette entry.
    pub fn reset(&mut self) {
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_the_last_entry() {
        let mut cycler = ColourCycler::new();
        let first = cycler.next();
        for _ in 1..ColourCycler::palette_len() {
            cycler.next();
        }
        assert_eq!(cycler.next(), first, "29th call wraps to the first colour");
    }

    #[test]
    fn reset_rewinds_to_the_first_entry() {
        let mut cycler = ColourCycler::new();
        let first = cycler.next();
        cycler.next();
        cycler.next();
        cycler.reset();
        assert_eq!(cycler.next(), first);
    }

    #[test]
    fn palette_entries_are_distinct() {
        let mut cycler = ColourCycler::new();
        let mut seen = Vec::new();
        for _ in 0..ColourCycler::palette_len() {
            let colour = cycler.next();
            assert!(!seen.contains(&colour), "palette colours repeat");
            seen.push(colour);
        }
    }
}
