// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The fourteen standard PDF typefaces and their metrics.
//!
//! The engine draws only with the standard-14 fonts that every PDF viewer ships, so no font
//! files are loaded or embedded.  Text measurement uses the Adobe AFM advance widths for the
//! printable ASCII range, which is what ruler labels, table cells and alignment calculations
//! are made of.  The oblique variants share the advance widths of their upright counterparts,
//! and Courier is fixed-pitch at 600/1000 em.
//!
//! [`Font::str_width`][] is the measurement entry point; it returns the width of a single line
//! of text at a given size in points.
//!
//! [`Font::str_width`]: enum.Font.html#method.str_width

use crate::Pt;

/// One of the fourteen standard PDF typefaces.
///
/// Unknown or unsupported selections fall back to [`Helvetica`](#variant.Helvetica), the
/// default sans-serif face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Helvetica regular.
    Helvetica,
    /// Helvetica bold.
    HelveticaBold,
    /// Helvetica oblique.
    HelveticaOblique,
    /// Helvetica bold oblique.
    HelveticaBoldOblique,
    /// Times roman.
    TimesRoman,
    /// Times bold.
    TimesBold,
    /// Times italic.
    TimesItalic,
    /// Times bold italic.
    TimesBoldItalic,
    /// Courier regular.
    Courier,
    /// Courier bold.
    CourierBold,
    /// Courier oblique.
    CourierOblique,
    /// Courier bold oblique.
    CourierBoldOblique,
    /// The Symbol face.
    Symbol,
    /// The ZapfDingbats face.
    ZapfDingbats,
}

impl Default for Font {
    fn default() -> Font {
        Font::Helvetica
    }
}

impl Font {
    /// Returns the matching printpdf built-in font.
    pub fn builtin(self) -> printpdf::BuiltinFont {
        use printpdf::BuiltinFont::*;
        match self {
            Font::Helvetica => Helvetica,
            Font::HelveticaBold => HelveticaBold,
            Font::HelveticaOblique => HelveticaOblique,
            Font::HelveticaBoldOblique => HelveticaBoldOblique,
            Font::TimesRoman => TimesRoman,
            Font::TimesBold => TimesBold,
            Font::TimesItalic => TimesItalic,
            Font::TimesBoldItalic => TimesBoldItalic,
            Font::Courier => Courier,
            Font::CourierBold => CourierBold,
            Font::CourierOblique => CourierOblique,
            Font::CourierBoldOblique => CourierBoldOblique,
            Font::Symbol => Symbol,
            Font::ZapfDingbats => ZapfDingbats,
        }
    }

    /// Returns the advance width of a character at the given font size in points.
    ///
    /// Characters outside the printable ASCII range use a 0.6 em fallback advance.
    pub fn char_width(self, c: char, size: f64) -> Pt {
        let advance = match self.widths() {
            Some(table) => {
                let i = c as usize;
                if (0x20..=0x7e).contains(&i) {
                    f64::from(table[i - 0x20])
                } else {
                    MISSING_ADVANCE
                }
            }
            // fixed-pitch Courier
            None => 600.0,
        };
        Pt(advance * size / 1000.0)
    }

    /// Returns the width of a single line of text at the given font size in points.
    pub fn str_width(self, s: &str, size: f64) -> Pt {
        s.chars().map(|c| self.char_width(c, size)).sum()
    }

    fn widths(self) -> Option<&'static [u16; 95]> {
        match self {
            Font::Helvetica | Font::HelveticaOblique => Some(&HELVETICA),
            Font::HelveticaBold | Font::HelveticaBoldOblique => Some(&HELVETICA_BOLD),
            Font::TimesRoman => Some(&TIMES_ROMAN),
            Font::TimesBold => Some(&TIMES_BOLD),
            Font::TimesItalic => Some(&TIMES_ITALIC),
            Font::TimesBoldItalic => Some(&TIMES_BOLD_ITALIC),
            Font::Courier
            | Font::CourierBold
            | Font::CourierOblique
            | Font::CourierBoldOblique => None,
            // no AFM tables carried for the symbolic faces; labels are never set in them
            Font::Symbol | Font::ZapfDingbats => Some(&HELVETICA),
        }
    }
}

const MISSING_ADVANCE: f64 = 600.0;

// Adobe AFM advance widths (1/1000 em) for the printable ASCII range 0x20..=0x7e.

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778,
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584,
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778,
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556,
    500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333,
    500, 564, 250, 333, 250, 278, 500, 500, 500, 500,
    500, 500, 500, 500, 500, 500, 278, 278, 564, 564,
    564, 444, 921, 722, 667, 667, 722, 611, 556, 722,
    722, 333, 389, 722, 611, 889, 722, 722, 556, 722,
    667, 556, 611, 722, 722, 944, 722, 722, 611, 333,
    278, 333, 469, 500, 333, 444, 500, 444, 500, 444,
    333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500,
    444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333,
    500, 570, 250, 333, 250, 278, 500, 500, 500, 500,
    500, 500, 500, 500, 500, 500, 333, 333, 570, 570,
    570, 500, 930, 722, 667, 722, 722, 667, 611, 778,
    778, 389, 500, 778, 667, 944, 722, 778, 611, 778,
    722, 556, 667, 722, 722, 1000, 722, 722, 667, 333,
    278, 333, 581, 500, 333, 500, 556, 444, 556, 444,
    333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500,
    444, 394, 220, 394, 520,
];

#[rustfmt::skip]
static TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333,
    500, 675, 250, 333, 250, 278, 500, 500, 500, 500,
    500, 500, 500, 500, 500, 500, 333, 333, 675, 675,
    675, 500, 920, 611, 611, 667, 722, 611, 611, 722,
    722, 333, 444, 667, 556, 833, 667, 722, 611, 722,
    611, 500, 556, 722, 611, 833, 611, 556, 556, 389,
    278, 389, 422, 500, 333, 500, 500, 444, 500, 444,
    278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444,
    389, 400, 275, 400, 541,
];

#[rustfmt::skip]
static TIMES_BOLD_ITALIC: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333,
    500, 570, 250, 333, 250, 278, 500, 500, 500, 500,
    500, 500, 500, 500, 500, 500, 333, 333, 570, 570,
    570, 500, 832, 667, 667, 667, 722, 667, 667, 722,
    778, 389, 500, 667, 611, 889, 722, 722, 611, 722,
    667, 556, 611, 722, 667, 889, 667, 611, 611, 333,
    278, 333, 570, 500, 333, 500, 500, 444, 500, 444,
    333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444,
    389, 348, 220, 348, 570,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_fixed_pitch() {
        let w = Font::Courier.str_width("georep", 10.0);
        assert!((w.0 - 6.0 * 600.0 * 10.0 / 1000.0).abs() < 1e-9);
        assert_eq!(
            Font::Courier.char_width('i', 10.0),
            Font::CourierBold.char_width('W', 10.0)
        );
    }

    #[test]
    fn oblique_shares_upright_widths() {
        assert_eq!(
            Font::Helvetica.str_width("Ruler 10.5", 12.0),
            Font::HelveticaOblique.str_width("Ruler 10.5", 12.0)
        );
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let small = Font::TimesRoman.str_width("extent", 10.0);
        let large = Font::TimesRoman.str_width("extent", 20.0);
        assert!((large.0 - 2.0 * small.0).abs() < 1e-9);
    }

    #[test]
    fn wider_string_measures_wider() {
        let narrow = Font::Helvetica.str_width("ili", 12.0);
        let wide = Font::Helvetica.str_width("WMW", 12.0);
        assert!(wide > narrow);
    }
}
