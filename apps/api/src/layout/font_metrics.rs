//! Static font-metric tables for estimating how rendered CV text wraps.
//!
//! Character widths are in em units (relative to font size). The browser's
//! real shaping will differ by a few percent; these tables are only meant to
//! tell a one-page CV from a CV that clearly spills onto a second page.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font family
// ────────────────────────────────────────────────────────────────────────────

/// Metric class of the design's font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Inter, Roboto, Helvetica and friends.
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// Classifies a CSS font family name. Unknown names count as sans-serif.
    pub fn from_css(font: &str) -> Self {
        const MONO_HINTS: [&str; 4] = ["mono", "courier", "consol", "code"];
        const SERIF_HINTS: [&str; 9] = [
            "serif", "times", "georgia", "garamond", "merriweather", "playfair", "lora",
            "baskerville", "cambria",
        ];

        let name = font.to_ascii_lowercase();
        if MONO_HINTS.iter().any(|hint| name.contains(hint)) {
            FontFamily::Mono
        } else if !name.contains("sans") && SERIF_HINTS.iter().any(|hint| name.contains(hint)) {
            FontFamily::Serif
        } else {
            FontFamily::Sans
        }
    }

    /// Generic CSS family used as the last fallback in `font-family`.
    pub fn css_generic(self) -> &'static str {
        match self {
            FontFamily::Sans => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Mono => "monospace",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Body font and vertical room of one page.
///
/// Column widths are measured in em units at the body font size, see
/// [`PageConfig::mm_to_em`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub font_size_pt: f32,
    /// Body line slots available between the top and bottom margins.
    pub usable_height_lines: u16,
}

/// Body line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.4;

impl PageConfig {
    pub fn new(font: FontFamily, font_size_pt: f32, text_height_mm: f32) -> Self {
        let usable_height_lines =
            (text_height_mm * PT_PER_MM / (font_size_pt * LINE_HEIGHT)).floor();
        PageConfig {
            font,
            font_size_pt,
            usable_height_lines: usable_height_lines.max(1.0) as u16,
        }
    }

    /// Converts a horizontal distance to em at the body font size.
    ///
    /// A4 with 18mm margins at 10.5pt: 174mm × 2.835pt/mm ÷ 10.5pt ≈ 47em.
    pub fn mm_to_em(&self, mm: f32) -> f32 {
        mm * PT_PER_MM / self.font_size_pt
    }

    /// Converts a vertical distance to body line slots.
    pub fn mm_to_lines(&self, mm: f32) -> f32 {
        mm * PT_PER_MM / (self.font_size_pt * LINE_HEIGHT)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Estimates how many lines `s` occupies when word-wrapped at `max_width_em`.
    ///
    /// Greedy wrap; explicit newlines start a new line. A word wider than the
    /// column takes as many lines as its width needs.
    pub fn estimated_lines(&self, s: &str, max_width_em: f32) -> u16 {
        if max_width_em <= 0.0 {
            return 0;
        }
        s.lines()
            .map(|line| self.wrap_paragraph(line, max_width_em))
            .sum()
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width: f32) -> u16 {
        let mut line_count = 0u16;
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word);
            if line_count == 0 {
                line_count = 1;
            } else if current_width + self.space_width + word_w <= max_width {
                current_width += self.space_width + word_w;
                continue;
            } else {
                line_count = line_count.saturating_add(1);
            }

            // Overlong words spill onto extra lines.
            let extra = (word_w / max_width).ceil().max(1.0) as u16 - 1;
            line_count = line_count.saturating_add(extra);
            current_width = word_w - extra as f32 * max_width;
        }
        line_count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Humanist sans-serif, measured on Inter.
static SANS_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Sans,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Transitional serif. Approx. 90% of the sans table.
static SERIF_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Serif,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.34, 0.50, 0.50, 0.80, 0.60, 0.20, 0.30, 0.30, 0.35, 0.53, 0.25, 0.30, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.60, 0.55, 0.55, 0.60, 0.50, 0.45, 0.60, 0.60, 0.23, 0.35, 0.55, 0.48, 0.70,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.60, 0.65, 0.50, 0.65, 0.55, 0.45, 0.50, 0.60, 0.60, 0.80, 0.55, 0.55, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.31,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.48, 0.20, 0.75,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.30, 0.40, 0.35, 0.50, 0.45, 0.65, 0.45, 0.45, 0.40,
        // {     |     }     ~
        0.30, 0.23, 0.30, 0.53,
    ],
    average_char_width: 0.47,
    space_width: 0.23,
};

/// Monospace: every glyph is 0.6em.
static MONO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Mono,
    widths: [0.60; 95],
    average_char_width: 0.60,
    space_width: 0.60,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Sans => &SANS_TABLE,
        FontFamily::Serif => &SERIF_TABLE,
        FontFamily::Mono => &MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Sans).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = get_metrics(FontFamily::Sans).measure_str("Rust");
        assert!((width - 2.00).abs() < 1e-3, "Rust width should be ~2.00, got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Serif);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_mono_is_uniform() {
        let metrics = get_metrics(FontFamily::Mono);
        assert_eq!(metrics.font, FontFamily::Mono);
        assert!((metrics.measure_str("iiii") - metrics.measure_str("WWWW")).abs() < 1e-4);
    }

    #[test]
    fn test_estimated_lines() {
        let metrics = get_metrics(FontFamily::Sans);
        assert_eq!(metrics.estimated_lines("", 40.0), 0);
        assert_eq!(metrics.estimated_lines("Rust", 40.0), 1);
        assert_eq!(metrics.estimated_lines("one\ntwo\n\nthree", 40.0), 3);
        let long = "word ".repeat(40);
        assert!(metrics.estimated_lines(&long, 40.0) >= 2);
    }

    #[test]
    fn test_overlong_word_takes_extra_lines() {
        let metrics = get_metrics(FontFamily::Mono);
        // 20 glyphs × 0.6em = 12em in a 5em column.
        assert_eq!(metrics.estimated_lines(&"x".repeat(20), 5.0), 3);
    }

    #[test]
    fn test_wrapped_line_starts_with_the_wrapping_word() {
        let metrics = get_metrics(FontFamily::Mono);
        // 6em column holds ten glyphs: "aaaa bbbb" fits, "cccc" wraps.
        assert_eq!(metrics.estimated_lines("aaaa bbbb cccc", 6.0), 2);
        assert_eq!(metrics.estimated_lines("aaaa bbbb cccc dddd eeee", 6.0), 3);
        // The spilled tail of a 15-glyph word (3em) still has room for "yy".
        assert_eq!(metrics.estimated_lines(&format!("{} yy", "x".repeat(15)), 6.0), 2);
    }

    #[test]
    fn test_font_family_from_css() {
        assert_eq!(FontFamily::from_css("Inter"), FontFamily::Sans);
        assert_eq!(FontFamily::from_css("Georgia"), FontFamily::Serif);
        assert_eq!(FontFamily::from_css("Source Sans Pro"), FontFamily::Sans);
        assert_eq!(FontFamily::from_css("PT Serif"), FontFamily::Serif);
        assert_eq!(FontFamily::from_css("JetBrains Mono"), FontFamily::Mono);
    }

    #[test]
    fn test_a4_page_config() {
        // 174mm column at 10.5pt ≈ 47em; 261mm height at 14.7pt lines ≈ 50 lines.
        let config = PageConfig::new(FontFamily::Sans, 10.5, 261.0);
        let width = config.mm_to_em(174.0);
        assert!((width - 46.97).abs() < 0.1, "{width}");
        assert_eq!(config.usable_height_lines, 50);
    }
}
