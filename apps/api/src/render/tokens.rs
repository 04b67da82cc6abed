//! Design settings resolved into the concrete values the stylesheet uses.

use crate::layout::FontFamily;
use crate::models::cv::{DEFAULT_COLOR, DEFAULT_FONT};
use crate::models::{Design, TemplateId};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DesignTokens {
    pub template: TemplateId,
    /// Validated `#rrggbb`.
    pub accent: String,
    /// The accent at 10% opacity (`#rrggbb1a`).
    pub accent_soft: String,
    /// Sanitized family name.
    pub font: String,
    pub font_family: FontFamily,
    pub font_size_pt: f32,
    pub margin_mm: f32,
    pub section_gap_mm: f32,
    pub show_photo: bool,
}

impl DesignTokens {
    pub fn from_design(design: &Design) -> Self {
        let accent = sanitize_color(&design.color);
        let font = sanitize_font(&design.font);
        Self {
            template: design.template,
            accent_soft: format!("{accent}1a"),
            accent,
            font_family: FontFamily::from_css(&font),
            font,
            font_size_pt: design.font_size.points(),
            margin_mm: design.spacing.margin_mm(),
            section_gap_mm: design.spacing.section_gap_mm(),
            show_photo: design.show_profile_image,
        }
    }

    /// `font-family` value: the chosen family, then its generic class.
    pub fn font_stack(&self) -> String {
        format!("'{}', {}", self.font, self.font_family.css_generic())
    }

    pub fn content_width_mm(&self) -> f32 {
        A4_WIDTH_MM - 2.0 * self.margin_mm
    }

    pub fn content_height_mm(&self) -> f32 {
        A4_HEIGHT_MM - 2.0 * self.margin_mm
    }
}

/// Accepts `#rgb` or `#rrggbb` (any case) and returns lowercase `#rrggbb`.
/// Anything else becomes the default accent.
pub fn sanitize_color(raw: &str) -> String {
    let hex = raw.trim().strip_prefix('#').unwrap_or_default();
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return DEFAULT_COLOR.to_string();
    }
    match hex.len() {
        6 => format!("#{}", hex.to_ascii_lowercase()),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{}", expanded.to_ascii_lowercase())
        }
        _ => DEFAULT_COLOR.to_string(),
    }
}

/// Keeps letters, digits, spaces, `-` and `_`; collapses whitespace.
pub fn sanitize_font(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        DEFAULT_FONT.to_string()
    } else {
        collapsed
    }
}
