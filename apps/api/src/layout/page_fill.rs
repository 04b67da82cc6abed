//! Page fill estimation for the rendered CV.
//!
//! The renderer hands over its text as columns of blocks. Each column is
//! wrapped against its own width; the tallest column decides how much of the
//! A4 page is used.
//!
//! # Verdicts
//! - fill ≤ 90%   → `Fits`
//! - fill ≤ 100%  → `NearlyFull`
//! - fill > 100%  → `Overflows` (the export adapter paginates)

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, PageConfig};

const NEARLY_FULL_THRESHOLD: f32 = 0.90;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One run of text that wraps as a unit (a heading, a paragraph, a bullet).
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    /// Font size relative to body text.
    pub scale: f32,
    /// Vertical space above the block, in body lines.
    pub space_before: f32,
}

impl TextBlock {
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scale: 1.0,
            space_before: 0.0,
        }
    }

    pub fn heading(text: impl Into<String>, scale: f32, space_before: f32) -> Self {
        Self {
            text: text.into(),
            scale,
            space_before,
        }
    }
}

/// A column of blocks laid out at `text_width_em`.
#[derive(Debug, Clone)]
pub struct Column {
    pub text_width_em: f32,
    pub blocks: Vec<TextBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageFillVerdict {
    Fits,
    NearlyFull,
    /// Content needs more than one page.
    Overflows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillReport {
    pub lines_used: f32,
    pub lines_available: u16,
    pub fill_fraction: f32,
    pub estimated_pages: u16,
    pub verdict: PageFillVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Body lines a column needs.
pub fn column_lines(column: &Column, config: &PageConfig) -> f32 {
    let metrics = get_metrics(config.font);
    column
        .blocks
        .iter()
        .filter(|block| !block.text.trim().is_empty())
        .map(|block| {
            let scale = block.scale.max(0.1);
            let wrapped = metrics.estimated_lines(&block.text, column.text_width_em / scale);
            block.space_before + wrapped as f32 * scale
        })
        .sum()
}

/// Estimates the fill of `columns` sharing one page described by `config`.
pub fn analyze_page_fill(columns: &[Column], config: &PageConfig) -> PageFillReport {
    let lines_used = columns
        .iter()
        .map(|column| column_lines(column, config))
        .fold(0.0_f32, f32::max);

    let available = config.usable_height_lines.max(1);
    let fill_fraction = lines_used / available as f32;
    let estimated_pages = (fill_fraction.ceil() as u16).max(1);

    let verdict = if fill_fraction > 1.0 {
        PageFillVerdict::Overflows
    } else if fill_fraction > NEARLY_FULL_THRESHOLD {
        PageFillVerdict::NearlyFull
    } else {
        PageFillVerdict::Fits
    };

    PageFillReport {
        lines_used,
        lines_available: available,
        fill_fraction,
        estimated_pages,
        verdict,
    }
}
