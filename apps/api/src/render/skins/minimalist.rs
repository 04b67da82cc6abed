//! Minimalist: a label column beside a content column, no icons, no color fills.

use crate::models::TemplateId;
use crate::render::html::Html;
use crate::render::skins::{open_section, render_contacts, render_photo, ProficiencyStyle, Skin};
use crate::render::tokens::DesignTokens;
use crate::render::view::{HeaderView, SectionView};

const LABEL_COLUMN_MM: f32 = 34.0;
const COLUMN_GAP_MM: f32 = 5.0;

pub struct Minimalist;

impl Skin for Minimalist {
    fn template(&self) -> TemplateId {
        TemplateId::Minimalist
    }

    fn stylesheet(&self, t: &DesignTokens) -> String {
        format!(
            r#"
.cv-minimalist .cv-header {{ display: flex; justify-content: space-between; align-items: start; margin-bottom: {gap}mm; }}
.cv-minimalist .cv-name {{ font-size: 1.8em; font-weight: 300; letter-spacing: 0.02em; }}
.cv-minimalist .cv-title {{ color: #6b7280; margin-top: 1mm; }}
.cv-minimalist .contacts {{ list-style: none; margin: 2mm 0 0; padding: 0; display: flex; flex-wrap: wrap; gap: 1mm 4mm; font-size: 0.9em; color: #4b5563; }}
.cv-minimalist .profile-photo {{ width: 22mm; height: 22mm; object-fit: cover; filter: grayscale(100%); }}
.cv-minimalist .cv-summary, .cv-minimalist .cv-section {{ display: grid; grid-template-columns: {label}mm 1fr; column-gap: {column_gap}mm; }}
.cv-minimalist .section-title {{ font-size: 0.8em; font-weight: 600; text-transform: uppercase; letter-spacing: 0.1em; color: {accent}; padding-top: 0.6mm; }}
.cv-minimalist .entry-subtitle, .cv-minimalist .entry-meta {{ color: #6b7280; }}
.cv-minimalist .proficiency {{ font-size: 0.85em; color: #6b7280; }}
.cv-minimalist .tags .tag + .tag::before {{ content: " / "; color: #9ca3af; }}
"#,
            accent = t.accent,
            gap = t.section_gap_mm,
            label = LABEL_COLUMN_MM,
            column_gap = COLUMN_GAP_MM,
        )
    }

    fn proficiency_style(&self) -> ProficiencyStyle {
        ProficiencyStyle::LabelWithPercent
    }

    fn main_width_mm(&self, tokens: &DesignTokens) -> f32 {
        tokens.content_width_mm() - LABEL_COLUMN_MM - COLUMN_GAP_MM
    }

    fn header(&self, html: &mut Html, header: &HeaderView, _tokens: &DesignTokens) {
        html.open("header", "cv-header");
        html.open("div", "header-main");
        if let Some(name) = &header.name {
            html.element("h1", "cv-name", name);
        }
        if let Some(title) = &header.title {
            html.element("div", "cv-title", title);
        }
        render_contacts(html, header, false);
        html.close("div");
        render_photo(html, header, "profile-photo");
        html.close("header");

        if let Some(summary) = &header.summary {
            html.open("div", "cv-summary")
                .element("h2", "section-title", "About")
                .element("p", "summary-text", summary)
                .close("div");
        }
    }

    fn section(&self, html: &mut Html, section: &SectionView) {
        open_section(html, section, None);
        html.open("div", "section-label")
            .element("h2", "section-title", section.title)
            .close("div");
        self.entries(html, section);
        html.close("section");
    }
}
