//! Professional: full-bleed colored header band; skills and certifications in
//! a two-column grid.

use crate::models::{SectionKey, TemplateId};
use crate::render::html::Html;
use crate::render::skins::{render_contacts, render_photo, render_summary, Skin};
use crate::render::tokens::DesignTokens;
use crate::render::view::HeaderView;

pub struct Professional;

impl Skin for Professional {
    fn template(&self) -> TemplateId {
        TemplateId::Professional
    }

    fn stylesheet(&self, t: &DesignTokens) -> String {
        format!(
            r#"
.cv-professional .cv-header {{ background: {accent}; color: #ffffff; margin: -{margin}mm -{margin}mm 0; padding: {band}mm {margin}mm; display: flex; justify-content: space-between; align-items: center; gap: 6mm; }}
.cv-professional .cv-name {{ font-size: 2.1em; font-weight: 700; }}
.cv-professional .cv-title {{ font-size: 1.1em; opacity: 0.9; margin-top: 1mm; }}
.cv-professional .contacts {{ list-style: none; margin: 2mm 0 0; padding: 0; display: flex; flex-wrap: wrap; gap: 1mm 5mm; font-size: 0.9em; }}
.cv-professional .profile-photo {{ width: 28mm; height: 28mm; border-radius: 4px; object-fit: cover; border: 2px solid #ffffff; }}
.cv-professional .cv-summary {{ margin-top: {gap}mm; }}
.cv-professional .section-title {{ font-size: 1.05em; color: {accent}; text-transform: uppercase; border-left: 3px solid {accent}; padding-left: 2mm; margin-bottom: 2mm; }}
.cv-professional .grid-2 .entries {{ display: grid; grid-template-columns: 1fr 1fr; gap: 2mm 6mm; }}
.cv-professional .entry-subtitle {{ font-weight: 600; }}
.cv-professional .tag {{ border: 1px solid {accent}; color: {accent}; border-radius: 3px; padding: 0.2mm 1.5mm; }}
"#,
            accent = t.accent,
            margin = t.margin_mm,
            band = (t.margin_mm * 0.6).max(6.0),
            gap = t.section_gap_mm,
        )
    }

    fn section_modifier(&self, key: SectionKey) -> Option<&'static str> {
        matches!(key, SectionKey::Skills | SectionKey::Certifications).then_some("grid-2")
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
        render_summary(html, header, Some("Professional Summary"));
    }
}
