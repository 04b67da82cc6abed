//! Modern: two-column header with inline contact icons, accent underlines.

use crate::models::TemplateId;
use crate::render::html::Html;
use crate::render::skins::{render_contacts, render_photo, render_summary, Skin};
use crate::render::tokens::DesignTokens;
use crate::render::view::HeaderView;

pub struct Modern;

impl Skin for Modern {
    fn template(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn stylesheet(&self, t: &DesignTokens) -> String {
        format!(
            r#"
.cv-modern .cv-header {{ display: grid; grid-template-columns: 1fr auto; gap: 6mm; align-items: start; padding-bottom: 4mm; border-bottom: 2px solid {accent}; }}
.cv-modern .cv-name {{ font-size: 2.2em; font-weight: 700; color: #111827; }}
.cv-modern .cv-title {{ font-size: 1.15em; color: {accent}; margin-top: 1mm; }}
.cv-modern .header-side {{ display: flex; gap: 4mm; align-items: start; }}
.cv-modern .contacts {{ list-style: none; margin: 0; padding: 0; font-size: 0.9em; text-align: right; }}
.cv-modern .contacts .icon {{ color: {accent}; display: inline-block; min-width: 1.2em; margin-right: 1mm; text-align: center; }}
.cv-modern .profile-photo {{ width: 26mm; height: 26mm; border-radius: 50%; object-fit: cover; border: 2px solid {accent}; }}
.cv-modern .section-title {{ font-size: 1.1em; text-transform: uppercase; letter-spacing: 0.06em; padding-bottom: 1mm; margin-bottom: 2mm; border-bottom: 1px solid {soft}; }}
.cv-modern .cv-summary {{ margin-top: {gap}mm; }}
.cv-modern .entry-subtitle {{ color: {accent}; font-weight: 600; }}
.cv-modern .tag {{ background: {soft}; color: {accent}; border-radius: 999px; padding: 0.3mm 2mm; }}
"#,
            accent = t.accent,
            soft = t.accent_soft,
            gap = t.section_gap_mm,
        )
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
        html.close("div");
        html.open("div", "header-side");
        render_contacts(html, header, true);
        render_photo(html, header, "profile-photo");
        html.close("div");
        html.close("header");
        render_summary(html, header, Some("Profile"));
    }
}
