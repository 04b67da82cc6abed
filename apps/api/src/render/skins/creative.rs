//! Creative: tinted sidebar with photo, contact, skills, certifications and
//! languages; name, summary and the remaining sections in the main column.

use crate::models::{SectionKey, TemplateId};
use crate::render::html::Html;
use crate::render::skins::{render_contacts, render_photo, Region, Skin, SIDEBAR_GAP_MM};
use crate::render::tokens::DesignTokens;
use crate::render::view::{DocumentView, HeaderView};

const SIDEBAR_MM: f32 = 62.0;

pub struct Creative;

impl Skin for Creative {
    fn template(&self) -> TemplateId {
        TemplateId::Creative
    }

    fn stylesheet(&self, t: &DesignTokens) -> String {
        format!(
            r#"
.cv-creative .creative-layout {{ display: grid; grid-template-columns: {sidebar}mm 1fr; column-gap: {column_gap}mm; min-height: 100%; }}
.cv-creative .cv-sidebar {{ background: {soft}; margin: -{margin}mm 0 -{margin}mm -{margin}mm; padding: {margin}mm 5mm {margin}mm {margin}mm; }}
.cv-creative .cv-sidebar .section-title {{ font-size: 0.95em; }}
.cv-creative .profile-photo {{ display: block; width: 36mm; height: 36mm; border-radius: 50%; object-fit: cover; margin: 0 auto 4mm; border: 3px solid {accent}; }}
.cv-creative .contacts {{ list-style: none; margin: 0; padding: 0; font-size: 0.88em; word-break: break-word; }}
.cv-creative .contacts .icon {{ color: {accent}; display: inline-block; min-width: 1.2em; }}
.cv-creative .cv-name {{ font-size: 2.3em; font-weight: 800; color: {accent}; line-height: 1.1; }}
.cv-creative .cv-title {{ font-size: 1.15em; text-transform: uppercase; letter-spacing: 0.08em; margin-top: 1.5mm; }}
.cv-creative .section-title {{ color: {accent}; font-size: 1.1em; margin-bottom: 2mm; }}
.cv-creative .cv-summary {{ margin-top: {gap}mm; }}
.cv-creative .bar {{ background: #ffffff; }}
.cv-creative .tag {{ background: {accent}; color: #ffffff; border-radius: 3px; padding: 0.3mm 1.8mm; }}
"#,
            accent = t.accent,
            soft = t.accent_soft,
            margin = t.margin_mm,
            gap = t.section_gap_mm,
            sidebar = SIDEBAR_MM,
            column_gap = SIDEBAR_GAP_MM,
        )
    }

    fn region(&self, key: SectionKey) -> Region {
        match key {
            SectionKey::Skills | SectionKey::Certifications | SectionKey::Languages => {
                Region::Sidebar
            }
            _ => Region::Main,
        }
    }

    fn sidebar_width_mm(&self) -> Option<f32> {
        Some(SIDEBAR_MM)
    }

    fn header(&self, html: &mut Html, header: &HeaderView, _tokens: &DesignTokens) {
        html.open("header", "cv-header");
        if let Some(name) = &header.name {
            html.element("h1", "cv-name", name);
        }
        if let Some(title) = &header.title {
            html.element("div", "cv-title", title);
        }
        html.close("header");
        if let Some(summary) = &header.summary {
            html.open("div", "cv-summary")
                .element("h2", "section-title", "About Me")
                .element("p", "summary-text", summary)
                .close("div");
        }
    }

    fn body(&self, html: &mut Html, document: &DocumentView, tokens: &DesignTokens) {
        let header = &document.header;
        html.open("div", "creative-layout");

        html.open("aside", "cv-sidebar");
        render_photo(html, header, "profile-photo");
        if !header.contacts.is_empty() {
            html.open("div", "cv-contact")
                .element("h2", "section-title", "Contact");
            render_contacts(html, header, true);
            html.close("div");
        }
        for section in document.sections.iter().filter(|s| self.region(s.key) == Region::Sidebar) {
            self.section(html, section);
        }
        html.close("aside");

        html.open("main", "cv-main");
        self.header(html, header, tokens);
        for section in document.sections.iter().filter(|s| self.region(s.key) == Region::Main) {
            self.section(html, section);
        }
        html.close("main");

        html.close("div");
    }
}
