//! Classic: centered header, horizontal rules between sections.

use crate::models::TemplateId;
use crate::render::html::Html;
use crate::render::skins::{render_photo, ProficiencyStyle, Skin};
use crate::render::tokens::DesignTokens;
use crate::render::view::HeaderView;

pub struct Classic;

impl Skin for Classic {
    fn template(&self) -> TemplateId {
        TemplateId::Classic
    }

    fn stylesheet(&self, t: &DesignTokens) -> String {
        format!(
            r#"
.cv-classic .cv-header {{ text-align: center; }}
.cv-classic .cv-name {{ font-size: 2em; font-weight: 700; letter-spacing: 0.04em; }}
.cv-classic .cv-title {{ font-style: italic; margin-top: 1mm; }}
.cv-classic .contact-line {{ margin-top: 2mm; font-size: 0.92em; }}
.cv-classic .contact-separator {{ margin: 0 2mm; color: {accent}; }}
.cv-classic .profile-photo {{ display: block; margin: 0 auto 3mm; width: 24mm; height: 24mm; border-radius: 50%; object-fit: cover; }}
.cv-classic hr.rule {{ border: 0; border-top: 1.5px solid {accent}; margin: {gap}mm 0 0; }}
.cv-classic .section-title {{ font-size: 1.1em; text-align: center; text-transform: uppercase; letter-spacing: 0.12em; margin: 2mm 0; }}
.cv-classic .summary-text {{ text-align: center; margin: 2mm 0 0; }}
.cv-classic .entry-title {{ display: inline; }}
.cv-classic .proficiency-label {{ margin-left: 1.5mm; font-style: italic; }}
.cv-classic .entry-subtitle {{ font-style: italic; }}
.cv-classic .tags .tag + .tag::before {{ content: ", "; }}
"#,
            accent = t.accent,
            gap = t.section_gap_mm,
        )
    }

    fn proficiency_style(&self) -> ProficiencyStyle {
        ProficiencyStyle::Label
    }

    fn header(&self, html: &mut Html, header: &HeaderView, _tokens: &DesignTokens) {
        html.open("header", "cv-header");
        render_photo(html, header, "profile-photo");
        if let Some(name) = &header.name {
            html.element("h1", "cv-name", name);
        }
        if let Some(title) = &header.title {
            html.element("div", "cv-title", title);
        }
        if !header.contacts.is_empty() {
            html.open("div", "contact-line");
            for (i, contact) in header.contacts.iter().enumerate() {
                if i > 0 {
                    html.element("span", "contact-separator", "·");
                }
                html.link(
                    &format!("contact {}", contact.kind.class()),
                    contact.href.as_deref(),
                    &contact.text,
                );
            }
            html.close("div");
        }
        if let Some(summary) = &header.summary {
            html.element("p", "summary-text", summary);
        }
        html.close("header");
    }

    fn section(&self, html: &mut Html, section: &crate::render::view::SectionView) {
        html.raw(r#"<hr class="rule">"#);
        super::open_section(html, section, None);
        html.element("h2", "section-title", section.title);
        self.entries(html, section);
        html.close("section");
    }
}
