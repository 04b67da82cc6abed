//! Template rendering pipeline.
//!
//! `render_document` is the single composition layer every template goes
//! through:
//!
//! 1. build the [`DocumentView`]: visible sections, in `order`, with blank
//!    entries and blank fields dropped;
//! 2. resolve the design into [`DesignTokens`] (accent, font, size, margins);
//! 3. wrap the skin's markup in an A4-sized, print-exact root element;
//! 4. estimate how much of the page the content fills.
//!
//! Skins only choose markup and CSS.

pub mod fill;
pub mod handlers;
pub mod html;
pub mod skins;
pub mod tokens;
pub mod view;

use serde::Serialize;

use crate::layout::PageFillReport;
use crate::models::{CvData, TemplateId};
use html::Html;
use skins::skin_for;
use tokens::{DesignTokens, A4_HEIGHT_MM, A4_WIDTH_MM};
use view::DocumentView;

/// A rendered CV: one root `<div>` carrying its own stylesheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub template: TemplateId,
    /// "Ada Lovelace CV", or "CV" without a name.
    pub title: String,
    pub html: String,
    pub page_fill: PageFillReport,
}

impl RenderedDocument {
    /// A complete HTML page ready to be printed to A4.
    pub fn standalone_html(&self) -> String {
        let mut page = Html::new();
        page.raw("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n")
            .element("title", "", &self.title)
            .raw("\n<style>@page { size: A4; margin: 0; } body { margin: 0; }</style>\n</head>\n<body>\n")
            .raw(&self.html)
            .raw("\n</body>\n</html>\n");
        page.into_string()
    }
}

pub fn render_document(cv: &CvData) -> RenderedDocument {
    let tokens = DesignTokens::from_design(&cv.design);
    let skin = skin_for(tokens.template);
    let document = DocumentView::build(cv, tokens.show_photo);

    let template = skin.template().as_str();
    let class = format!("cv-page cv-{template}");
    let style = format!(
        "width:{A4_WIDTH_MM}mm;min-height:{A4_HEIGHT_MM}mm;padding:{margin}mm;\
         font-family:{font};font-size:{size}pt;\
         print-color-adjust:exact;-webkit-print-color-adjust:exact",
        margin = tokens.margin_mm,
        font = tokens.font_stack(),
        size = tokens.font_size_pt,
    );

    let mut html = Html::new();
    html.open_with(
        "div",
        &[("class", class.as_str()), ("data-template", template), ("style", style.as_str())],
    );
    html.raw("<style>")
        .raw(&base_stylesheet(&tokens))
        .raw(&skin.stylesheet(&tokens))
        .raw("</style>");
    skin.body(&mut html, &document, &tokens);
    html.close("div");

    let title = match document.header.name.as_deref() {
        Some(name) => format!("{name} CV"),
        None => "CV".to_string(),
    };

    RenderedDocument {
        template: skin.template(),
        title,
        html: html.into_string(),
        page_fill: fill::estimate_page_fill(&document, skin, &tokens),
    }
}

/// Rules every template shares: page box, entry breaking, accent tints.
fn base_stylesheet(t: &DesignTokens) -> String {
    format!(
        r#"
.cv-page {{ box-sizing: border-box; margin: 0 auto; background: #ffffff; color: #1f2937; line-height: 1.4; }}
.cv-page *, .cv-page *::before, .cv-page *::after {{ box-sizing: border-box; }}
.cv-page h1, .cv-page h2, .cv-page h3, .cv-page p {{ margin: 0; }}
.cv-page .cv-section {{ margin-top: {gap}mm; }}
.cv-page .cv-entry {{ break-inside: avoid; page-break-inside: avoid; margin-bottom: 2.5mm; }}
.cv-page .section-title {{ color: {accent}; }}
.cv-page .entry-head {{ display: flex; justify-content: space-between; gap: 4mm; }}
.cv-page .entry-title {{ font-size: 1em; font-weight: 600; }}
.cv-page .entry-meta {{ text-align: right; font-size: 0.9em; color: #6b7280; white-space: nowrap; }}
.cv-page .entry-meta span + span::before {{ content: " | "; }}
.cv-page .entry-group {{ font-size: 0.85em; color: #6b7280; }}
.cv-page .entry-description, .cv-page .summary-text {{ white-space: pre-line; margin-top: 1mm; }}
.cv-page .bullets {{ margin: 1mm 0 0; padding-left: 5mm; }}
.cv-page .tags {{ display: flex; flex-wrap: wrap; gap: 1mm; margin-top: 1mm; font-size: 0.88em; }}
.cv-page .details {{ font-size: 0.9em; margin-top: 0.5mm; }}
.cv-page .detail + .detail {{ margin-left: 4mm; }}
.cv-page .detail-label {{ font-weight: 600; }}
.cv-page a {{ color: inherit; text-decoration: none; }}
.cv-page .entry-link {{ font-size: 0.9em; color: {accent}; }}
.cv-page .proficiency {{ margin-top: 0.8mm; font-size: 0.85em; }}
.cv-page .bar {{ height: 1.6mm; background: {soft}; border-radius: 1mm; overflow: hidden; margin-top: 0.5mm; }}
.cv-page .bar-fill {{ height: 100%; background: {accent}; }}
@media print {{ .cv-page {{ margin: 0; box-shadow: none; }} }}
"#,
        accent = t.accent,
        soft = t.accent_soft,
        gap = t.section_gap_mm,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::{
        Certification, Education, Project, Reference, Skill, SkillLevel, WorkExperience,
    };
    use crate::models::{initial_cv_data, DesignPatch, Entity, SectionKey, SectionPatch};

    fn render_with(cv: &CvData, template: TemplateId) -> RenderedDocument {
        let mut cv = cv.clone();
        cv.design.template = template;
        render_document(&cv)
    }

    fn push<E: Entity>(cv: &mut CvData, f: impl FnOnce(&mut E)) -> String {
        let id = E::collection_mut(cv).add().id().to_string();
        E::collection_mut(cv).update_with(&id, f);
        id
    }

    fn sample_cv() -> CvData {
        let mut cv = initial_cv_data();
        cv.personal_info.first_name = "Ada".to_string();
        cv.personal_info.last_name = "Lovelace".to_string();
        cv.personal_info.email = "ada@example.com".to_string();
        push::<WorkExperience>(&mut cv, |w| {
            w.company = "Analytical Engines".to_string();
            w.position = "Engineer".to_string();
            w.start_date = "2021-03".to_string();
            w.current = true;
            w.achievements = vec!["Wrote the first program".to_string()];
        });
        push::<Skill>(&mut cv, |s| {
            s.name = "Rust".to_string();
            s.level = SkillLevel::Expert;
        });
        push::<Project>(&mut cv, |p| {
            p.name = "Difference Engine".to_string();
            p.technologies = vec!["Brass".to_string()];
        });
        cv
    }

    #[test]
    fn test_root_is_a4_and_print_exact() {
        for template in TemplateId::ALL {
            let doc = render_with(&sample_cv(), template);
            assert!(doc.html.starts_with("<div class=\"cv-page"), "{template:?}");
            assert!(doc.html.contains("width:210mm;min-height:297mm"), "{template:?}");
            assert!(doc.html.contains("print-color-adjust:exact"), "{template:?}");
            assert!(doc.html.contains("break-inside: avoid"), "{template:?}");
        }
    }

    #[test]
    fn test_hidden_section_elided_in_every_template() {
        let mut cv = sample_cv();
        cv.sections.update(
            SectionKey::Projects,
            SectionPatch {
                visible: Some(false),
                order: None,
            },
        );
        for template in TemplateId::ALL {
            let doc = render_with(&cv, template);
            assert!(!doc.html.contains(">Projects<"), "{template:?} rendered hidden heading");
            assert!(!doc.html.contains("section-projects"), "{template:?}");
            assert!(!doc.html.contains("Difference Engine"), "{template:?}");
            assert!(doc.html.contains(">Skills<"), "{template:?}");
        }
        assert_eq!(cv.projects.len(), 1);
    }

    #[test]
    fn test_empty_collection_has_no_heading() {
        let mut cv = initial_cv_data();
        cv.personal_info.first_name = "Ada".to_string();
        cv.education.add();
        for template in TemplateId::ALL {
            let doc = render_with(&cv, template);
            assert!(!doc.html.contains("class=\"cv-section"), "{template:?}");
            assert!(!doc.html.contains(">Education<"), "{template:?}");
        }
    }

    #[test]
    fn test_missing_optional_fields_leave_no_labels() {
        let mut cv = initial_cv_data();
        push::<Education>(&mut cv, |e| {
            e.institution = "Cambridge".to_string();
            e.degree = "BA".to_string();
        });
        push::<Certification>(&mut cv, |c| {
            c.name = "AWS Solutions Architect".to_string();
            c.issuer = "Amazon".to_string();
        });
        push::<Reference>(&mut cv, |r| {
            r.name = "Charles Babbage".to_string();
            r.position = "Professor".to_string();
        });
        for template in TemplateId::ALL {
            let doc = render_with(&cv, template);
            assert!(doc.html.contains("Cambridge"), "{template:?}");
            assert!(doc.html.contains("AWS Solutions Architect"), "{template:?}");
            assert!(doc.html.contains("Charles Babbage"), "{template:?}");
            assert!(!doc.html.contains("GPA:"), "{template:?}");
            assert!(!doc.html.contains("entry-dates"), "{template:?}");
            assert!(!doc.html.contains("contact-email"), "{template:?}");
            assert!(!doc.html.contains("Expires:"), "{template:?}");
            assert!(!doc.html.contains("Credential ID:"), "{template:?}");
            assert!(!doc.html.contains("Email:"), "{template:?}");
            assert!(!doc.html.contains("Phone:"), "{template:?}");
        }
    }

    #[test]
    fn test_present_optional_fields_are_labelled() {
        let mut cv = initial_cv_data();
        push::<Certification>(&mut cv, |c| {
            c.name = "CKA".to_string();
            c.credential_id = "LF-123".to_string();
        });
        push::<Reference>(&mut cv, |r| {
            r.name = "Charles Babbage".to_string();
            r.phone = "+44 20 7946 0000".to_string();
        });
        for template in TemplateId::ALL {
            let html = render_with(&cv, template).html;
            assert!(html.contains("Credential ID:"), "{template:?}");
            assert!(html.contains("LF-123"), "{template:?}");
            assert!(html.contains("Phone:"), "{template:?}");
            assert!(!html.contains("Expires:"), "{template:?}");
            assert!(!html.contains("Email:"), "{template:?}");
        }
    }

    #[test]
    fn test_unknown_template_renders_as_modern() {
        let cv = sample_cv();
        let mut unknown = cv.clone();
        unknown.design.template = serde_json::from_str("\"holographic\"").unwrap();
        let modern = render_with(&cv, TemplateId::Modern);
        assert_eq!(render_document(&unknown).html, modern.html);
    }

    #[test]
    fn test_expert_skill_shows_full_proficiency_everywhere() {
        let cv = sample_cv();
        for template in TemplateId::ALL {
            let doc = render_with(&cv, template);
            assert!(doc.html.contains("Rust"), "{template:?}");
            assert!(doc.html.contains("data-proficiency=\"100\""), "{template:?}");
        }
        let creative = render_with(&cv, TemplateId::Creative);
        assert!(creative.html.contains("width:100%"));
    }

    #[test]
    fn test_sections_follow_order_field() {
        let mut cv = sample_cv();
        cv.sections.update(SectionKey::Projects, SectionPatch { visible: None, order: Some(-5) });
        for template in [TemplateId::Modern, TemplateId::Classic, TemplateId::Minimalist] {
            let doc = render_with(&cv, template);
            let projects = doc.html.find("section-projects").unwrap();
            let work = doc.html.find("section-work-experience").unwrap();
            assert!(projects < work, "{template:?} ignored order");
        }
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut cv = initial_cv_data();
        cv.personal_info.first_name = "<script>alert(1)</script>".to_string();
        cv.design.color = "red;}</style><script>".to_string();
        let doc = render_document(&cv);
        assert!(!doc.html.contains("<script>"));
        assert!(doc.html.contains("&lt;script&gt;"));
        assert!(doc.html.contains(crate::models::cv::DEFAULT_COLOR));
    }

    #[test]
    fn test_design_drives_tokens() {
        let mut cv = sample_cv();
        cv.update_design(DesignPatch {
            color: Some("#FF0000".to_string()),
            font_size: Some(crate::models::cv::FontSize::Small),
            spacing: Some(crate::models::cv::Spacing::Spacious),
            show_profile_image: Some(false),
            ..Default::default()
        });
        cv.personal_info.profile_image = Some("data:image/png;base64,AAAA".to_string());
        let doc = render_document(&cv);
        assert!(doc.html.contains("#ff0000"));
        assert!(doc.html.contains("font-size:9.5pt"));
        assert!(doc.html.contains("padding:24mm"));
        assert!(!doc.html.contains("<img"));
    }

    #[test]
    fn test_current_role_shows_present() {
        let doc = render_document(&sample_cv());
        assert!(doc.html.contains("Mar 2021 – Present"));
    }

    #[test]
    fn test_standalone_page_and_title() {
        let doc = render_document(&sample_cv());
        assert_eq!(doc.title, "Ada Lovelace CV");
        let page = doc.standalone_html();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Ada Lovelace CV</title>"));
        assert!(page.contains("size: A4"));
        assert_eq!(render_document(&initial_cv_data()).title, "CV");
    }

    #[test]
    fn test_small_cv_fits_one_page() {
        let doc = render_document(&sample_cv());
        assert_eq!(doc.page_fill.verdict, crate::layout::PageFillVerdict::Fits);
        assert_eq!(doc.page_fill.estimated_pages, 1);
    }

    #[test]
    fn test_long_cv_overflows() {
        let mut cv = sample_cv();
        for _ in 0..30 {
            push::<WorkExperience>(&mut cv, |w| {
                w.position = "Engineer".to_string();
                w.description = "Built and operated distributed systems at scale. ".repeat(4);
                w.achievements = vec!["Reduced latency".to_string(), "Mentored".to_string()];
            });
        }
        for template in TemplateId::ALL {
            let doc = render_with(&cv, template);
            assert_eq!(
                doc.page_fill.verdict,
                crate::layout::PageFillVerdict::Overflows,
                "{template:?}"
            );
            assert!(doc.page_fill.estimated_pages >= 2);
        }
    }
}
