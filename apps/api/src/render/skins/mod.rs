//! Template skins.
//!
//! A skin decides markup and styling only. Section visibility, order, entry
//! elision and field presence are settled in [`DocumentView`] before a skin
//! sees anything.

pub mod classic;
pub mod creative;
pub mod minimalist;
pub mod modern;
pub mod professional;

use crate::models::{SectionKey, TemplateId};
use crate::render::html::{safe_href, Html};
use crate::render::tokens::DesignTokens;
use crate::render::view::{DocumentView, EntryView, HeaderView, SectionView};

/// Column a section is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Main,
    Sidebar,
}

/// How a skin shows a proficiency. The percentage is always emitted as
/// `data-proficiency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProficiencyStyle {
    /// Filled bar.
    Bar,
    /// "Expert" in parentheses after the name.
    Label,
    /// "Expert · 100%".
    LabelWithPercent,
}

pub trait Skin: Sync {
    fn template(&self) -> TemplateId;

    /// CSS appended after the shared page rules.
    fn stylesheet(&self, tokens: &DesignTokens) -> String;

    fn header(&self, html: &mut Html, header: &HeaderView, tokens: &DesignTokens);

    fn proficiency_style(&self) -> ProficiencyStyle {
        ProficiencyStyle::Bar
    }

    fn region(&self, _key: SectionKey) -> Region {
        Region::Main
    }

    /// Width of the sidebar column, for skins that have one.
    fn sidebar_width_mm(&self) -> Option<f32> {
        None
    }

    /// Width of the column main-region entries wrap in.
    fn main_width_mm(&self, tokens: &DesignTokens) -> f32 {
        let content = tokens.content_width_mm();
        match self.sidebar_width_mm() {
            Some(sidebar) => content - sidebar - SIDEBAR_GAP_MM,
            None => content,
        }
    }

    /// Extra class on a section, e.g. to lay its entries out in a grid.
    fn section_modifier(&self, _key: SectionKey) -> Option<&'static str> {
        None
    }

    fn section(&self, html: &mut Html, section: &SectionView) {
        open_section(html, section, self.section_modifier(section.key));
        html.element("h2", "section-title", section.title);
        self.entries(html, section);
        html.close("section");
    }

    fn entries(&self, html: &mut Html, section: &SectionView) {
        html.open("div", "entries");
        for entry in &section.entries {
            render_entry(html, entry, self.proficiency_style());
        }
        html.close("div");
    }

    /// Header, then every section in one column.
    fn body(&self, html: &mut Html, document: &DocumentView, tokens: &DesignTokens) {
        self.header(html, &document.header, tokens);
        html.open("main", "cv-main");
        for section in &document.sections {
            self.section(html, section);
        }
        html.close("main");
    }
}

pub const SIDEBAR_GAP_MM: f32 = 6.0;

static MODERN: modern::Modern = modern::Modern;
static CLASSIC: classic::Classic = classic::Classic;
static MINIMALIST: minimalist::Minimalist = minimalist::Minimalist;
static PROFESSIONAL: professional::Professional = professional::Professional;
static CREATIVE: creative::Creative = creative::Creative;

pub fn skin_for(template: TemplateId) -> &'static dyn Skin {
    match template {
        TemplateId::Modern => &MODERN,
        TemplateId::Classic => &CLASSIC,
        TemplateId::Minimalist => &MINIMALIST,
        TemplateId::Professional => &PROFESSIONAL,
        TemplateId::Creative => &CREATIVE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared markup
// ────────────────────────────────────────────────────────────────────────────

pub fn open_section(html: &mut Html, section: &SectionView, modifier: Option<&str>) {
    let mut class = format!("cv-section section-{}", section.key.slug());
    if let Some(modifier) = modifier {
        class.push(' ');
        class.push_str(modifier);
    }
    html.open_with(
        "section",
        &[("class", class.as_str()), ("data-section", section.key.as_str())],
    );
}

pub fn render_entry(html: &mut Html, entry: &EntryView, style: ProficiencyStyle) {
    match entry.proficiency {
        Some(p) => {
            let percent = p.percent.to_string();
            html.open_with("div", &[("class", "cv-entry"), ("data-proficiency", percent.as_str())]);
        }
        None => {
            html.open("div", "cv-entry");
        }
    }

    let has_head = entry.title.is_some()
        || entry.subtitle.is_some()
        || entry.dates.is_some()
        || entry.location.is_some();
    if has_head {
        html.open("div", "entry-head");
        html.open("div", "entry-heading");
        if let Some(title) = &entry.title {
            html.element("h3", "entry-title", title);
        }
        if let (Some(p), ProficiencyStyle::Label) = (entry.proficiency, style) {
            html.element("span", "proficiency-label", &format!("({})", p.label));
        }
        if let Some(subtitle) = &entry.subtitle {
            html.element("div", "entry-subtitle", subtitle);
        }
        html.close("div");
        if entry.dates.is_some() || entry.location.is_some() {
            html.open("div", "entry-meta");
            if let Some(dates) = &entry.dates {
                html.element("span", "entry-dates", dates);
            }
            if let Some(location) = &entry.location {
                html.element("span", "entry-location", location);
            }
            html.close("div");
        }
        html.close("div");
    }

    if let Some(group) = &entry.group {
        html.element("div", "entry-group", group);
    }
    if let Some(p) = entry.proficiency {
        match style {
            ProficiencyStyle::Bar => {
                let width = format!("width:{}%", p.percent);
                html.open("div", "proficiency")
                    .element("span", "proficiency-label", p.label)
                    .open_with("div", &[("class", "bar"), ("role", "presentation")])
                    .open_with("div", &[("class", "bar-fill"), ("style", width.as_str())])
                    .close("div")
                    .close("div")
                    .close("div");
            }
            ProficiencyStyle::LabelWithPercent => {
                html.element("div", "proficiency", &format!("{} · {}%", p.label, p.percent));
            }
            ProficiencyStyle::Label => {}
        }
    }
    if let Some(description) = &entry.description {
        html.element("p", "entry-description", description);
    }
    if !entry.bullets.is_empty() {
        html.open("ul", "bullets");
        for bullet in &entry.bullets {
            html.element("li", "", bullet);
        }
        html.close("ul");
    }
    if !entry.tags.is_empty() {
        html.open("div", "tags");
        for tag in &entry.tags {
            html.element("span", "tag", tag);
        }
        html.close("div");
    }
    if !entry.details.is_empty() {
        html.open("div", "details");
        for detail in &entry.details {
            html.open("span", "detail")
                .element("span", "detail-label", &format!("{}:", detail.label))
                .raw(" ")
                .text(&detail.value)
                .close("span");
        }
        html.close("div");
    }
    if let Some(link) = &entry.link {
        html.link("entry-link", safe_href(link).as_deref(), link);
    }
    html.close("div");
}

/// Contact items; `icons` prefixes each with its glyph.
pub fn render_contacts(html: &mut Html, header: &HeaderView, icons: bool) {
    if header.contacts.is_empty() {
        return;
    }
    html.open("ul", "contacts");
    for contact in &header.contacts {
        html.open("li", &format!("contact {}", contact.kind.class()));
        if icons {
            html.open_with("span", &[("class", "icon"), ("aria-hidden", "true")])
                .text(contact_icon(contact.kind))
                .close("span");
        }
        html.link("contact-value", contact.href.as_deref(), &contact.text);
        html.close("li");
    }
    html.close("ul");
}

fn contact_icon(kind: crate::render::view::ContactKind) -> &'static str {
    use crate::render::view::ContactKind;
    match kind {
        ContactKind::Email => "✉",
        ContactKind::Phone => "☎",
        ContactKind::Location => "⌖",
        ContactKind::Website => "⌂",
        ContactKind::Linkedin => "in",
        ContactKind::Github => "⌥",
    }
}

pub fn render_photo(html: &mut Html, header: &HeaderView, class: &str) {
    if let Some(photo) = &header.photo {
        html.open_with(
            "img",
            &[("class", class), ("src", photo.as_str()), ("alt", "Profile photo")],
        );
    }
}

pub fn render_summary(html: &mut Html, header: &HeaderView, heading: Option<&str>) {
    if let Some(summary) = &header.summary {
        html.open("div", "cv-summary");
        if let Some(heading) = heading {
            html.element("h2", "section-title", heading);
        }
        html.element("p", "summary-text", summary);
        html.close("div");
    }
}
