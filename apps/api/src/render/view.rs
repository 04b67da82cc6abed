//! The skin-independent view of a CV.
//!
//! Everything every template must agree on happens here: which sections
//! render and in what order, which entries have anything to show, and which
//! optional fields are present. Blank fields never make it into a view, so
//! skins cannot emit a label or separator for a value that does not exist.

use chrono::NaiveDate;

use crate::models::entities::{
    Award, Certification, Education, Hobby, Language, Project, Publication, Reference, Skill,
    Volunteering, WorkExperience,
};
use crate::models::{CvData, SectionKey};
use crate::store::dispatch::with_entity;

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// `Some(trimmed)` for non-blank input.
pub fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Joins the non-blank parts with `separator`.
fn join_present(parts: &[&str], separator: &str) -> Option<String> {
    let parts: Vec<&str> = parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).collect();
    (!parts.is_empty()).then(|| parts.join(separator))
}

fn present_items(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|item| present(item)).collect()
}

/// `2021-03` and `2021-03-15` display as `Mar 2021`; anything else verbatim.
pub fn display_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"));
    Some(match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    })
}

/// `Mar 2021 – Present`, `Mar 2021 – Jun 2023`, or whichever end exists.
pub fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    let start = display_date(start);
    let end = if current {
        Some("Present".to_string())
    } else {
        display_date(end)
    };
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} – {end}")),
        (start, end) => start.or(end),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    Github,
}

impl ContactKind {
    pub fn class(self) -> &'static str {
        match self {
            ContactKind::Email => "contact-email",
            ContactKind::Phone => "contact-phone",
            ContactKind::Location => "contact-location",
            ContactKind::Website => "contact-website",
            ContactKind::Linkedin => "contact-linkedin",
            ContactKind::Github => "contact-github",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub kind: ContactKind,
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderView {
    pub name: Option<String>,
    pub title: Option<String>,
    pub contacts: Vec<Contact>,
    pub summary: Option<String>,
    /// `data:image/…` URL, only when the design shows the photo.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proficiency {
    pub label: &'static str,
    pub percent: u8,
}

/// One renderable item of a section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryView {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub dates: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub bullets: Vec<String>,
    pub tags: Vec<String>,
    pub details: Vec<Detail>,
    pub link: Option<String>,
    pub group: Option<String>,
    pub proficiency: Option<Proficiency>,
}

impl EntryView {
    /// True when no user-entered text survived. A proficiency on its own
    /// (every new skill has one) is not content.
    pub fn is_blank(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.dates.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.bullets.is_empty()
            && self.tags.is_empty()
            && self.details.is_empty()
            && self.link.is_none()
            && self.group.is_none()
    }

    fn detail(mut self, label: &'static str, value: &str) -> Self {
        if let Some(value) = present(value) {
            self.details.push(Detail { label, value });
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub key: SectionKey,
    pub title: &'static str,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentView {
    pub header: HeaderView,
    /// Visible, non-empty sections in display order.
    pub sections: Vec<SectionView>,
}

impl DocumentView {
    pub fn build(cv: &CvData, show_photo: bool) -> Self {
        Self {
            header: header_view(cv, show_photo),
            sections: cv
                .sections
                .visible_in_order()
                .into_iter()
                .filter_map(|key| section_view(cv, key))
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

fn header_view(cv: &CvData, show_photo: bool) -> HeaderView {
    let info = &cv.personal_info;
    let contact = |kind: ContactKind, raw: &str, href: fn(&str) -> Option<String>| {
        present(raw).map(|text| Contact {
            kind,
            href: href(&text),
            text,
        })
    };

    let contacts = [
        contact(ContactKind::Email, &info.email, |t| Some(format!("mailto:{t}"))),
        contact(ContactKind::Phone, &info.phone, |t| {
            Some(format!("tel:{}", t.replace(char::is_whitespace, "")))
        }),
        contact(ContactKind::Location, &info.location, |_| None),
        contact(ContactKind::Website, &info.website, super::html::safe_href),
        contact(ContactKind::Linkedin, &info.linkedin, super::html::safe_href),
        contact(ContactKind::Github, &info.github, super::html::safe_href),
    ]
    .into_iter()
    .flatten()
    .collect();

    let photo = info
        .profile_image
        .as_deref()
        .map(str::trim)
        .filter(|url| show_photo && url.starts_with("data:image/"))
        .map(str::to_string);

    HeaderView {
        name: present(&info.full_name()),
        title: present(&info.title),
        contacts,
        summary: present(&info.summary),
        photo,
    }
}

/// The section's renderable entries, or `None` when there are none.
pub fn section_view(cv: &CvData, key: SectionKey) -> Option<SectionView> {
    let entries: Vec<EntryView> = with_entity!(key, E => {
        E::collection(cv)
            .iter()
            .map(EntryView::from)
            .filter(|entry| !entry.is_blank())
            .collect()
    });
    (!entries.is_empty()).then(|| SectionView {
        key,
        title: key.title(),
        entries,
    })
}

impl From<&WorkExperience> for EntryView {
    fn from(work: &WorkExperience) -> Self {
        EntryView {
            title: present(&work.position),
            subtitle: present(&work.company),
            dates: date_range(&work.start_date, &work.end_date, work.current),
            location: present(&work.location),
            description: present(&work.description),
            bullets: present_items(&work.achievements),
            ..Default::default()
        }
    }
}

impl From<&Education> for EntryView {
    fn from(edu: &Education) -> Self {
        EntryView {
            title: join_present(&[&edu.degree, &edu.field], " in "),
            subtitle: present(&edu.institution),
            dates: date_range(&edu.start_date, &edu.end_date, false),
            location: present(&edu.location),
            description: present(&edu.description),
            ..Default::default()
        }
        .detail("GPA", &edu.gpa)
    }
}

impl From<&Skill> for EntryView {
    fn from(skill: &Skill) -> Self {
        EntryView {
            title: present(&skill.name),
            group: present(&skill.category),
            proficiency: Some(Proficiency {
                label: skill.level.label(),
                percent: skill.level.percent(),
            }),
            ..Default::default()
        }
    }
}

impl From<&Project> for EntryView {
    fn from(project: &Project) -> Self {
        EntryView {
            title: present(&project.name),
            dates: date_range(&project.start_date, &project.end_date, false),
            description: present(&project.description),
            tags: present_items(&project.technologies),
            link: present(&project.url),
            ..Default::default()
        }
    }
}

impl From<&Certification> for EntryView {
    fn from(cert: &Certification) -> Self {
        let expires = display_date(&cert.expiry_date).unwrap_or_default();
        EntryView {
            title: present(&cert.name),
            subtitle: present(&cert.issuer),
            dates: display_date(&cert.date),
            link: present(&cert.url),
            ..Default::default()
        }
        .detail("Expires", &expires)
        .detail("Credential ID", &cert.credential_id)
    }
}

impl From<&Language> for EntryView {
    fn from(language: &Language) -> Self {
        EntryView {
            title: present(&language.name),
            proficiency: Some(Proficiency {
                label: language.proficiency.label(),
                percent: language.proficiency.percent(),
            }),
            ..Default::default()
        }
    }
}

impl From<&Publication> for EntryView {
    fn from(publication: &Publication) -> Self {
        EntryView {
            title: present(&publication.title),
            subtitle: present(&publication.publisher),
            dates: display_date(&publication.date),
            description: present(&publication.description),
            link: present(&publication.url),
            ..Default::default()
        }
    }
}

impl From<&Award> for EntryView {
    fn from(award: &Award) -> Self {
        EntryView {
            title: present(&award.title),
            subtitle: present(&award.issuer),
            dates: display_date(&award.date),
            description: present(&award.description),
            ..Default::default()
        }
    }
}

impl From<&Volunteering> for EntryView {
    fn from(volunteering: &Volunteering) -> Self {
        EntryView {
            title: present(&volunteering.role),
            subtitle: present(&volunteering.organization),
            dates: date_range(&volunteering.start_date, &volunteering.end_date, false),
            location: present(&volunteering.location),
            description: present(&volunteering.description),
            ..Default::default()
        }
    }
}

impl From<&Reference> for EntryView {
    fn from(reference: &Reference) -> Self {
        EntryView {
            title: present(&reference.name),
            subtitle: join_present(&[&reference.position, &reference.company], ", "),
            ..Default::default()
        }
        .detail("Email", &reference.email)
        .detail("Phone", &reference.phone)
    }
}

impl From<&Hobby> for EntryView {
    fn from(hobby: &Hobby) -> Self {
        EntryView {
            title: present(&hobby.name),
            description: present(&hobby.description),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::SkillLevel;
    use crate::models::{initial_cv_data, SectionPatch};

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2021-03").as_deref(), Some("Mar 2021"));
        assert_eq!(display_date("2019-12-31").as_deref(), Some("Dec 2019"));
        assert_eq!(display_date("Summer 2020").as_deref(), Some("Summer 2020"));
        assert_eq!(display_date("  "), None);
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range("2020-01", "2022-06", false).as_deref(), Some("Jan 2020 – Jun 2022"));
        assert_eq!(date_range("2020-01", "2022-06", true).as_deref(), Some("Jan 2020 – Present"));
        assert_eq!(date_range("", "2022-06", false).as_deref(), Some("Jun 2022"));
        assert_eq!(date_range("", "", false), None);
    }

    #[test]
    fn test_education_without_gpa_has_no_detail() {
        let edu = Education {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            ..Default::default()
        };
        let entry = EntryView::from(&edu);
        assert!(entry.details.is_empty());
        assert_eq!(entry.title.as_deref(), Some("BSc"));
        assert_eq!(entry.dates, None);
    }

    #[test]
    fn test_reference_subtitle_skips_missing_parts() {
        let reference = Reference {
            name: "Grace".to_string(),
            company: "Navy".to_string(),
            ..Default::default()
        };
        assert_eq!(EntryView::from(&reference).subtitle.as_deref(), Some("Navy"));
    }

    #[test]
    fn test_blank_skill_is_not_renderable() {
        let skill = Skill {
            level: SkillLevel::Expert,
            ..Default::default()
        };
        assert!(EntryView::from(&skill).is_blank());
    }

    #[test]
    fn test_document_view_filters_and_orders() {
        let mut cv = initial_cv_data();
        let id = cv.skills.add().id.clone();
        cv.skills.update_with(&id, |s| s.name = "Rust".to_string());
        let id = cv.projects.add().id.clone();
        cv.projects.update_with(&id, |p| p.name = "Site".to_string());
        cv.work_experience.add();

        let keys = |cv: &CvData| -> Vec<SectionKey> {
            DocumentView::build(cv, true).sections.iter().map(|s| s.key).collect()
        };

        cv.sections.update(
            SectionKey::Projects,
            SectionPatch {
                visible: None,
                order: Some(-1),
            },
        );
        // The blank work entry leaves its section out entirely.
        assert_eq!(keys(&cv), vec![SectionKey::Projects, SectionKey::Skills]);

        cv.sections.update(
            SectionKey::Projects,
            SectionPatch {
                visible: Some(false),
                order: None,
            },
        );
        assert_eq!(keys(&cv), vec![SectionKey::Skills]);
    }

    #[test]
    fn test_photo_gated_by_design() {
        let mut cv = initial_cv_data();
        cv.personal_info.profile_image = Some("data:image/png;base64,AAAA".to_string());
        assert!(DocumentView::build(&cv, true).header.photo.is_some());
        assert!(DocumentView::build(&cv, false).header.photo.is_none());

        cv.personal_info.profile_image = Some("javascript:alert(1)".to_string());
        assert!(DocumentView::build(&cv, true).header.photo.is_none());
    }

    #[test]
    fn test_header_contacts_only_present() {
        let mut cv = initial_cv_data();
        cv.personal_info.email = "ada@example.com".to_string();
        cv.personal_info.github = "github.com/ada".to_string();
        let header = DocumentView::build(&cv, true).header;
        let kinds: Vec<_> = header.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ContactKind::Email, ContactKind::Github]);
        assert_eq!(header.contacts[1].href.as_deref(), Some("https://github.com/ada"));
        assert_eq!(header.name, None);
    }
}
