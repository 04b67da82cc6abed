//! The CV document: personal info, entity collections, section metadata and design.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::collection::Collection;
use crate::models::entities::{
    patch_struct, Award, Certification, Education, Hobby, Language, Patch, Project, Publication,
    Reference, Skill, Volunteering, WorkExperience,
};
use crate::models::section::{SectionKey, Sections};

pub const DEFAULT_COLOR: &str = "#2563eb";
pub const DEFAULT_FONT: &str = "Inter";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    /// Embedded image as a `data:` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// The profile image has its own store operations; a shallow merge never touches it.
patch_struct!(PersonalInfoPatch for PersonalInfo {
    first_name: String,
    last_name: String,
    title: String,
    email: String,
    phone: String,
    location: String,
    website: String,
    linkedin: String,
    github: String,
    summary: String,
});

/// The five layouts the renderer knows.
///
/// Deserializing anything but a known id (another string, `null`, a number)
/// yields `Modern` instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Minimalist,
    Professional,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Minimalist,
        TemplateId::Professional,
        TemplateId::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
        }
    }

    pub fn resolve(id: &str) -> Self {
        let wanted = id.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|t| t.as_str() == wanted) {
            Some(template) => template,
            None => {
                debug!(template = id, "Unknown template id, falling back to modern");
                TemplateId::Modern
            }
        }
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(id) => Self::resolve(id),
            None => {
                debug!(template = %value, "Non-string template id, falling back to modern");
                TemplateId::Modern
            }
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    /// Body text size in points.
    pub fn points(self) -> f32 {
        match self {
            FontSize::Small => 9.5,
            FontSize::Medium => 10.5,
            FontSize::Large => 11.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Spacing {
    pub const ALL: [Spacing; 3] = [Spacing::Compact, Spacing::Normal, Spacing::Spacious];

    pub fn as_str(self) -> &'static str {
        match self {
            Spacing::Compact => "compact",
            Spacing::Normal => "normal",
            Spacing::Spacious => "spacious",
        }
    }

    /// Page margin on every side, in millimetres.
    pub fn margin_mm(self) -> f32 {
        match self {
            Spacing::Compact => 12.0,
            Spacing::Normal => 18.0,
            Spacing::Spacious => 24.0,
        }
    }

    /// Vertical gap between sections, in millimetres.
    pub fn section_gap_mm(self) -> f32 {
        match self {
            Spacing::Compact => 3.0,
            Spacing::Normal => 5.0,
            Spacing::Spacious => 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Design {
    pub template: TemplateId,
    /// Accent color as a hex string (`#2563eb`).
    pub color: String,
    /// CSS font family name.
    pub font: String,
    pub font_size: FontSize,
    pub spacing: Spacing,
    pub show_profile_image: bool,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            template: TemplateId::Modern,
            color: DEFAULT_COLOR.to_string(),
            font: DEFAULT_FONT.to_string(),
            font_size: FontSize::Medium,
            spacing: Spacing::Normal,
            show_profile_image: true,
        }
    }
}

patch_struct!(DesignPatch for Design {
    template: TemplateId,
    color: String,
    font: String,
    font_size: FontSize,
    spacing: Spacing,
    show_profile_image: bool,
});

/// The complete in-progress CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub work_experience: Collection<WorkExperience>,
    pub education: Collection<Education>,
    pub skills: Collection<Skill>,
    pub projects: Collection<Project>,
    pub certifications: Collection<Certification>,
    pub languages: Collection<Language>,
    pub publications: Collection<Publication>,
    pub awards: Collection<Award>,
    pub volunteering: Collection<Volunteering>,
    pub references: Collection<Reference>,
    pub hobbies: Collection<Hobby>,
    pub sections: Sections,
    pub design: Design,
}

impl CvData {
    /// Number of entities in the collection behind `key`.
    pub fn collection_len(&self, key: SectionKey) -> usize {
        match key {
            SectionKey::WorkExperience => self.work_experience.len(),
            SectionKey::Education => self.education.len(),
            SectionKey::Skills => self.skills.len(),
            SectionKey::Projects => self.projects.len(),
            SectionKey::Certifications => self.certifications.len(),
            SectionKey::Languages => self.languages.len(),
            SectionKey::Publications => self.publications.len(),
            SectionKey::Awards => self.awards.len(),
            SectionKey::Volunteering => self.volunteering.len(),
            SectionKey::References => self.references.len(),
            SectionKey::Hobbies => self.hobbies.len(),
        }
    }

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        patch.apply(&mut self.personal_info);
    }

    pub fn update_design(&mut self, patch: DesignPatch) {
        patch.apply(&mut self.design);
    }
}

/// The empty document every new session starts from.
pub fn initial_cv_data() -> CvData {
    CvData::default()
}
