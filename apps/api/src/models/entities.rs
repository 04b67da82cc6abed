//! Entity types stored in the CV's collections, with their partial-update patches.
//!
//! Text fields are plain strings; an empty string means "not provided". This
//! mirrors how the editor forms hand values over and keeps every persisted
//! field present.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::collection::Collection;
use crate::models::cv::CvData;
use crate::models::section::SectionKey;

/// A partial update that can be merged into `T`.
pub trait Patch<T> {
    fn apply(self, target: &mut T);
}

/// An item of one of the CV's collections.
pub trait Entity: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    const SECTION: SectionKey;
    type Patch: Patch<Self> + DeserializeOwned + Default;

    fn with_id(id: String) -> Self {
        let mut entity = Self::default();
        entity.set_id(id);
        entity
    }

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn collection(cv: &CvData) -> &Collection<Self>;
    fn collection_mut(cv: &mut CvData) -> &mut Collection<Self>;
}

/// Declares a patch struct with one `Option` per field and its `Patch` impl.
macro_rules! patch_struct {
    ($patch:ident for $target:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        #[doc = concat!("Partial update for [`", stringify!($target), "`]; absent fields are left untouched.")]
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $patch {
            $(pub $field: Option<$ty>,)*
        }

        impl Patch<$target> for $patch {
            fn apply(self, target: &mut $target) {
                $(
                    if let Some(value) = self.$field {
                        target.$field = value;
                    }
                )*
            }
        }
    };
}

pub(crate) use patch_struct;

macro_rules! impl_entity {
    ($entity:ident, $patch:ident, $section:expr, $field:ident) => {
        impl Entity for $entity {
            const SECTION: SectionKey = $section;
            type Patch = $patch;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn collection(cv: &CvData) -> &Collection<Self> {
                &cv.$field
            }

            fn collection_mut(cv: &mut CvData) -> &mut Collection<Self> {
                &mut cv.$field
            }
        }
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Proficiency scales
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    /// Fill of the proficiency bar.
    pub fn percent(self) -> u8 {
        match self {
            SkillLevel::Beginner => 25,
            SkillLevel::Intermediate => 50,
            SkillLevel::Advanced => 75,
            SkillLevel::Expert => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageProficiency {
    Basic,
    #[default]
    Conversational,
    Professional,
    Fluent,
    Native,
}

impl LanguageProficiency {
    pub const ALL: [LanguageProficiency; 5] = [
        LanguageProficiency::Basic,
        LanguageProficiency::Conversational,
        LanguageProficiency::Professional,
        LanguageProficiency::Fluent,
        LanguageProficiency::Native,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LanguageProficiency::Basic => "Basic",
            LanguageProficiency::Conversational => "Conversational",
            LanguageProficiency::Professional => "Professional",
            LanguageProficiency::Fluent => "Fluent",
            LanguageProficiency::Native => "Native",
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            LanguageProficiency::Basic => 20,
            LanguageProficiency::Conversational => 40,
            LanguageProficiency::Professional => 60,
            LanguageProficiency::Fluent => 80,
            LanguageProficiency::Native => 100,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Ongoing role; the end date is shown as "Present".
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

patch_struct!(WorkExperiencePatch for WorkExperience {
    company: String,
    position: String,
    location: String,
    start_date: String,
    end_date: String,
    current: bool,
    description: String,
    achievements: Vec<String>,
});
impl_entity!(WorkExperience, WorkExperiencePatch, SectionKey::WorkExperience, work_experience);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

patch_struct!(EducationPatch for Education {
    institution: String,
    degree: String,
    field: String,
    location: String,
    start_date: String,
    end_date: String,
    gpa: String,
    description: String,
});
impl_entity!(Education, EducationPatch, SectionKey::Education, education);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
    pub category: String,
}

patch_struct!(SkillPatch for Skill {
    name: String,
    level: SkillLevel,
    category: String,
});
impl_entity!(Skill, SkillPatch, SectionKey::Skills, skills);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
}

patch_struct!(ProjectPatch for Project {
    name: String,
    description: String,
    technologies: Vec<String>,
    url: String,
    start_date: String,
    end_date: String,
});
impl_entity!(Project, ProjectPatch, SectionKey::Projects, projects);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub url: String,
}

patch_struct!(CertificationPatch for Certification {
    name: String,
    issuer: String,
    date: String,
    expiry_date: String,
    credential_id: String,
    url: String,
});
impl_entity!(Certification, CertificationPatch, SectionKey::Certifications, certifications);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: LanguageProficiency,
}

patch_struct!(LanguagePatch for Language {
    name: String,
    proficiency: LanguageProficiency,
});
impl_entity!(Language, LanguagePatch, SectionKey::Languages, languages);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub date: String,
    pub url: String,
    pub description: String,
}

patch_struct!(PublicationPatch for Publication {
    title: String,
    publisher: String,
    date: String,
    url: String,
    description: String,
});
impl_entity!(Publication, PublicationPatch, SectionKey::Publications, publications);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

patch_struct!(AwardPatch for Award {
    title: String,
    issuer: String,
    date: String,
    description: String,
});
impl_entity!(Award, AwardPatch, SectionKey::Awards, awards);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volunteering {
    pub id: String,
    pub organization: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

patch_struct!(VolunteeringPatch for Volunteering {
    organization: String,
    role: String,
    location: String,
    start_date: String,
    end_date: String,
    description: String,
});
impl_entity!(Volunteering, VolunteeringPatch, SectionKey::Volunteering, volunteering);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

patch_struct!(ReferencePatch for Reference {
    name: String,
    position: String,
    company: String,
    email: String,
    phone: String,
});
impl_entity!(Reference, ReferencePatch, SectionKey::References, references);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hobby {
    pub id: String,
    pub name: String,
    pub description: String,
}

patch_struct!(HobbyPatch for Hobby {
    name: String,
    description: String,
});
impl_entity!(Hobby, HobbyPatch, SectionKey::Hobbies, hobbies);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_percent_mapping() {
        let percents: Vec<u8> = SkillLevel::ALL.iter().map(|l| l.percent()).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }

    #[test]
    fn test_new_skill_defaults_to_beginner() {
        let skill = Skill::with_id("abc".to_string());
        assert_eq!(skill.id, "abc");
        assert_eq!(skill.level, SkillLevel::Beginner);
        assert!(skill.name.is_empty());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut project = Project {
            id: "p1".to_string(),
            name: "Site".to_string(),
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        let patch: ProjectPatch =
            serde_json::from_str(r#"{"technologies": ["Rust"], "id": "hijack"}"#).unwrap();
        patch.apply(&mut project);
        assert_eq!(project.id, "p1", "patches never carry the id");
        assert_eq!(project.name, "Site");
        assert_eq!(project.technologies, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_skill_level_serializes_capitalized() {
        let json = serde_json::to_string(&SkillLevel::Expert).unwrap();
        assert_eq!(json, r#""Expert""#);
    }

    #[test]
    fn test_work_experience_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(WorkExperience::default()).unwrap();
        assert!(value.get("startDate").is_some());
        assert!(value.get("start_date").is_none());
    }
}
