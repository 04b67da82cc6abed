//! Section metadata: which collections render, and in which order.
//!
//! The set of sections is closed. `Sections` always carries exactly one
//! `SectionMeta` per `SectionKey`, including after deserializing a payload that
//! is missing keys or carries unknown ones.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// One renderable collection of the CV.
///
/// Declaration order is the canonical order: it seeds the default `order`
/// values and breaks ties between sections that share an `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    WorkExperience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Publications,
    Awards,
    Volunteering,
    References,
    Hobbies,
}

impl SectionKey {
    pub const ALL: [SectionKey; 11] = [
        SectionKey::WorkExperience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Languages,
        SectionKey::Publications,
        SectionKey::Awards,
        SectionKey::Volunteering,
        SectionKey::References,
        SectionKey::Hobbies,
    ];

    /// Key used in the persisted JSON (`workExperience`).
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::WorkExperience => "workExperience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
            SectionKey::Publications => "publications",
            SectionKey::Awards => "awards",
            SectionKey::Volunteering => "volunteering",
            SectionKey::References => "references",
            SectionKey::Hobbies => "hobbies",
        }
    }

    /// URL path segment and CSS class suffix (`work-experience`).
    pub fn slug(self) -> &'static str {
        match self {
            SectionKey::WorkExperience => "work-experience",
            other => other.as_str(),
        }
    }

    /// Heading printed above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::WorkExperience => "Work Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Projects => "Projects",
            SectionKey::Certifications => "Certifications",
            SectionKey::Languages => "Languages",
            SectionKey::Publications => "Publications",
            SectionKey::Awards => "Awards",
            SectionKey::Volunteering => "Volunteering",
            SectionKey::References => "References",
            SectionKey::Hobbies => "Hobbies & Interests",
        }
    }

    fn canonical_index(self) -> i32 {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0) as i32
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both the persisted key (`workExperience`) and the slug (`work-experience`).
impl FromStr for SectionKey {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.slug() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMeta {
    pub visible: bool,
    pub order: i32,
}

/// Partial update for one section's metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub visible: Option<bool>,
    pub order: Option<i32>,
}

impl SectionPatch {
    pub fn apply(self, meta: &mut SectionMeta) {
        if let Some(visible) = self.visible {
            meta.visible = visible;
        }
        if let Some(order) = self.order {
            meta.order = order;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    entries: BTreeMap<SectionKey, SectionMeta>,
}

impl Sections {
    pub fn get(&self, key: SectionKey) -> SectionMeta {
        self.entries
            .get(&key)
            .copied()
            .unwrap_or_else(|| default_meta(key))
    }

    pub fn update(&mut self, key: SectionKey, patch: SectionPatch) {
        let meta = self.entries.entry(key).or_insert_with(|| default_meta(key));
        patch.apply(meta);
    }

    pub fn is_visible(&self, key: SectionKey) -> bool {
        self.get(key).visible
    }

    /// Visible sections, ascending by `order`, ties in canonical order.
    pub fn visible_in_order(&self) -> Vec<SectionKey> {
        let mut keys: Vec<SectionKey> = SectionKey::ALL
            .into_iter()
            .filter(|k| self.is_visible(*k))
            .collect();
        keys.sort_by_key(|k| (self.get(*k).order, *k));
        keys
    }

    /// Each stored entry is read as a patch over the key's defaults, so a
    /// missing or malformed field only loses that field.
    fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut sections = Self::default();
        for (name, value) in raw {
            // Keys that no longer exist are dropped rather than rejected.
            let Ok(key) = name.parse::<SectionKey>() else {
                continue;
            };
            let patch = match serde_json::from_value::<SectionPatch>(value) {
                Ok(patch) => patch,
                Err(e) => {
                    debug!(section = %key, "Unreadable section metadata, using defaults: {e}");
                    SectionPatch::default()
                }
            };
            sections.update(key, patch);
        }
        sections
    }
}

fn default_meta(key: SectionKey) -> SectionMeta {
    SectionMeta {
        visible: true,
        order: key.canonical_index(),
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            entries: SectionKey::ALL
                .into_iter()
                .map(|k| (k, default_meta(k)))
                .collect(),
        }
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_key_visible() {
        let sections = Sections::default();
        for key in SectionKey::ALL {
            assert!(sections.is_visible(key), "{key} should default to visible");
        }
        assert_eq!(sections.visible_in_order(), SectionKey::ALL.to_vec());
    }

    #[test]
    fn test_parse_accepts_key_and_slug() {
        assert_eq!(
            "workExperience".parse::<SectionKey>(),
            Ok(SectionKey::WorkExperience)
        );
        assert_eq!(
            "work-experience".parse::<SectionKey>(),
            Ok(SectionKey::WorkExperience)
        );
        assert!("summary".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_visible_in_order_sorts_by_order_then_canonical() {
        let mut sections = Sections::default();
        sections.update(SectionKey::Skills, SectionPatch { visible: None, order: Some(-5) });
        sections.update(SectionKey::Hobbies, SectionPatch { visible: None, order: Some(0) });
        sections.update(SectionKey::Education, SectionPatch { visible: Some(false), order: None });

        let order = sections.visible_in_order();
        assert_eq!(order[0], SectionKey::Skills);
        // Hobbies ties with WorkExperience at 0; canonical order puts WorkExperience first.
        assert_eq!(order[1], SectionKey::WorkExperience);
        assert_eq!(order[2], SectionKey::Hobbies);
        assert!(!order.contains(&SectionKey::Education));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut sections = Sections::default();
        let before = sections.get(SectionKey::Projects);
        sections.update(SectionKey::Projects, SectionPatch { visible: Some(false), order: None });
        let after = sections.get(SectionKey::Projects);
        assert!(!after.visible);
        assert_eq!(after.order, before.order);
    }

    #[test]
    fn test_deserialize_fills_missing_and_drops_unknown() {
        let json = r#"{
            "skills": {"visible": false, "order": 9},
            "summary": {"visible": true, "order": 0}
        }"#;
        let sections: Sections = serde_json::from_str(json).unwrap();
        assert_eq!(sections.get(SectionKey::Skills), SectionMeta { visible: false, order: 9 });
        assert!(sections.is_visible(SectionKey::Hobbies));
        assert_eq!(
            serde_json::to_value(&sections).unwrap().as_object().unwrap().len(),
            SectionKey::ALL.len()
        );
    }

    #[test]
    fn test_deserialize_fills_missing_fields_per_key() {
        let json = r#"{
            "skills": {"visible": false},
            "projects": {"order": 40},
            "awards": null,
            "hobbies": {"visible": "no", "order": 2}
        }"#;
        let sections: Sections = serde_json::from_str(json).unwrap();
        let defaults = Sections::default();
        assert_eq!(
            sections.get(SectionKey::Skills),
            SectionMeta { visible: false, order: defaults.get(SectionKey::Skills).order }
        );
        assert_eq!(sections.get(SectionKey::Projects), SectionMeta { visible: true, order: 40 });
        assert_eq!(sections.get(SectionKey::Awards), defaults.get(SectionKey::Awards));
        assert_eq!(sections.get(SectionKey::Hobbies), defaults.get(SectionKey::Hobbies));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(Sections::default()).unwrap();
        assert!(value.get("workExperience").is_some());
        assert_eq!(value.as_object().unwrap().len(), SectionKey::ALL.len());
    }
}
