//! Transient editor state. Never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::section::{SectionKey, UnknownSection};

/// One panel of the editor: the two singleton forms or a collection form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditorPanel {
    PersonalInfo,
    Section(SectionKey),
    Design,
}

impl EditorPanel {
    pub fn slug(self) -> &'static str {
        match self {
            EditorPanel::PersonalInfo => "personal-info",
            EditorPanel::Section(key) => key.slug(),
            EditorPanel::Design => "design",
        }
    }
}

impl fmt::Display for EditorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EditorPanel {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal-info" | "personalInfo" => Ok(EditorPanel::PersonalInfo),
            "design" => Ok(EditorPanel::Design),
            other => other.parse().map(EditorPanel::Section),
        }
    }
}

impl TryFrom<String> for EditorPanel {
    type Error = UnknownSection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EditorPanel> for String {
    fn from(panel: EditorPanel) -> Self {
        panel.slug().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub active_section: Option<EditorPanel>,
    pub is_preview_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_parses_singletons_and_sections() {
        assert_eq!("design".parse(), Ok(EditorPanel::Design));
        assert_eq!("personalInfo".parse(), Ok(EditorPanel::PersonalInfo));
        assert_eq!(
            "work-experience".parse(),
            Ok(EditorPanel::Section(SectionKey::WorkExperience))
        );
        assert!("billing".parse::<EditorPanel>().is_err());
    }

    #[test]
    fn test_ui_state_serializes_panel_as_slug() {
        let ui = UiState {
            active_section: Some(EditorPanel::Section(SectionKey::Skills)),
            is_preview_mode: true,
        };
        let value = serde_json::to_value(ui).unwrap();
        assert_eq!(value["activeSection"], "skills");
        assert_eq!(value["isPreviewMode"], true);
    }
}
