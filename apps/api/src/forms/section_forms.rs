//! One editor form per panel: field lists, the card projection the editor
//! displays, and the edit path from raw input back into the store.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::forms::draft::commit_item;
use crate::forms::fields::{FieldKind, FieldSpec};
use crate::models::entities::{LanguageProficiency, SkillLevel};
use crate::models::cv::{FontSize, Spacing};
use crate::models::{CvData, SectionKey, TemplateId};
use crate::store::dispatch::{entity_json, update_by_key, with_entity};
use crate::store::{CvStore, EditorPanel};

/// Field list of the form behind `panel`, in display order.
pub fn fields_for(panel: EditorPanel) -> Vec<FieldSpec> {
    use FieldSpec as F;
    match panel {
        EditorPanel::PersonalInfo => vec![
            F::text("firstName", "First Name"),
            F::text("lastName", "Last Name"),
            F::text("title", "Professional Title"),
            F::text("email", "Email"),
            F::text("phone", "Phone"),
            F::text("location", "Location"),
            F::text("website", "Website"),
            F::text("linkedin", "LinkedIn"),
            F::text("github", "GitHub"),
            F::textarea("summary", "Professional Summary"),
        ],
        EditorPanel::Design => vec![
            F::select("template", "Template", TemplateId::ALL.map(TemplateId::as_str).to_vec()),
            F::text("color", "Accent Color"),
            F::text("font", "Font"),
            F::select("fontSize", "Font Size", FontSize::ALL.map(FontSize::as_str).to_vec()),
            F::select("spacing", "Spacing", Spacing::ALL.map(Spacing::as_str).to_vec()),
            F::new("showProfileImage", "Show Profile Photo", FieldKind::Checkbox),
        ],
        EditorPanel::Section(key) => section_fields(key),
    }
}

fn section_fields(key: SectionKey) -> Vec<FieldSpec> {
    use FieldSpec as F;
    match key {
        SectionKey::WorkExperience => vec![
            F::text("company", "Company"),
            F::text("position", "Position"),
            F::text("location", "Location"),
            F::month("startDate", "Start Date"),
            F::month("endDate", "End Date"),
            F::new("current", "I currently work here", FieldKind::Checkbox),
            F::textarea("description", "Description"),
            F::new("achievements", "Key Achievements", FieldKind::Lines),
        ],
        SectionKey::Education => vec![
            F::text("institution", "Institution"),
            F::text("degree", "Degree"),
            F::text("field", "Field of Study"),
            F::text("location", "Location"),
            F::month("startDate", "Start Date"),
            F::month("endDate", "End Date"),
            F::text("gpa", "GPA"),
            F::textarea("description", "Description"),
        ],
        SectionKey::Skills => vec![
            F::text("name", "Skill"),
            F::select("level", "Level", SkillLevel::ALL.map(SkillLevel::label).to_vec()),
            F::text("category", "Category"),
        ],
        SectionKey::Projects => vec![
            F::text("name", "Project Name"),
            F::textarea("description", "Description"),
            F::new("technologies", "Technologies", FieldKind::Tags),
            F::text("url", "URL"),
            F::month("startDate", "Start Date"),
            F::month("endDate", "End Date"),
        ],
        SectionKey::Certifications => vec![
            F::text("name", "Certification"),
            F::text("issuer", "Issuer"),
            F::month("date", "Issue Date"),
            F::month("expiryDate", "Expiry Date"),
            F::text("credentialId", "Credential ID"),
            F::text("url", "URL"),
        ],
        SectionKey::Languages => vec![
            F::text("name", "Language"),
            F::select(
                "proficiency",
                "Proficiency",
                LanguageProficiency::ALL.map(LanguageProficiency::label).to_vec(),
            ),
        ],
        SectionKey::Publications => vec![
            F::text("title", "Title"),
            F::text("publisher", "Publisher"),
            F::month("date", "Date"),
            F::text("url", "URL"),
            F::textarea("description", "Description"),
        ],
        SectionKey::Awards => vec![
            F::text("title", "Award"),
            F::text("issuer", "Issuer"),
            F::month("date", "Date"),
            F::textarea("description", "Description"),
        ],
        SectionKey::Volunteering => vec![
            F::text("organization", "Organization"),
            F::text("role", "Role"),
            F::text("location", "Location"),
            F::month("startDate", "Start Date"),
            F::month("endDate", "End Date"),
            F::textarea("description", "Description"),
        ],
        SectionKey::References => vec![
            F::text("name", "Name"),
            F::text("position", "Position"),
            F::text("company", "Company"),
            F::text("email", "Email"),
            F::text("phone", "Phone"),
        ],
        SectionKey::Hobbies => vec![
            F::text("name", "Hobby"),
            F::textarea("description", "Description"),
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// One card of a form: a single entity, or the singleton behind
/// personal info / design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormCard {
    pub id: String,
    /// Field name to input string, in field order.
    pub values: IndexMap<&'static str, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub form: EditorPanel,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    pub cards: Vec<FormCard>,
}

pub fn form_title(panel: EditorPanel) -> &'static str {
    match panel {
        EditorPanel::PersonalInfo => "Personal Information",
        EditorPanel::Design => "Design",
        EditorPanel::Section(key) => key.title(),
    }
}

/// Projects the document into the cards the editor shows for `panel`.
pub fn form_view(cv: &CvData, panel: EditorPanel) -> FormView {
    let fields = fields_for(panel);
    let card = |id: &str, value: Value| FormCard {
        id: id.to_string(),
        values: fields
            .iter()
            .map(|field| (field.name, field.display(value.get(field.name))))
            .collect(),
    };

    let cards = match panel {
        EditorPanel::PersonalInfo => {
            vec![card(panel.slug(), serde_json::to_value(&cv.personal_info).unwrap_or_default())]
        }
        EditorPanel::Design => {
            vec![card(panel.slug(), serde_json::to_value(&cv.design).unwrap_or_default())]
        }
        EditorPanel::Section(key) => with_entity!(key, E => {
            E::collection(cv)
                .iter()
                .map(|entity| card(entity.id(), serde_json::to_value(entity).unwrap_or_default()))
                .collect()
        }),
    };

    FormView {
        form: panel,
        title: form_title(panel),
        fields,
        cards,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edits
// ────────────────────────────────────────────────────────────────────────────

/// What became of one field edit. None of these block the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldEdit {
    Applied,
    /// The form has no such field.
    UnknownField,
    /// The input did not parse for the field, or a list item was blank or
    /// already present.
    Rejected,
    /// The card's entity no longer exists.
    UnknownEntity,
}

/// Parses `raw` for `field` and writes it to the entity `id` (ignored for
/// the singleton forms).
pub fn apply_field_edit(
    store: &mut CvStore,
    panel: EditorPanel,
    id: &str,
    field: &str,
    raw: &str,
) -> FieldEdit {
    let Some(spec) = fields_for(panel).into_iter().find(|f| f.name == field) else {
        debug!(form = %panel, field, "Edit for unknown field ignored");
        return FieldEdit::UnknownField;
    };
    let Some(value) = spec.parse(raw) else {
        debug!(form = %panel, field, raw, "Unparsable field input ignored");
        return FieldEdit::Rejected;
    };
    apply_patch(store, panel, id, single_field(spec.name, value))
}

/// Commits one new item to a list field (achievements, technologies) with
/// [`commit_item`].
pub fn append_list_item(
    store: &mut CvStore,
    panel: EditorPanel,
    id: &str,
    field: &str,
    item: &str,
) -> FieldEdit {
    let is_list = |f: &FieldSpec| matches!(f.kind, FieldKind::Tags | FieldKind::Lines);
    let (EditorPanel::Section(key), true) = (
        panel,
        fields_for(panel).iter().any(|f| f.name == field && is_list(f)),
    ) else {
        return FieldEdit::UnknownField;
    };
    let Some(entity) = entity_json(store.cv_data(), key, id) else {
        return FieldEdit::UnknownEntity;
    };

    let mut list: Vec<String> = entity
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    if !commit_item(&mut list, item) {
        return FieldEdit::Rejected;
    }

    let items = Value::Array(list.into_iter().map(Value::String).collect());
    apply_patch(store, panel, id, single_field(field, items))
}

fn single_field(name: &str, value: Value) -> Value {
    let mut patch = Map::new();
    patch.insert(name.to_string(), value);
    Value::Object(patch)
}

fn apply_patch(store: &mut CvStore, panel: EditorPanel, id: &str, patch: Value) -> FieldEdit {
    let result = match panel {
        EditorPanel::PersonalInfo => serde_json::from_value(patch).map(|patch| {
            store.update_personal_info(patch);
            true
        }),
        EditorPanel::Design => serde_json::from_value(patch).map(|patch| {
            store.update_design(patch);
            true
        }),
        EditorPanel::Section(key) => update_by_key(store, key, id, patch),
    };
    match result {
        Ok(true) => FieldEdit::Applied,
        Ok(false) => FieldEdit::UnknownEntity,
        Err(e) => {
            warn!(form = %panel, "Field value did not fit the document model: {e}");
            FieldEdit::Rejected
        }
    }
}
