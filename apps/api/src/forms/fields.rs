//! Form field descriptors and the raw-input parsers behind them.
//!
//! Every editor form is a flat list of fields. A field knows how to turn the
//! raw string typed into its input into the JSON value the store expects, and
//! how to turn the stored value back into a display string.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    /// `YYYY-MM`.
    Month,
    Checkbox,
    Select { options: Vec<&'static str> },
    /// Comma-separated list.
    Tags,
    /// One item per line.
    Lines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Wire name of the field (camelCase).
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn month(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Month)
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<&'static str>) -> Self {
        Self::new(name, label, FieldKind::Select { options })
    }

    /// Parses raw input for this field. `None` means the input is rejected
    /// and the edit should be ignored.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        match &self.kind {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Month => {
                Some(Value::String(raw.to_string()))
            }
            FieldKind::Checkbox => Some(Value::Bool(parse_checkbox(raw))),
            FieldKind::Select { options } => {
                let wanted = raw.trim();
                options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(wanted))
                    .map(|option| Value::String(option.to_string()))
            }
            FieldKind::Tags => Some(string_array(parse_tags(raw))),
            FieldKind::Lines => Some(string_array(parse_lines(raw))),
        }
    }

    /// Renders a stored value back into the string an input would hold.
    pub fn display(&self, value: Option<&Value>) -> String {
        match (&self.kind, value) {
            (_, None | Some(Value::Null)) => String::new(),
            (FieldKind::Tags, Some(Value::Array(items))) => join_items(items, ", "),
            (FieldKind::Lines, Some(Value::Array(items))) => join_items(items, "\n"),
            (_, Some(Value::String(s))) => s.clone(),
            (_, Some(other)) => other.to_string(),
        }
    }
}

/// Splits comma-separated input, trimming items and dropping empty ones.
pub fn parse_tags(raw: &str) -> Vec<String> {
    split_items(raw, ',')
}

/// Splits multi-line input, trimming items and dropping empty ones.
pub fn parse_lines(raw: &str) -> Vec<String> {
    split_items(raw, '\n')
}

fn split_items(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_checkbox(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1" | "checked"
    )
}

fn string_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

fn join_items(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags("React, Node.js ,  AWS"), vec!["React", "Node.js", "AWS"]);
        assert_eq!(parse_tags(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!(
            parse_lines("Shipped v2\n\n  Cut costs 30%  \r\n"),
            vec!["Shipped v2", "Cut costs 30%"]
        );
    }

    #[test]
    fn test_checkbox_truthiness() {
        assert!(parse_checkbox("on"));
        assert!(parse_checkbox("TRUE"));
        assert!(!parse_checkbox("off"));
        assert!(!parse_checkbox(""));
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let field = FieldSpec::select("level", "Level", vec!["Beginner", "Expert"]);
        assert_eq!(field.parse("expert"), Some(json!("Expert")));
        assert_eq!(field.parse("Wizard"), None);
    }

    #[test]
    fn test_display_rejoins_arrays() {
        let tags = FieldSpec::new("technologies", "Technologies", FieldKind::Tags);
        assert_eq!(tags.display(Some(&json!(["Rust", "Axum"]))), "Rust, Axum");
        let lines = FieldSpec::new("achievements", "Achievements", FieldKind::Lines);
        assert_eq!(lines.display(Some(&json!(["a", "b"]))), "a\nb");
        let check = FieldSpec::new("current", "Current", FieldKind::Checkbox);
        assert_eq!(check.display(Some(&json!(true))), "true");
        assert_eq!(check.display(None), "");
    }

    #[test]
    fn test_field_spec_serializes_flat() {
        let value = serde_json::to_value(FieldSpec::select("level", "Level", vec!["A"])).unwrap();
        assert_eq!(value, json!({ "name": "level", "label": "Level", "kind": "select", "options": ["A"] }));
    }
}
