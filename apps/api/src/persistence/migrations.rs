//! Versioned migration table for persisted CV state.
//!
//! Each step rewrites the `state` object of a payload written by version
//! `from` into the shape of version `from + 1`. A payload whose version has no
//! step (or is newer than this build) falls through to `MigrationOutcome::Reset`.

use serde_json::{json, Map, Value};

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 2;

type MigrationFn = fn(Value) -> Option<Value>;

struct Migration {
    from: u32,
    migrate: MigrationFn,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        from: 0,
        migrate: add_extended_collections,
    },
    Migration {
        from: 1,
        migrate: rename_show_photo,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// Payload was already at `CURRENT_VERSION`.
    Current(Value),
    /// Payload was upgraded from `from`.
    Migrated { from: u32, state: Value },
    /// No path to the current version; the caller substitutes defaults.
    Reset { from: u32, reason: String },
}

/// Runs every step from `version` up to `CURRENT_VERSION`.
pub fn migrate(version: u32, state: Value) -> MigrationOutcome {
    if version == CURRENT_VERSION {
        return MigrationOutcome::Current(state);
    }
    if version > CURRENT_VERSION {
        return MigrationOutcome::Reset {
            from: version,
            reason: format!("written by a newer schema (v{version} > v{CURRENT_VERSION})"),
        };
    }

    let mut state = state;
    let mut at = version;
    while at < CURRENT_VERSION {
        let Some(step) = MIGRATIONS.iter().find(|m| m.from == at) else {
            return MigrationOutcome::Reset {
                from: version,
                reason: format!("no migration defined from v{at}"),
            };
        };
        state = match (step.migrate)(state) {
            Some(next) => next,
            None => {
                return MigrationOutcome::Reset {
                    from: version,
                    reason: format!("v{at} payload has an unexpected shape"),
                }
            }
        };
        at += 1;
    }

    MigrationOutcome::Migrated {
        from: version,
        state,
    }
}

fn cv_data_mut(state: &mut Value) -> Option<&mut Map<String, Value>> {
    state.get_mut("cvData")?.as_object_mut()
}

/// v0 → v1: the six extended collections and their section entries.
fn add_extended_collections(mut state: Value) -> Option<Value> {
    const EXTENDED: [(&str, i64); 6] = [
        ("languages", 5),
        ("publications", 6),
        ("awards", 7),
        ("volunteering", 8),
        ("references", 9),
        ("hobbies", 10),
    ];

    let cv = cv_data_mut(&mut state)?;
    for (name, _) in EXTENDED {
        cv.entry(name).or_insert_with(|| json!([]));
    }
    let sections = cv
        .entry("sections")
        .or_insert_with(|| json!({}))
        .as_object_mut()?;
    for (name, order) in EXTENDED {
        sections
            .entry(name)
            .or_insert_with(|| json!({ "visible": true, "order": order }));
    }
    Some(state)
}

/// v1 → v2: `design.showPhoto` became `design.showProfileImage`.
fn rename_show_photo(mut state: Value) -> Option<Value> {
    let cv = cv_data_mut(&mut state)?;
    if let Some(design) = cv.get_mut("design").and_then(Value::as_object_mut) {
        if let Some(show) = design.remove("showPhoto") {
            design.entry("showProfileImage").or_insert(show);
        }
    }
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_passes_through() {
        let state = json!({ "cvData": {} });
        assert_eq!(
            migrate(CURRENT_VERSION, state.clone()),
            MigrationOutcome::Current(state)
        );
    }

    #[test]
    fn test_v0_runs_every_step() {
        let state = json!({
            "cvData": {
                "skills": [{ "id": "a", "name": "Rust" }],
                "sections": { "skills": { "visible": false, "order": 2 } },
                "design": { "showPhoto": false }
            }
        });
        let MigrationOutcome::Migrated { from, state } = migrate(0, state) else {
            panic!("expected migration");
        };
        assert_eq!(from, 0);
        let cv = &state["cvData"];
        assert_eq!(cv["hobbies"], json!([]));
        assert_eq!(cv["sections"]["languages"]["visible"], json!(true));
        assert_eq!(cv["sections"]["skills"]["visible"], json!(false));
        assert_eq!(cv["design"]["showProfileImage"], json!(false));
        assert!(cv["design"].get("showPhoto").is_none());
    }

    #[test]
    fn test_newer_version_resets() {
        let outcome = migrate(CURRENT_VERSION + 1, json!({ "cvData": {} }));
        assert!(matches!(outcome, MigrationOutcome::Reset { .. }));
    }

    #[test]
    fn test_malformed_state_resets() {
        let outcome = migrate(0, json!({ "somethingElse": 1 }));
        assert!(matches!(outcome, MigrationOutcome::Reset { from: 0, .. }));
    }
}
