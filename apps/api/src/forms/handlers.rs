use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::section_forms::{
    append_list_item, apply_field_edit, form_view, FieldEdit, FormView,
};
use crate::state::AppState;
use crate::store::EditorPanel;

#[derive(Deserialize)]
pub struct FieldEditRequest {
    pub field: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct ListItemRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct FieldEditResponse {
    pub outcome: FieldEdit,
    pub form: FormView,
}

fn panel_from_path(slug: &str) -> Result<EditorPanel, AppError> {
    Ok(slug.parse::<EditorPanel>()?)
}

/// GET /api/v1/forms/:form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(form): Path<String>,
) -> Result<Json<FormView>, AppError> {
    let panel = panel_from_path(&form)?;
    Ok(Json(form_view(state.store.lock().cv_data(), panel)))
}

/// POST /api/v1/forms/:form/:id/fields
///
/// Edits that cannot be applied are reported in `outcome`, never as errors.
pub async fn handle_edit_field(
    State(state): State<AppState>,
    Path((form, id)): Path<(String, String)>,
    Json(req): Json<FieldEditRequest>,
) -> Result<Json<FieldEditResponse>, AppError> {
    let panel = panel_from_path(&form)?;
    let mut store = state.store.lock();
    let outcome = apply_field_edit(&mut store, panel, &id, &req.field, &req.value);
    Ok(Json(FieldEditResponse {
        outcome,
        form: form_view(store.cv_data(), panel),
    }))
}

/// POST /api/v1/forms/:form/:id/achievements
pub async fn handle_add_achievement(
    State(state): State<AppState>,
    Path((form, id)): Path<(String, String)>,
    Json(req): Json<ListItemRequest>,
) -> Result<Json<FieldEditResponse>, AppError> {
    let panel = panel_from_path(&form)?;
    let mut store = state.store.lock();
    let outcome = append_list_item(&mut store, panel, &id, "achievements", &req.value);
    if outcome == FieldEdit::UnknownField {
        return Err(AppError::NotFound(format!("Form '{panel}' has no achievements list")));
    }
    Ok(Json(FieldEditResponse {
        outcome,
        form: form_view(store.cv_data(), panel),
    }))
}
