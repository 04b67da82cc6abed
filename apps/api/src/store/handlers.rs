use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::{
    CvData, Design, DesignPatch, PersonalInfo, PersonalInfoPatch, SectionKey, SectionMeta,
    SectionPatch,
};
use crate::state::AppState;
use crate::store::dispatch::{add_by_key, remove_by_key, update_by_key};
use crate::store::image::{encode_data_url, is_image_mime};
use crate::store::{EditorPanel, UiState};

fn section_from_path(slug: &str) -> Result<SectionKey, AppError> {
    Ok(slug.parse::<SectionKey>()?)
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<Arc<CvData>> {
    Json(state.store.lock().snapshot())
}

/// POST /api/v1/cv/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<Arc<CvData>> {
    let mut store = state.store.lock();
    store.reset();
    info!("CV reset to defaults");
    Json(store.snapshot())
}

/// PATCH /api/v1/cv/personal-info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Json(patch): Json<PersonalInfoPatch>,
) -> Json<PersonalInfo> {
    let mut store = state.store.lock();
    store.update_personal_info(patch);
    Json(store.cv_data().personal_info.clone())
}

/// PUT /api/v1/cv/personal-info/photo
///
/// The body is the raw image; `Content-Type` must be `image/*`.
pub async fn handle_set_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !is_image_mime(mime) {
        return Err(AppError::Validation(format!(
            "Profile image must have an image/* content type (got '{mime}')"
        )));
    }
    if body.is_empty() {
        return Err(AppError::Validation("Profile image is empty".to_string()));
    }

    let data_url = encode_data_url(mime, &body);
    state.store.lock().set_profile_image(data_url);
    info!(mime, bytes = body.len(), "Profile image updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cv/personal-info/photo
pub async fn handle_clear_photo(State(state): State<AppState>) -> StatusCode {
    state.store.lock().clear_profile_image();
    StatusCode::NO_CONTENT
}

/// PATCH /api/v1/cv/design
pub async fn handle_update_design(
    State(state): State<AppState>,
    Json(patch): Json<DesignPatch>,
) -> Json<Design> {
    let mut store = state.store.lock();
    store.update_design(patch);
    Json(store.cv_data().design.clone())
}

/// PATCH /api/v1/cv/sections/:section
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<SectionMeta>, AppError> {
    let key = section_from_path(&section)?;
    let mut store = state.store.lock();
    store.update_section(key, patch);
    Ok(Json(store.cv_data().sections.get(key)))
}

// ────────────────────────────────────────────────────────────────────────────
// Collection entities
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/entities/:section
pub async fn handle_add_entity(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let key = section_from_path(&section)?;
    let entity = add_by_key(&mut state.store.lock(), key)?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// PATCH /api/v1/cv/entities/:section/:id
///
/// An unknown id is not an error: the update is dropped and 204 returned.
pub async fn handle_update_entity(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<StatusCode, AppError> {
    let key = section_from_path(&section)?;
    update_by_key(&mut state.store.lock(), key, &id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cv/entities/:section/:id
pub async fn handle_remove_entity(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let key = section_from_path(&section)?;
    remove_by_key(&mut state.store.lock(), key, &id);
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// UI state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSectionRequest {
    pub active_section: Option<EditorPanel>,
}

/// GET /api/v1/ui
pub async fn handle_get_ui(State(state): State<AppState>) -> Json<UiState> {
    Json(state.store.lock().ui())
}

/// PUT /api/v1/ui/active-section
pub async fn handle_set_active_section(
    State(state): State<AppState>,
    Json(req): Json<ActiveSectionRequest>,
) -> Json<UiState> {
    let mut store = state.store.lock();
    store.set_active_section(req.active_section);
    Json(store.ui())
}

/// POST /api/v1/ui/preview-mode
pub async fn handle_toggle_preview_mode(State(state): State<AppState>) -> Json<UiState> {
    let mut store = state.store.lock();
    store.toggle_preview_mode();
    Json(store.ui())
}
