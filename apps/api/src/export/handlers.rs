use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::export::{suggested_file_name, ExportReceipt};
use crate::render::render_document;
use crate::state::AppState;

/// POST /api/v1/export
///
/// Renders the current document and hands it to the configured exporter.
/// Rendering and the exporter's I/O run on the blocking pool.
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ExportReceipt>), AppError> {
    let snapshot = state.store.lock().snapshot();
    let exporter = Arc::clone(&state.exporter);
    let receipt = tokio::task::spawn_blocking(move || {
        let document = render_document(&snapshot);
        let file_name = suggested_file_name(&snapshot.personal_info);
        exporter.export(&document, &file_name)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;
    Ok((StatusCode::CREATED, Json(receipt)))
}
