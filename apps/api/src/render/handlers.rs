use axum::{extract::State, response::Html, Json};

use crate::layout::PageFillReport;
use crate::render::render_document;
use crate::state::AppState;

/// GET /api/v1/preview
///
/// The live preview: a standalone page for the current document.
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.store.lock().snapshot();
    Html(render_document(&snapshot).standalone_html())
}

/// GET /api/v1/preview/fill
pub async fn handle_page_fill(State(state): State<AppState>) -> Json<PageFillReport> {
    let snapshot = state.store.lock().snapshot();
    Json(render_document(&snapshot).page_fill)
}
