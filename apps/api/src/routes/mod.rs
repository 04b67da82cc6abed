pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::forms::handlers as forms;
use crate::render::handlers as preview;
use crate::state::AppState;
use crate::store::handlers as cv;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/cv", get(cv::handle_get_cv))
        .route("/api/v1/cv/reset", post(cv::handle_reset))
        .route(
            "/api/v1/cv/personal-info",
            patch(cv::handle_update_personal_info),
        )
        .route(
            "/api/v1/cv/personal-info/photo",
            put(cv::handle_set_photo).delete(cv::handle_clear_photo),
        )
        .route("/api/v1/cv/design", patch(cv::handle_update_design))
        .route(
            "/api/v1/cv/sections/:section",
            patch(cv::handle_update_section),
        )
        .route("/api/v1/cv/entities/:section", post(cv::handle_add_entity))
        .route(
            "/api/v1/cv/entities/:section/:id",
            patch(cv::handle_update_entity).delete(cv::handle_remove_entity),
        )
        // Editor UI
        .route("/api/v1/ui", get(cv::handle_get_ui))
        .route("/api/v1/ui/active-section", put(cv::handle_set_active_section))
        .route("/api/v1/ui/preview-mode", post(cv::handle_toggle_preview_mode))
        // Forms
        .route("/api/v1/forms/:form", get(forms::handle_get_form))
        .route("/api/v1/forms/:form/:id/fields", post(forms::handle_edit_field))
        .route(
            "/api/v1/forms/:form/:id/achievements",
            post(forms::handle_add_achievement),
        )
        // Preview & export
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/preview/fill", get(preview::handle_page_fill))
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}
