pub mod health;

use axum::{routing::get, Router};

use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/preview",
            get(resumes::handle_preview_resume),
        )
        .route(
            "/api/v1/resumes/:id/export",
            get(resumes::handle_export_resume),
        )
        // Templates
        .route(
            "/api/v1/templates",
            get(templates::handle_list_templates).post(templates::handle_create_template),
        )
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        .with_state(state)
}
