use std::sync::Arc;

use crate::export::PdfRasterizer;
use crate::storage::{PgTemplateStore, ResumeStore, Storage};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    /// Custom template persistence. Absent when running without a database.
    pub templates: Option<PgTemplateStore>,
    pub rasterizer: Arc<dyn PdfRasterizer>,
}

impl AppState {
    pub fn new(storage: Storage, rasterizer: Arc<dyn PdfRasterizer>) -> Self {
        AppState {
            resumes: storage.resumes,
            templates: storage.templates,
            rasterizer,
        }
    }
}
