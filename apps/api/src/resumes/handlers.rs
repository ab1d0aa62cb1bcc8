use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::export_filename;
use crate::models::resume::{Resume, ResumeInput};
use crate::state::AppState;
use crate::templates::{self, RenderError};

#[derive(Deserialize)]
pub struct ListQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<Resume>,
}

#[derive(Serialize)]
pub struct ResumeResponse {
    pub resume: Resume,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.resumes.list(params.user_id).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(input): Json<ResumeInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    input.validate()?;
    let resume = state.resumes.create(input).await?;
    let id = resume
        .id
        .ok_or_else(|| anyhow::anyhow!("store returned a resume without an id"))?;

    info!("Created resume {id} ({} backend)", state.resumes.backend());
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Resume created successfully".to_string(),
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut resume = load_resume(&state, id).await?;
    resume.sections = resume
        .sections_in_display_order()
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ResumeResponse { resume }))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ResumeInput>,
) -> Result<Json<MessageResponse>, AppError> {
    input.validate()?;
    state
        .resumes
        .update(id, input)
        .await?
        .ok_or_else(|| resume_not_found(id))?;

    Ok(Json(MessageResponse {
        message: "Resume updated successfully".to_string(),
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.resumes.delete(id).await? {
        return Err(resume_not_found(id));
    }
    info!("Deleted resume {id}");
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully".to_string(),
    }))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<TemplateQuery>,
) -> Result<Html<String>, AppError> {
    let resume = load_resume(&state, id).await?;
    let template_id = params.template.unwrap_or_else(|| resume.template.clone());
    let html = render_resume(&state, &resume, &template_id).await?;
    Ok(Html(html))
}

/// GET /api/v1/resumes/:id/export
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<TemplateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resume = load_resume(&state, id).await?;
    let template_id = params.template.unwrap_or_else(|| resume.template.clone());

    // An unknown template fails here, before a browser is ever launched.
    let html = render_resume(&state, &resume, &template_id).await?;
    let pdf = state.rasterizer.rasterize(&html).await?;

    info!("Exported resume {id} with template '{template_id}' ({} bytes)", pdf.len());
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&resume.title));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf),
    ))
}

async fn load_resume(state: &AppState, id: Uuid) -> Result<Resume, AppError> {
    state
        .resumes
        .get(id)
        .await?
        .ok_or_else(|| resume_not_found(id))
}

fn resume_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

/// Built-in templates first, then user-defined ones when a database is configured.
async fn render_resume(
    state: &AppState,
    resume: &Resume,
    template_id: &str,
) -> Result<String, AppError> {
    match templates::render(resume, template_id) {
        Ok(html) => Ok(html),
        Err(RenderError::TemplateNotFound(_)) => {
            let custom = match &state.templates {
                Some(store) => store.get(template_id).await?,
                None => None,
            };
            match custom {
                Some(template) => Ok(templates::render_with(resume, &template)),
                None => {
                    warn!("Requested unknown template '{template_id}'");
                    Err(AppError::TemplateNotFound(template_id.to_string()))
                }
            }
        }
    }
}
