use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::CustomTemplateInput;
use crate::templates::registry::{self, TemplateDescriptor, TemplateFilter};

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateDescriptor>,
}

#[derive(Serialize)]
pub struct TemplateResponse {
    pub template: TemplateDescriptor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreatedResponse {
    pub template_id: Uuid,
    pub message: String,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> Result<Json<TemplateListResponse>, AppError> {
    let mut templates: Vec<TemplateDescriptor> =
        registry::filtered(&filter).into_iter().cloned().collect();
    if let Some(store) = &state.templates {
        templates.extend(store.list(&filter).await?);
    }
    Ok(Json(TemplateListResponse { templates }))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateResponse>, AppError> {
    if let Some(template) = registry::template_by_id(&id) {
        return Ok(Json(TemplateResponse {
            template: template.clone(),
        }));
    }
    let custom = match &state.templates {
        Some(store) => store.get(&id).await?,
        None => None,
    };
    let template = custom.ok_or(AppError::TemplateNotFound(id))?;
    Ok(Json(TemplateResponse { template }))
}

/// POST /api/v1/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    Json(input): Json<CustomTemplateInput>,
) -> Result<(StatusCode, Json<TemplateCreatedResponse>), AppError> {
    let store = state.templates.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Database required for template creation".to_string())
    })?;
    input.validate()?;

    let template = store.create(input).await?;
    let template_id = Uuid::parse_str(&template.id)
        .map_err(|e| anyhow::anyhow!("stored template has a malformed id: {e}"))?;

    Ok((
        StatusCode::CREATED,
        Json(TemplateCreatedResponse {
            template_id,
            message: "Template created successfully".to_string(),
        }),
    ))
}
