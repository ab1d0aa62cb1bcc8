//! User-defined templates. These always render with the default renderer variant,
//! styled by their own tokens.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::templates::registry::{StyleDescriptor, TemplateDescriptor, TemplateFilter};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplateInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub style: StyleDescriptor,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub preview: String,
}

impl CustomTemplateInput {
    /// Style tokens are interpolated raw into the stylesheet, so anything that could
    /// close a declaration, rule, or the `<style>` element is rejected.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::Validation("category cannot be empty".to_string()));
        }

        let s = &self.style;
        let tokens = [
            &s.colors.primary,
            &s.colors.secondary,
            &s.colors.accent,
            &s.colors.text,
            &s.colors.background,
            &s.colors.border,
            &s.fonts.primary,
            &s.fonts.secondary,
            &s.fonts.headings,
            &s.spacing.section,
            &s.spacing.item,
            &s.spacing.compact,
        ];
        if let Some(bad) = tokens
            .iter()
            .find(|t| t.trim().is_empty() || t.contains(['<', '>', '{', '}', ';']))
        {
            return Err(AppError::Validation(format!("invalid style token '{bad}'")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, FromRow)]
struct CustomTemplateRow {
    id: Uuid,
    name: String,
    description: String,
    category: String,
    style: Json<StyleDescriptor>,
    is_public: bool,
    is_premium: bool,
    created_by: String,
    downloads: i64,
    rating: f32,
    tags: Vec<String>,
    preview: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomTemplateRow> for TemplateDescriptor {
    fn from(row: CustomTemplateRow) -> Self {
        TemplateDescriptor {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            category: row.category,
            style: row.style.0,
            is_public: row.is_public,
            is_premium: row.is_premium,
            created_by: row.created_by,
            downloads: u64::try_from(row.downloads).unwrap_or_default(),
            rating: row.rating,
            tags: row.tags,
            preview: row.preview,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CustomTemplateInput) -> Result<TemplateDescriptor, AppError> {
        let row = sqlx::query_as::<_, CustomTemplateRow>(
            r#"
            INSERT INTO custom_templates
                (id, name, description, category, style, is_public, is_premium,
                 created_by, tags, preview)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.category.trim())
        .bind(Json(&input.style))
        .bind(input.is_public)
        .bind(input.is_premium)
        .bind(input.created_by.as_deref().unwrap_or("anonymous"))
        .bind(&input.tags)
        .bind(&input.preview)
        .fetch_one(&self.pool)
        .await?;

        info!("Created custom template {} ({})", row.id, row.name);
        Ok(row.into())
    }

    pub async fn list(&self, filter: &TemplateFilter) -> Result<Vec<TemplateDescriptor>, AppError> {
        let rows = sqlx::query_as::<_, CustomTemplateRow>(
            r#"
            SELECT * FROM custom_templates
            WHERE ($1::text IS NULL OR lower(category) = lower($1))
              AND ($2::bool IS NULL OR is_public = $2)
              AND ($3::bool IS NULL OR is_premium = $3)
            ORDER BY created_at, id
            "#,
        )
        .bind(filter.category.as_deref())
        .bind(filter.public)
        .bind(filter.premium)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TemplateDescriptor::from).collect())
    }

    /// Non-UUID ids can never name a stored template and resolve to `None`.
    pub async fn get(&self, id: &str) -> Result<Option<TemplateDescriptor>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let row = sqlx::query_as::<_, CustomTemplateRow>("SELECT * FROM custom_templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TemplateDescriptor::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::registry::template_by_id;

    fn input() -> CustomTemplateInput {
        CustomTemplateInput {
            name: "Teal".to_string(),
            description: String::new(),
            category: "Modern".to_string(),
            style: template_by_id("modern-professional").unwrap().style.clone(),
            is_public: true,
            is_premium: false,
            created_by: None,
            tags: vec![],
            preview: String::new(),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_style_token_injection_is_rejected() {
        let mut bad = input();
        bad.style.colors.primary = "red;}</style><script>".to_string();
        assert!(matches!(bad.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut bad = input();
        bad.name = " ".to_string();
        assert!(matches!(bad.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let style = serde_json::to_value(&input().style).unwrap();
        let parsed: CustomTemplateInput = serde_json::from_value(serde_json::json!({
            "name": "Mine",
            "category": "Creative",
            "style": style
        }))
        .unwrap();
        assert!(parsed.is_public);
        assert!(!parsed.is_premium);
        assert!(parsed.tags.is_empty());
    }
}
