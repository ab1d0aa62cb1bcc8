use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeInput, ResumeRow};
use crate::storage::ResumeStore;

/// Resumes in the `resumes` table; sections are stored as a single JSONB array.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, input: ResumeInput) -> Result<Resume, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, title, template, sections)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.user_id)
        .bind(input.title.trim())
        .bind(&input.template)
        .bind(Json(&input.sections))
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume {}", row.id);
        Ok(row.into())
    }

    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Resume>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT * FROM resumes
            WHERE $1::uuid IS NULL OR user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Resume::from))
    }

    async fn update(&self, id: Uuid, input: ResumeInput) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes
            SET title = $2,
                template = $3,
                sections = $4,
                user_id = COALESCE($5, user_id),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.trim())
        .bind(&input.template)
        .bind(Json(&input.sections))
        .bind(input.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Resume::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
