//! Resume and template persistence.
//!
//! The backend is chosen exactly once at startup. With `DATABASE_URL` set, everything
//! goes to Postgres and a connection failure aborts startup; without it, resumes live in
//! process memory. There is no per-request fallback between the two.

pub mod memory;
pub mod postgres;
pub mod templates;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeInput};

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;
pub use templates::{CustomTemplateInput, PgTemplateStore};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn create(&self, input: ResumeInput) -> Result<Resume, AppError>;

    /// All resumes, oldest first, optionally restricted to one owner.
    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Resume>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    /// Replaces a resume's content. `None` when `id` does not exist.
    async fn update(&self, id: Uuid, input: ResumeInput) -> Result<Option<Resume>, AppError>;

    /// `false` when `id` does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

/// The storage backends selected for this process.
#[derive(Clone)]
pub struct Storage {
    pub resumes: Arc<dyn ResumeStore>,
    /// User-defined templates need a database; `None` in in-memory mode.
    pub templates: Option<PgTemplateStore>,
}

impl Storage {
    pub fn in_memory() -> Self {
        Storage {
            resumes: Arc::new(MemoryResumeStore::new()),
            templates: None,
        }
    }
}

/// Selects and initialises the storage backend from configuration.
pub async fn connect(config: &Config) -> Result<Storage> {
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL storage");
            Ok(Storage {
                resumes: Arc::new(PgResumeStore::new(pool.clone())),
                templates: Some(PgTemplateStore::new(pool)),
            })
        }
        None => {
            warn!("DATABASE_URL not set: resumes are kept in memory and lost on restart");
            Ok(Storage::in_memory())
        }
    }
}
