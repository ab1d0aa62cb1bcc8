use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeInput};
use crate::storage::ResumeStore;

/// Process-local resume store for development and tests. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    resumes: RwLock<HashMap<Uuid, Resume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, input: ResumeInput) -> Result<Resume, AppError> {
        let id = Uuid::new_v4();
        let resume = input.into_resume(id, Utc::now());
        self.resumes.write().await.insert(id, resume.clone());
        Ok(resume)
    }

    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Resume>, AppError> {
        let guard = self.resumes.read().await;
        let mut resumes: Vec<Resume> = guard
            .values()
            .filter(|r| user_id.map_or(true, |uid| r.user_id == Some(uid)))
            .cloned()
            .collect();
        resumes.sort_by_key(|r| (r.created_at, r.id));
        Ok(resumes)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.resumes.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, input: ResumeInput) -> Result<Option<Resume>, AppError> {
        let mut guard = self.resumes.write().await;
        let Some(existing) = guard.get_mut(&id) else {
            return Ok(None);
        };

        let created_at = existing.created_at;
        let owner = input.user_id.or(existing.user_id);
        let mut updated = input.into_resume(id, Utc::now());
        updated.created_at = created_at;
        updated.user_id = owner;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.resumes.write().await.remove(&id).is_some())
    }
}
