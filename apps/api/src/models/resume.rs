use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Template used when a resume is created without one.
pub const DEFAULT_TEMPLATE: &str = "modern-professional";

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// The section kinds the renderers know how to present.
///
/// The editor schema may define more kinds; those stay plain strings on
/// [`Section::kind`] and are carried through storage untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    PersonalInformation,
    ProfessionalSummary,
    WorkExperience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::PersonalInformation,
        SectionKind::ProfessionalSummary,
        SectionKind::WorkExperience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::PersonalInformation => "personal-information",
            SectionKind::ProfessionalSummary => "professional-summary",
            SectionKind::WorkExperience => "work-experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// One editable block of a resume. `data` is free-form; its shape depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type", alias = "sectionId")]
    pub kind: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub data: Value,
}

impl Section {
    pub fn known_kind(&self) -> Option<SectionKind> {
        SectionKind::parse(&self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resume {
    /// Sections in editor display order. Renderers locate sections by kind and never use this.
    pub fn sections_in_display_order(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }
}

/// Client payload for creating or replacing a resume.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub title: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ResumeInput {
    /// Rejects payloads the editor should never produce: a blank title, duplicate
    /// section ids, or two sections of the same known kind.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        if self.template.trim().is_empty() {
            return Err(AppError::Validation("template cannot be empty".to_string()));
        }

        let mut ids = HashSet::new();
        let mut kinds = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(AppError::Validation("section id cannot be empty".to_string()));
            }
            if !ids.insert(section.id.as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if let Some(kind) = section.known_kind() {
                if !kinds.insert(kind) {
                    return Err(AppError::Validation(format!(
                        "resume may contain at most one '{}' section",
                        kind.as_str()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn into_resume(self, id: Uuid, now: DateTime<Utc>) -> Resume {
        Resume {
            id: Some(id),
            user_id: self.user_id,
            title: self.title.trim().to_string(),
            template: self.template,
            sections: self.sections,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub template: String,
    pub sections: Json<Vec<Section>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: Some(row.id),
            user_id: row.user_id,
            title: row.title,
            template: row.template,
            sections: row.sections.0,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
