//! Template selection: resolves a template id to its style and renderer variant.
//!
//! Two distinct "not found" paths exist. An id missing from the catalog is a hard
//! [`RenderError::TemplateNotFound`] raised before any rendering happens. A known
//! template without a dedicated renderer variant quietly uses the default variant.

use thiserror::Error;
use tracing::debug;

use crate::models::resume::Resume;
use crate::templates::layout::RendererKind;
use crate::templates::registry::{self, TemplateDescriptor};
use crate::templates::render::render_document;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

impl RendererKind {
    /// The dedicated renderer for a template id, if one exists.
    pub fn for_template(template_id: &str) -> Option<Self> {
        match template_id {
            "modern-professional" => Some(RendererKind::ModernProfessional),
            "classic-executive" => Some(RendererKind::ClassicExecutive),
            "creative-portfolio" => Some(RendererKind::CreativePortfolio),
            "minimalist-clean" => Some(RendererKind::MinimalistClean),
            _ => None,
        }
    }

    /// Like [`RendererKind::for_template`] but falls back to [`RendererKind::DEFAULT`].
    pub fn resolve(template_id: &str) -> Self {
        Self::for_template(template_id).unwrap_or_else(|| {
            debug!("No dedicated renderer for template '{template_id}', using default");
            RendererKind::DEFAULT
        })
    }
}

/// Renders `resume` with a built-in template.
pub fn render(resume: &Resume, template_id: &str) -> Result<String, RenderError> {
    let template = registry::template_by_id(template_id)
        .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))?;
    Ok(render_with(resume, template))
}

/// Renders `resume` with an already-resolved template, built-in or user-defined.
pub fn render_with(resume: &Resume, template: &TemplateDescriptor) -> String {
    let kind = RendererKind::resolve(&template.id);
    debug!(
        "Rendering resume {:?} with template '{}' ({kind:?})",
        resume.id, template.id
    );
    render_document(resume, template, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Section, DEFAULT_TEMPLATE};
    use serde_json::json;

    fn jane() -> Resume {
        Resume {
            id: None,
            user_id: None,
            title: "Jane".to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            sections: vec![
                Section {
                    id: "p".to_string(),
                    kind: "personal-information".to_string(),
                    order: 0,
                    data: json!({ "fullName": "Jane Doe", "email": "jane@x.com" }),
                },
                Section {
                    id: "x".to_string(),
                    kind: "work-experience".to_string(),
                    order: 1,
                    data: json!({ "experiences": [{
                        "position": "Engineer", "company": "Acme", "startDate": "2021-05", "current": true
                    }]}),
                },
            ],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        assert_eq!(
            render(&jane(), "unknown-id"),
            Err(RenderError::TemplateNotFound("unknown-id".to_string()))
        );
    }

    #[test]
    fn test_every_builtin_renders() {
        for template in registry::all_templates() {
            let html = render(&jane(), &template.id).unwrap();
            assert!(html.contains("Jane Doe"));
            assert!(html.contains("Present"));
        }
    }

    #[test]
    fn test_builtins_have_dedicated_renderers() {
        for template in registry::all_templates() {
            assert!(RendererKind::for_template(&template.id).is_some());
        }
    }

    #[test]
    fn test_unmapped_template_falls_back_to_default_renderer() {
        let mut custom = registry::template_by_id("classic-executive").unwrap().clone();
        custom.id = "3f1c2a9e-user-defined".to_string();

        let html = render_with(&jane(), &custom);
        let default = render_document(&jane(), &custom, RendererKind::DEFAULT);
        assert_eq!(html, default);
        // Default structure, custom style tokens.
        assert!(html.contains("<div class=\"contact-item\">jane@x.com</div>"));
        assert!(html.contains("Georgia, serif"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        for template in registry::all_templates() {
            assert_eq!(
                render(&jane(), &template.id).unwrap(),
                render(&jane(), &template.id).unwrap()
            );
        }
    }
}
