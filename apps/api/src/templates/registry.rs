//! Built-in template catalog.
//!
//! The catalog is initialised once per process and never mutated. User-defined
//! templates live in the database (see `storage::templates`) and are looked up
//! separately by the HTTP layer.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontTokens {
    /// Body font stack.
    pub primary: String,
    pub secondary: String,
    pub headings: String,
}

/// CSS lengths, interpolated verbatim into the stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingTokens {
    pub section: String,
    pub item: String,
    pub compact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    Centered,
    Traditional,
    Creative,
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    pub columns: u8,
    pub sidebar: bool,
    pub header_style: HeaderStyle,
}

/// Visual tokens for one template. Renderers read it, never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub colors: ColorTokens,
    pub fonts: FontTokens,
    pub spacing: SpacingTokens,
    pub layout: LayoutParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub style: StyleDescriptor,
    pub is_public: bool,
    pub is_premium: bool,
    pub created_by: String,
    pub downloads: u64,
    pub rating: f32,
    pub tags: Vec<String>,
    pub preview: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional constraints applied when listing templates. Every `None` field matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub category: Option<String>,
    pub public: Option<bool>,
    pub premium: Option<bool>,
}

impl TemplateFilter {
    pub fn matches(&self, template: &TemplateDescriptor) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| template.category.eq_ignore_ascii_case(c))
            && self.public.map_or(true, |p| template.is_public == p)
            && self.premium.map_or(true, |p| template.is_premium == p)
    }
}

// 2024-01-01T00:00:00Z
const CATALOG_EPOCH_SECS: i64 = 1_704_067_200;

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    colors: [&'static str; 6],
    font: &'static str,
    spacing: [&'static str; 3],
    columns: u8,
    sidebar: bool,
    header_style: HeaderStyle,
    is_premium: bool,
    downloads: u64,
    rating: f32,
    tags: &'static [&'static str],
}

impl Seed {
    fn build(self) -> TemplateDescriptor {
        let [primary, secondary, accent, text, background, border] = self.colors;
        let [section, item, compact] = self.spacing;
        let stamp = DateTime::<Utc>::from_timestamp(CATALOG_EPOCH_SECS, 0).unwrap_or_default();
        TemplateDescriptor {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            style: StyleDescriptor {
                colors: ColorTokens {
                    primary: primary.to_string(),
                    secondary: secondary.to_string(),
                    accent: accent.to_string(),
                    text: text.to_string(),
                    background: background.to_string(),
                    border: border.to_string(),
                },
                fonts: FontTokens {
                    primary: self.font.to_string(),
                    secondary: self.font.to_string(),
                    headings: self.font.to_string(),
                },
                spacing: SpacingTokens {
                    section: section.to_string(),
                    item: item.to_string(),
                    compact: compact.to_string(),
                },
                layout: LayoutParams {
                    columns: self.columns,
                    sidebar: self.sidebar,
                    header_style: self.header_style,
                },
            },
            is_public: true,
            is_premium: self.is_premium,
            created_by: "system".to_string(),
            downloads: self.downloads,
            rating: self.rating,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            preview: format!("/templates/{}.png", self.id),
            created_at: stamp,
            updated_at: stamp,
        }
    }
}

static BUILTIN_TEMPLATES: Lazy<Vec<TemplateDescriptor>> = Lazy::new(|| {
    vec![
        Seed {
            id: "modern-professional",
            name: "Modern Professional",
            description: "Clean, modern design with blue accents perfect for tech and business professionals",
            category: "Modern",
            colors: ["#2563eb", "#64748b", "#3b82f6", "#1e293b", "#ffffff", "#e2e8f0"],
            font: "Inter, sans-serif",
            spacing: ["24px", "16px", "8px"],
            columns: 1,
            sidebar: false,
            header_style: HeaderStyle::Centered,
            is_premium: false,
            downloads: 1250,
            rating: 4.8,
            tags: &["professional", "modern", "clean", "blue"],
        }
        .build(),
        Seed {
            id: "classic-executive",
            name: "Classic Executive",
            description: "Traditional, elegant design with serif fonts ideal for executive and senior positions",
            category: "Classic",
            colors: ["#1f2937", "#6b7280", "#374151", "#111827", "#ffffff", "#d1d5db"],
            font: "Georgia, serif",
            spacing: ["28px", "18px", "10px"],
            columns: 1,
            sidebar: false,
            header_style: HeaderStyle::Traditional,
            is_premium: false,
            downloads: 980,
            rating: 4.6,
            tags: &["classic", "executive", "traditional", "serif"],
        }
        .build(),
        Seed {
            id: "creative-portfolio",
            name: "Creative Portfolio",
            description: "Vibrant, creative design with purple accents perfect for designers and creative professionals",
            category: "Creative",
            colors: ["#7c3aed", "#a78bfa", "#8b5cf6", "#1f2937", "#ffffff", "#e5e7eb"],
            font: "Poppins, sans-serif",
            spacing: ["32px", "20px", "12px"],
            columns: 2,
            sidebar: true,
            header_style: HeaderStyle::Creative,
            is_premium: false,
            downloads: 750,
            rating: 4.7,
            tags: &["creative", "portfolio", "colorful", "designer"],
        }
        .build(),
        Seed {
            id: "minimalist-clean",
            name: "Minimalist Clean",
            description: "Ultra-clean, minimal design with subtle accents for a sophisticated look",
            category: "Modern",
            colors: ["#000000", "#666666", "#333333", "#000000", "#ffffff", "#e0e0e0"],
            font: "Helvetica, Arial, sans-serif",
            spacing: ["36px", "14px", "6px"],
            columns: 1,
            sidebar: false,
            header_style: HeaderStyle::Minimal,
            is_premium: true,
            downloads: 420,
            rating: 4.9,
            tags: &["minimal", "clean", "black", "sophisticated"],
        }
        .build(),
    ]
});

pub fn all_templates() -> &'static [TemplateDescriptor] {
    &BUILTIN_TEMPLATES
}

pub fn template_by_id(id: &str) -> Option<&'static TemplateDescriptor> {
    BUILTIN_TEMPLATES.iter().find(|t| t.id == id)
}

/// Category comparison is case-insensitive ("modern" matches "Modern").
pub fn templates_by_category(category: &str) -> Vec<&'static TemplateDescriptor> {
    BUILTIN_TEMPLATES
        .iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category))
        .collect()
}

pub fn public_templates() -> Vec<&'static TemplateDescriptor> {
    BUILTIN_TEMPLATES.iter().filter(|t| t.is_public).collect()
}

pub fn premium_templates() -> Vec<&'static TemplateDescriptor> {
    BUILTIN_TEMPLATES.iter().filter(|t| t.is_premium).collect()
}

/// Narrows by the most selective lookup first, then applies the remaining constraints.
pub fn filtered(filter: &TemplateFilter) -> Vec<&'static TemplateDescriptor> {
    let candidates = match (filter.category.as_deref(), filter.premium, filter.public) {
        (Some(category), _, _) => templates_by_category(category),
        (None, Some(true), _) => premium_templates(),
        (None, _, Some(true)) => public_templates(),
        _ => all_templates().iter().collect(),
    };
    candidates.into_iter().filter(|t| filter.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_builtins() {
        let ids: Vec<&str> = all_templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "modern-professional",
                "classic-executive",
                "creative-portfolio",
                "minimalist-clean"
            ]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let template = template_by_id("classic-executive").unwrap();
        assert_eq!(template.style.fonts.primary, "Georgia, serif");
        assert_eq!(template.style.layout.header_style, HeaderStyle::Traditional);
        assert!(template_by_id("does-not-exist").is_none());
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let modern = templates_by_category("modern");
        assert_eq!(modern.len(), 2);
        assert!(templates_by_category("Unknown").is_empty());
    }

    #[test]
    fn test_premium_and_public_filters() {
        let premium: Vec<&str> = premium_templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(premium, vec!["minimalist-clean"]);
        assert_eq!(public_templates().len(), 4);
    }

    #[test]
    fn test_filtered_combines_constraints() {
        let modern_free = TemplateFilter {
            category: Some("MODERN".to_string()),
            premium: Some(false),
            public: None,
        };
        let ids: Vec<&str> = filtered(&modern_free).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["modern-professional"]);

        let private_premium = TemplateFilter {
            premium: Some(true),
            public: Some(false),
            ..Default::default()
        };
        assert!(filtered(&private_premium).is_empty());
        assert_eq!(filtered(&TemplateFilter::default()).len(), 4);
    }

    #[test]
    fn test_sidebar_template_declares_two_columns() {
        let creative = template_by_id("creative-portfolio").unwrap();
        assert_eq!(creative.style.layout.columns, 2);
        assert!(creative.style.layout.sidebar);
    }

    #[test]
    fn test_style_serializes_camel_case_layout() {
        let template = template_by_id("modern-professional").unwrap();
        let value = serde_json::to_value(&template.style.layout).unwrap();
        assert_eq!(value["headerStyle"], "centered");
    }
}
