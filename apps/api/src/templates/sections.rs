//! Section data extraction.
//!
//! Payloads arrive straight from the editor as untyped JSON. Every accessor here is
//! lenient: a missing key, a wrong type, or a blank string all read as "absent". A list
//! item is kept as long as any one of its fields is present, so a project with only a
//! description still shows up. Nothing in this module fails.

use serde_json::Value;

use crate::models::resume::{Section, SectionKind};

/// Returns the payload of the first section of `kind`, if any.
pub fn find_section(sections: &[Section], kind: SectionKind) -> Option<&Value> {
    sections
        .iter()
        .find(|s| s.known_kind() == Some(kind))
        .map(|s| &s.data)
}

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_any(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(value, key))
}

fn flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn items<'a>(payload: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| item.is_object())
}

fn any_present(fields: &[&Option<String>]) -> bool {
    fields.iter().any(|field| field.is_some())
}

/// Accepts `["a", "b"]` or `"a, b"`.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
}

impl PersonalInfo {
    fn from_payload(payload: &Value) -> Option<Self> {
        let info = PersonalInfo {
            full_name: text(payload, "fullName"),
            email: text(payload, "email"),
            phone: text(payload, "phone"),
            location: text(payload, "location"),
            website: text(payload, "website"),
            linkedin: text(payload, "linkedin"),
        };
        (info != PersonalInfo::default()).then_some(info)
    }

    /// Contact fields in display order, skipping the absent ones.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.website,
            &self.linkedin,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceItem {
    pub position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationItem {
    pub degree: Option<String>,
    pub school: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategory {
    pub category: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem {
    pub name: Option<String>,
    pub technologies: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificationItem {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageItem {
    pub language: Option<String>,
    pub proficiency: Option<String>,
}

/// Everything a renderer needs, pulled out of a resume's sections once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeContent {
    pub personal: Option<PersonalInfo>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<CertificationItem>,
    pub languages: Vec<LanguageItem>,
}

impl ResumeContent {
    pub fn extract(sections: &[Section]) -> Self {
        let payload = |kind| find_section(sections, kind);

        ResumeContent {
            personal: payload(SectionKind::PersonalInformation)
                .and_then(PersonalInfo::from_payload),
            summary: payload(SectionKind::ProfessionalSummary)
                .and_then(|p| text_any(p, &["summary", "content"])),
            experience: payload(SectionKind::WorkExperience)
                .map(extract_experience)
                .unwrap_or_default(),
            education: payload(SectionKind::Education)
                .map(extract_education)
                .unwrap_or_default(),
            skills: payload(SectionKind::Skills)
                .map(extract_skills)
                .unwrap_or_default(),
            projects: payload(SectionKind::Projects)
                .map(extract_projects)
                .unwrap_or_default(),
            certifications: payload(SectionKind::Certifications)
                .map(extract_certifications)
                .unwrap_or_default(),
            languages: payload(SectionKind::Languages)
                .map(extract_languages)
                .unwrap_or_default(),
        }
    }
}

fn extract_experience(payload: &Value) -> Vec<ExperienceItem> {
    items(payload, "experiences")
        .map(|item| ExperienceItem {
            position: text(item, "position"),
            company: text(item, "company"),
            location: text(item, "location"),
            start_date: text(item, "startDate"),
            end_date: text(item, "endDate"),
            current: flag(item, "current"),
            description: text(item, "description"),
        })
        .filter(|e| {
            e.current
                || any_present(&[
                    &e.position,
                    &e.company,
                    &e.location,
                    &e.start_date,
                    &e.end_date,
                    &e.description,
                ])
        })
        .collect()
}

fn extract_education(payload: &Value) -> Vec<EducationItem> {
    items(payload, "education")
        .map(|item| EducationItem {
            degree: text(item, "degree"),
            school: text_any(item, &["school", "institution"]),
            field: text(item, "field"),
            start_date: text(item, "startDate"),
            end_date: text(item, "endDate"),
            current: flag(item, "current"),
            gpa: text(item, "gpa"),
            description: text(item, "description"),
        })
        .filter(|e| {
            e.current
                || any_present(&[
                    &e.degree,
                    &e.school,
                    &e.field,
                    &e.start_date,
                    &e.end_date,
                    &e.gpa,
                    &e.description,
                ])
        })
        .collect()
}

fn extract_skills(payload: &Value) -> Vec<SkillCategory> {
    items(payload, "skillCategories")
        .map(|item| SkillCategory {
            category: text(item, "category"),
            skills: string_list(item, "skills"),
        })
        .filter(|c| !c.skills.is_empty())
        .collect()
}

fn extract_projects(payload: &Value) -> Vec<ProjectItem> {
    items(payload, "projects")
        .map(|item| ProjectItem {
            name: text(item, "name"),
            technologies: text(item, "technologies"),
            date: text(item, "date"),
            url: text(item, "url"),
            description: text(item, "description"),
        })
        .filter(|p| any_present(&[&p.name, &p.technologies, &p.date, &p.url, &p.description]))
        .collect()
}

fn extract_certifications(payload: &Value) -> Vec<CertificationItem> {
    items(payload, "certifications")
        .map(|item| CertificationItem {
            name: text(item, "name"),
            issuer: text(item, "issuer"),
            date: text(item, "date"),
            expiry_date: text(item, "expiryDate"),
            credential_id: text(item, "credentialId"),
            url: text(item, "url"),
        })
        .filter(|c| {
            any_present(&[
                &c.name,
                &c.issuer,
                &c.date,
                &c.expiry_date,
                &c.credential_id,
                &c.url,
            ])
        })
        .collect()
}

fn extract_languages(payload: &Value) -> Vec<LanguageItem> {
    items(payload, "languages")
        .map(|item| LanguageItem {
            language: text(item, "language"),
            proficiency: text(item, "proficiency"),
        })
        .filter(|l| any_present(&[&l.language, &l.proficiency]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(kind: &str, data: Value) -> Section {
        Section {
            id: format!("{kind}-1"),
            kind: kind.to_string(),
            order: 0,
            data,
        }
    }

    #[test]
    fn test_find_section_returns_first_match() {
        let sections = vec![
            section("skills", json!({ "n": 1 })),
            section("skills", json!({ "n": 2 })),
        ];
        let found = find_section(&sections, SectionKind::Skills).unwrap();
        assert_eq!(found["n"], 1);
        assert!(find_section(&sections, SectionKind::Education).is_none());
    }

    #[test]
    fn test_extract_from_empty_sections() {
        assert_eq!(ResumeContent::extract(&[]), ResumeContent::default());
    }

    #[test]
    fn test_blank_personal_info_is_absent() {
        let sections = vec![section(
            "personal-information",
            json!({ "fullName": "   ", "email": "" }),
        )];
        assert!(ResumeContent::extract(&sections).personal.is_none());
    }

    #[test]
    fn test_contact_items_skip_missing_fields() {
        let sections = vec![section(
            "personal-information",
            json!({ "fullName": "Jane Doe", "email": "jane@x.com", "website": "jane.dev" }),
        )];
        let personal = ResumeContent::extract(&sections).personal.unwrap();
        assert_eq!(personal.contact_items(), vec!["jane@x.com", "jane.dev"]);
    }

    #[test]
    fn test_summary_accepts_content_alias() {
        let sections = vec![section(
            "professional-summary",
            json!({ "content": "Builder of things." }),
        )];
        assert_eq!(
            ResumeContent::extract(&sections).summary.as_deref(),
            Some("Builder of things.")
        );
    }

    #[test]
    fn test_malformed_lists_are_tolerated() {
        let sections = vec![
            section("work-experience", json!({ "experiences": "not a list" })),
            section("education", json!({ "education": [42, null, { "degree": "BSc" }] })),
            section("skills", json!(null)),
        ];
        let content = ResumeContent::extract(&sections);
        assert!(content.experience.is_empty());
        assert_eq!(content.education.len(), 1);
        assert!(content.skills.is_empty());
    }

    #[test]
    fn test_skills_accept_array_or_comma_string() {
        let sections = vec![section(
            "skills",
            json!({ "skillCategories": [
                { "category": "Languages", "skills": ["Rust", " Go "] },
                { "category": "Tools", "skills": "Git, Docker ,," },
                { "category": "Empty", "skills": [] }
            ]}),
        )];
        let skills = ResumeContent::extract(&sections).skills;
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].skills, vec!["Rust", "Go"]);
        assert_eq!(skills[1].skills, vec!["Git", "Docker"]);
    }

    #[test]
    fn test_numeric_gpa_and_institution_alias() {
        let sections = vec![section(
            "education",
            json!({ "education": [{ "degree": "MSc", "institution": "MIT", "gpa": 3.9 }] }),
        )];
        let education = ResumeContent::extract(&sections).education;
        assert_eq!(education[0].school.as_deref(), Some("MIT"));
        assert_eq!(education[0].gpa.as_deref(), Some("3.9"));
    }

    #[test]
    fn test_experience_current_flag() {
        let sections = vec![section(
            "work-experience",
            json!({ "experiences": [
                { "position": "Engineer", "company": "Acme", "current": true },
                { "position": "  ", "company": "" }
            ]}),
        )];
        let experience = ResumeContent::extract(&sections).experience;
        assert_eq!(experience.len(), 1);
        assert!(experience[0].current);
    }

    #[test]
    fn test_untitled_items_are_kept() {
        let sections = vec![
            section(
                "work-experience",
                json!({ "experiences": [
                    { "startDate": "2020-01", "current": true, "description": "Freelance consulting" }
                ]}),
            ),
            section(
                "projects",
                json!({ "projects": [
                    { "description": "Built a compiler", "url": "https://example.org/cc" }
                ]}),
            ),
            section("certifications", json!({ "certifications": [{ "issuer": "CNCF" }] })),
            section("languages", json!({ "languages": [{ "proficiency": "Fluent" }] })),
        ];
        let content = ResumeContent::extract(&sections);
        assert_eq!(content.experience.len(), 1);
        assert!(content.experience[0].position.is_none());
        assert_eq!(
            content.experience[0].description.as_deref(),
            Some("Freelance consulting")
        );
        assert_eq!(content.projects.len(), 1);
        assert_eq!(content.projects[0].url.as_deref(), Some("https://example.org/cc"));
        assert_eq!(content.certifications.len(), 1);
        assert_eq!(content.languages.len(), 1);
    }

    #[test]
    fn test_items_with_no_fields_are_dropped() {
        let sections = vec![section(
            "projects",
            json!({ "projects": [{ "name": " ", "url": "" }, {}] }),
        )];
        assert!(ResumeContent::extract(&sections).projects.is_empty());
    }

    #[test]
    fn test_unknown_kinds_are_ignored() {
        let sections = vec![section("hobbies", json!({ "hobbies": ["chess"] }))];
        assert_eq!(ResumeContent::extract(&sections), ResumeContent::default());
    }
}
