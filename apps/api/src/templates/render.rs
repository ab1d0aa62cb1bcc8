//! The single parameterised renderer behind every template variant.
//!
//! Sections are located by kind and emitted in the profile's fixed order; the stored
//! section order only matters to the editor. A block whose payload or defining list
//! is empty emits nothing at all, heading included, and a column with no blocks is
//! not emitted either. Markup is built with `maud`, which escapes every interpolated
//! value.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::models::resume::{Resume, SectionKind};
use crate::templates::dates::{date_range, format_date, issued_range};
use crate::templates::layout::{
    Columns, ContactStyle, ItemHeader, LayoutProfile, ListStyle, RendererKind,
};
use crate::templates::registry::TemplateDescriptor;
use crate::templates::sections::{PersonalInfo, ResumeContent};

/// Renders a complete, self-contained HTML document.
pub fn render_document(
    resume: &Resume,
    template: &TemplateDescriptor,
    kind: RendererKind,
) -> String {
    let content = ResumeContent::extract(&resume.sections);
    let profile = kind.profile();

    let title = content
        .personal
        .as_ref()
        .and_then(|p| p.full_name.as_deref())
        .or_else(|| Some(resume.title.trim()).filter(|t| !t.is_empty()))
        .unwrap_or("Resume");

    let header = content.personal.as_ref().map(|p| header(&profile, p));
    let (first, second) = profile.column_order();
    let first = blocks(&profile, &content, first);
    let second = blocks(&profile, &content, second);

    let document = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(kind.stylesheet(&template.style))) }
            }
            body {
                div class="container" {
                    @match profile.columns {
                        Columns::Single => {
                            @if let Some(header) = &header { (header) }
                            @for block in &first { (block) }
                        }
                        Columns::Sidebar => {
                            @if header.is_some() || !first.is_empty() {
                                aside class="sidebar" {
                                    @if let Some(header) = &header { (header) }
                                    @for block in &first { (block) }
                                }
                            }
                            @if !second.is_empty() {
                                main class="main-content" {
                                    @for block in &second { (block) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    document.into_string()
}

fn header(profile: &LayoutProfile, personal: &PersonalInfo) -> Markup {
    let contacts = personal.contact_items();
    html! {
        header class="header" {
            @if let Some(name) = &personal.full_name {
                h1 class="name" { (name) }
            }
            @if !contacts.is_empty() {
                div class="contact-info" {
                    @match profile.contact {
                        ContactStyle::Chips | ContactStyle::Stacked => {
                            @for item in &contacts {
                                div class="contact-item" { (item) }
                            }
                        }
                        ContactStyle::Lines => {
                            (opt_div("contact-line", join_present(
                                &[personal.email.as_deref(), personal.phone.as_deref()],
                                " • ",
                            ).as_deref()))
                            (opt_div("contact-line", join_present(
                                &[
                                    personal.location.as_deref(),
                                    personal.website.as_deref(),
                                    personal.linkedin.as_deref(),
                                ],
                                " • ",
                            ).as_deref()))
                        }
                        ContactStyle::Inline => {
                            div class="contact-line" { (contacts.join(" / ")) }
                        }
                    }
                }
            }
        }
    }
}

fn blocks(profile: &LayoutProfile, content: &ResumeContent, order: &[SectionKind]) -> Vec<Markup> {
    order
        .iter()
        .filter_map(|&kind| match kind {
            // Rendered by `header`, never listed in a column order.
            SectionKind::PersonalInformation => None,
            SectionKind::ProfessionalSummary => summary(profile, content),
            SectionKind::WorkExperience => experience(profile, content),
            SectionKind::Education => education(profile, content),
            SectionKind::Skills => skills(profile, content),
            SectionKind::Projects => projects(profile, content),
            SectionKind::Certifications => certifications(profile, content),
            SectionKind::Languages => languages(profile, content),
        })
        .collect()
}

/// `<div class="..">text</div>`, or nothing when `text` is absent.
fn opt_div(class: &str, text: Option<&str>) -> Markup {
    html! {
        @if let Some(text) = text {
            div class=(class) { (text) }
        }
    }
}

fn section(profile: &LayoutProfile, kind: SectionKind, body: Markup) -> Markup {
    html! {
        section class=(format!("section {}", kind.as_str())) {
            @if let Some(heading) = profile.headings.for_kind(kind) {
                h2 class="section-title" { (heading) }
            }
            (body)
        }
    }
}

fn item_header(
    profile: &LayoutProfile,
    title: Option<&str>,
    subtitle_class: &str,
    subtitle: Option<&str>,
    date: Option<&str>,
) -> Markup {
    html! {
        div class="item-header" {
            @match profile.item_header {
                ItemHeader::Split => {
                    div {
                        (opt_div("item-title", title))
                        (opt_div(subtitle_class, subtitle))
                    }
                    (opt_div("item-date", date))
                }
                ItemHeader::Stacked => {
                    (opt_div("item-title", title))
                    (opt_div(subtitle_class, subtitle))
                    (opt_div("item-date", date))
                }
            }
        }
    }
}

fn summary(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    let summary = content.summary.as_deref()?;
    Some(section(
        profile,
        SectionKind::ProfessionalSummary,
        html! { div class="summary" { (summary) } },
    ))
}

fn experience(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.experience.is_empty() {
        return None;
    }
    let body = html! {
        @for item in &content.experience {
            div class="item experience-item" {
                (item_header(
                    profile,
                    item.position.as_deref(),
                    "item-company",
                    join_present(&[item.company.as_deref(), item.location.as_deref()], " • ").as_deref(),
                    date_range(
                        item.start_date.as_deref(),
                        item.end_date.as_deref(),
                        item.current,
                        profile.date_separator,
                    )
                    .as_deref(),
                ))
                (opt_div("item-description", item.description.as_deref()))
            }
        }
    };
    Some(section(profile, SectionKind::WorkExperience, body))
}

fn education(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.education.is_empty() {
        return None;
    }
    let body = html! {
        @for item in &content.education {
            @let title = match (item.degree.as_deref(), item.field.as_deref()) {
                (Some(degree), Some(field)) => Some(format!("{degree} in {field}")),
                (Some(degree), None) => Some(degree.to_string()),
                (None, field) => field.map(str::to_string),
            };
            @let dates = date_range(
                item.start_date.as_deref(),
                item.end_date.as_deref(),
                item.current,
                profile.date_separator,
            );
            @let gpa = item.gpa.as_deref().map(|gpa| format!("GPA: {gpa}"));
            div class="item education-item" {
                (item_header(profile, title.as_deref(), "item-school", item.school.as_deref(), dates.as_deref()))
                (opt_div("item-description", gpa.as_deref()))
                (opt_div("item-description", item.description.as_deref()))
            }
        }
    };
    Some(section(profile, SectionKind::Education, body))
}

fn skills(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.skills.is_empty() {
        return None;
    }
    let body = match profile.skills {
        ListStyle::Grid => html! {
            div class="skills-grid" {
                @for category in &content.skills {
                    div class="skill-category" {
                        (opt_div("skill-category-title", category.category.as_deref()))
                        span class="skill-list" { (category.skills.join(", ")) }
                    }
                }
            }
        },
        ListStyle::Inline => html! {
            div class="inline-list" {
                @for category in &content.skills {
                    (inline_line(category.category.as_deref(), Some(category.skills.join(", ").as_str())))
                }
            }
        },
    };
    Some(section(profile, SectionKind::Skills, body))
}

fn projects(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.projects.is_empty() {
        return None;
    }
    let body = html! {
        @for project in &content.projects {
            @let date = project.date.as_deref().map(format_date);
            div class="item project-item" {
                (item_header(
                    profile,
                    project.name.as_deref(),
                    "item-company",
                    project.technologies.as_deref(),
                    date.as_deref(),
                ))
                (opt_div("item-description", project.description.as_deref()))
                (opt_div("item-link", project.url.as_deref()))
            }
        }
    };
    Some(section(profile, SectionKind::Projects, body))
}

fn certifications(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.certifications.is_empty() {
        return None;
    }
    let body = html! {
        @for cert in &content.certifications {
            @let dates = issued_range(cert.date.as_deref(), cert.expiry_date.as_deref(), profile.date_separator);
            @let credential = cert.credential_id.as_deref().map(|id| format!("Credential ID: {id}"));
            div class="item cert-item" {
                (item_header(
                    profile,
                    cert.name.as_deref(),
                    "item-company",
                    cert.issuer.as_deref(),
                    dates.as_deref(),
                ))
                (opt_div("item-description", credential.as_deref()))
                (opt_div("item-link", cert.url.as_deref()))
            }
        }
    };
    Some(section(profile, SectionKind::Certifications, body))
}

fn languages(profile: &LayoutProfile, content: &ResumeContent) -> Option<Markup> {
    if content.languages.is_empty() {
        return None;
    }
    let body = match profile.skills {
        ListStyle::Grid => html! {
            div class="languages-grid" {
                @for lang in &content.languages {
                    div class="language-item" {
                        @if let Some(language) = &lang.language {
                            span class="language-name" { (language) }
                        }
                        @if let Some(level) = &lang.proficiency {
                            span class="language-level" { (level) }
                        }
                    }
                }
            }
        },
        ListStyle::Inline => html! {
            div class="inline-list" {
                @for lang in &content.languages {
                    (inline_line(lang.language.as_deref(), lang.proficiency.as_deref()))
                }
            }
        },
    };
    Some(section(profile, SectionKind::Languages, body))
}

/// `<div class="inline-line"><span class="inline-label">Label:</span> value</div>`
fn inline_line(label: Option<&str>, value: Option<&str>) -> Markup {
    html! {
        div class="inline-line" {
            @match (label, value) {
                (Some(label), Some(value)) => {
                    span class="inline-label" { (label) ":" }
                    " " (value)
                }
                (Some(only), None) | (None, Some(only)) => { (only) }
                (None, None) => {}
            }
        }
    }
}

fn join_present(parts: &[Option<&str>], separator: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().flatten().copied().collect();
    (!present.is_empty()).then(|| present.join(separator))
}
