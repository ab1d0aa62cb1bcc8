//! Per-variant layout profiles and stylesheets.
//!
//! A [`LayoutProfile`] captures the structural differences between the four renderer
//! variants. Everything colour, font or spacing related comes from the template's
//! [`StyleDescriptor`], so a user-defined template rendered with the default variant
//! still looks like itself.

use serde::Serialize;

use crate::models::resume::SectionKind;
use crate::templates::registry::{ColorTokens, FontTokens, SpacingTokens, StyleDescriptor};

/// The concrete renderer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    ModernProfessional,
    ClassicExecutive,
    CreativePortfolio,
    MinimalistClean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    Single,
    /// Sidebar column first, main column second.
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStyle {
    /// One chip per field on a centred row.
    Chips,
    /// Two lines joined with bullets: email and phone, then location, website and profile.
    Lines,
    /// One field per line.
    Stacked,
    /// Every field on a single line joined with slashes.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Boxed cards in a grid.
    Grid,
    /// "Category: a, b" lines.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHeader {
    /// Title and subtitle on the left, date on the right.
    Split,
    /// Title, subtitle and date stacked.
    Stacked,
}

#[derive(Debug, Clone, Copy)]
pub struct Headings {
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub certifications: &'static str,
    pub languages: &'static str,
}

impl Headings {
    pub fn for_kind(&self, kind: SectionKind) -> Option<&'static str> {
        match kind {
            SectionKind::PersonalInformation => None,
            SectionKind::ProfessionalSummary => Some(self.summary),
            SectionKind::WorkExperience => Some(self.experience),
            SectionKind::Education => Some(self.education),
            SectionKind::Skills => Some(self.skills),
            SectionKind::Projects => Some(self.projects),
            SectionKind::Certifications => Some(self.certifications),
            SectionKind::Languages => Some(self.languages),
        }
    }
}

const BODY_ORDER: &[SectionKind] = &[
    SectionKind::ProfessionalSummary,
    SectionKind::WorkExperience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Certifications,
    SectionKind::Languages,
];

const SIDEBAR_ORDER: &[SectionKind] = &[
    SectionKind::Skills,
    SectionKind::Education,
    SectionKind::Languages,
    SectionKind::Certifications,
];

const MAIN_ORDER: &[SectionKind] = &[
    SectionKind::ProfessionalSummary,
    SectionKind::WorkExperience,
    SectionKind::Projects,
];

#[derive(Debug, Clone, Copy)]
pub struct LayoutProfile {
    pub columns: Columns,
    pub contact: ContactStyle,
    pub skills: ListStyle,
    pub item_header: ItemHeader,
    pub date_separator: &'static str,
    pub headings: Headings,
}

impl LayoutProfile {
    /// Blocks rendered after the header, per column. Single-column layouts use only the first.
    pub fn column_order(&self) -> (&'static [SectionKind], &'static [SectionKind]) {
        match self.columns {
            Columns::Single => (BODY_ORDER, &[]),
            Columns::Sidebar => (SIDEBAR_ORDER, MAIN_ORDER),
        }
    }
}

impl RendererKind {
    pub const DEFAULT: RendererKind = RendererKind::ModernProfessional;

    pub fn profile(self) -> LayoutProfile {
        match self {
            RendererKind::ModernProfessional => LayoutProfile {
                columns: Columns::Single,
                contact: ContactStyle::Chips,
                skills: ListStyle::Grid,
                item_header: ItemHeader::Split,
                date_separator: " - ",
                headings: Headings {
                    summary: "Professional Summary",
                    experience: "Work Experience",
                    education: "Education",
                    skills: "Skills",
                    projects: "Projects",
                    certifications: "Certifications",
                    languages: "Languages",
                },
            },
            RendererKind::ClassicExecutive => LayoutProfile {
                columns: Columns::Single,
                contact: ContactStyle::Lines,
                skills: ListStyle::Inline,
                item_header: ItemHeader::Stacked,
                date_separator: " - ",
                headings: Headings {
                    summary: "Executive Summary",
                    experience: "Professional Experience",
                    education: "Education",
                    skills: "Core Competencies",
                    projects: "Selected Projects",
                    certifications: "Certifications",
                    languages: "Languages",
                },
            },
            RendererKind::CreativePortfolio => LayoutProfile {
                columns: Columns::Sidebar,
                contact: ContactStyle::Stacked,
                skills: ListStyle::Grid,
                item_header: ItemHeader::Stacked,
                date_separator: " - ",
                headings: Headings {
                    summary: "Creative Summary",
                    experience: "Experience",
                    education: "Education",
                    skills: "Skills",
                    projects: "Featured Projects",
                    certifications: "Certifications",
                    languages: "Languages",
                },
            },
            RendererKind::MinimalistClean => LayoutProfile {
                columns: Columns::Single,
                contact: ContactStyle::Inline,
                skills: ListStyle::Inline,
                item_header: ItemHeader::Split,
                date_separator: " – ",
                headings: Headings {
                    summary: "Summary",
                    experience: "Experience",
                    education: "Education",
                    skills: "Skills",
                    projects: "Projects",
                    certifications: "Certifications",
                    languages: "Languages",
                },
            },
        }
    }

    pub fn stylesheet(self, style: &StyleDescriptor) -> String {
        let mut css = base_css(style);
        css.push_str(&match self {
            RendererKind::ModernProfessional => modern_css(style),
            RendererKind::ClassicExecutive => classic_css(style),
            RendererKind::CreativePortfolio => creative_css(style),
            RendererKind::MinimalistClean => minimal_css(style),
        });
        css
    }
}

/// Page box, reset and print colour handling shared by every variant.
fn base_css(style: &StyleDescriptor) -> String {
    let ColorTokens {
        secondary,
        accent,
        text,
        background,
        ..
    } = &style.colors;
    let FontTokens {
        primary: body_font,
        secondary: detail_font,
        headings: heading_font,
    } = &style.fonts;
    let section_gap = &style.spacing.section;
    format!(
        r#"@page {{
  size: A4;
  margin: 0.5in;
}}
* {{
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}}
body {{
  font-family: {body_font};
  color: {text};
  background: {background};
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}}
.container {{
  max-width: 210mm;
  margin: 0 auto;
  background: {background};
}}
.section {{
  margin-bottom: {section_gap};
  break-inside: avoid;
}}
.section-title, .name {{
  font-family: {heading_font};
}}
.item-company, .item-school, .item-date {{
  font-family: {detail_font};
  color: {secondary};
}}
.item-link {{
  font-size: 10px;
  color: {accent};
  margin-top: 2px;
}}
"#
    )
}

fn modern_css(style: &StyleDescriptor) -> String {
    let ColorTokens {
        primary,
        secondary,
        border,
        ..
    } = &style.colors;
    let SpacingTokens {
        section,
        item,
        compact,
    } = &style.spacing;
    let mut css = format!(
        r#"body {{
  font-size: 11px;
  line-height: 1.4;
}}
.container {{
  padding: 20mm;
}}
.header {{
  text-align: center;
  margin-bottom: {section};
  padding-bottom: 20px;
  border-bottom: 2px solid {primary};
}}
.name {{
  font-size: 28px;
  font-weight: 700;
  color: {primary};
  margin-bottom: {compact};
}}
.contact-info {{
  display: flex;
  justify-content: center;
  gap: 20px;
  flex-wrap: wrap;
  font-size: 10px;
  color: {secondary};
}}
.section-title {{
  font-size: 16px;
  font-weight: 600;
  color: {primary};
  margin-bottom: 12px;
  padding-bottom: 4px;
  border-bottom: 1px solid {border};
}}
.summary {{
  line-height: 1.5;
  text-align: justify;
}}
.item {{
  margin-bottom: {item};
  padding-bottom: 12px;
  border-bottom: 1px solid {border};
}}
.item:last-child {{
  border-bottom: none;
  margin-bottom: 0;
}}
"#
    );
    css.push_str(&split_header_css("6px"));
    css.push_str(&format!(
        r#".item-title {{
  font-size: 13px;
  font-weight: 600;
  color: {primary};
}}
.item-company, .item-school {{
  font-size: 11px;
  font-weight: 500;
}}
.item-date {{
  font-size: 10px;
}}
.item-description {{
  font-size: 10px;
  margin-top: 4px;
}}
"#
    ));
    css.push_str(&boxed_grid_css(style, "150px"));
    css.push_str(
        r#"@media print {
  .container { margin: 0; padding: 15mm; }
  .name { font-size: 24px; }
  .section-title { font-size: 14px; }
}
"#,
    );
    css
}

fn classic_css(style: &StyleDescriptor) -> String {
    let ColorTokens {
        primary, secondary, ..
    } = &style.colors;
    let SpacingTokens {
        section,
        item,
        compact,
    } = &style.spacing;
    format!(
        r#"body {{
  font-size: 12px;
  line-height: 1.5;
}}
.container {{
  padding: 25mm;
}}
.header {{
  text-align: center;
  margin-bottom: {section};
  padding-bottom: 20px;
  border-bottom: 3px double {primary};
}}
.name {{
  font-size: 32px;
  font-weight: 400;
  letter-spacing: 1px;
  color: {primary};
  margin-bottom: 12px;
}}
.contact-info {{
  font-size: 11px;
  line-height: 1.4;
  color: {secondary};
}}
.section-title {{
  font-size: 18px;
  font-weight: 400;
  letter-spacing: 0.5px;
  color: {primary};
  margin-bottom: 16px;
  padding-bottom: 6px;
  border-bottom: 2px solid {primary};
}}
.summary {{
  line-height: 1.6;
  text-align: justify;
  font-style: italic;
}}
.item {{
  margin-bottom: {item};
}}
.item-header {{
  position: relative;
  margin-bottom: {compact};
}}
.item-title {{
  font-size: 14px;
  font-weight: 600;
  color: {primary};
  margin-bottom: 4px;
}}
.item-company, .item-school {{
  font-size: 12px;
  font-style: italic;
}}
.item-date {{
  position: absolute;
  top: 0;
  right: 0;
  font-size: 11px;
}}
.item-description {{
  font-size: 11px;
  text-align: justify;
  margin-top: {compact};
}}
.inline-list {{
  font-size: 11px;
  line-height: 1.6;
}}
.inline-label {{
  font-weight: 700;
}}
@media print {{
  .container {{ margin: 0; padding: 20mm; }}
}}
"#
    )
}

fn creative_css(style: &StyleDescriptor) -> String {
    let ColorTokens {
        primary,
        secondary,
        accent,
        background,
        ..
    } = &style.colors;
    let SpacingTokens { item, compact, .. } = &style.spacing;
    format!(
        r#"body {{
  font-size: 11px;
  line-height: 1.4;
}}
.container {{
  padding: 20mm;
  display: grid;
  grid-template-columns: 1fr 2fr;
  gap: 30px;
}}
.sidebar {{
  background: linear-gradient(135deg, {primary}15, {accent}15);
  padding: 20px;
  border-radius: 10px;
  border-left: 4px solid {primary};
}}
.main-content {{
  padding: 10px;
}}
.header {{
  text-align: left;
  margin-bottom: 30px;
}}
.name {{
  font-size: 26px;
  font-weight: 700;
  color: {primary};
  margin-bottom: {compact};
}}
.contact-info {{
  font-size: 10px;
  line-height: 1.6;
  color: {secondary};
}}
.section {{
  margin-bottom: 25px;
}}
.section-title {{
  font-size: 14px;
  font-weight: 600;
  color: {primary};
  margin-bottom: 12px;
  padding: 8px 12px;
  background: linear-gradient(90deg, {primary}20, transparent);
  border-left: 3px solid {primary};
}}
.sidebar .section-title {{
  font-size: 12px;
  background: {primary}30;
  border-radius: 6px;
  border-left: none;
}}
.summary {{
  line-height: 1.5;
  text-align: justify;
}}
.item {{
  margin-bottom: {item};
  padding: 12px;
  background: {background};
  border-radius: 6px;
  border-left: 3px solid {accent};
}}
.item-title {{
  font-size: 12px;
  font-weight: 600;
  color: {primary};
  margin-bottom: 4px;
}}
.item-company, .item-school {{
  font-size: 10px;
  font-weight: 500;
  margin-bottom: 2px;
}}
.item-date {{
  display: inline-block;
  font-size: 9px;
  background: {primary}20;
  padding: 2px 6px;
  border-radius: 3px;
  margin-bottom: 6px;
}}
.item-description {{
  font-size: 10px;
}}
.skills-grid, .languages-grid {{
  display: grid;
  gap: {compact};
}}
.skill-category, .language-item {{
  background: {primary}10;
  border: 1px solid {primary}30;
  border-radius: 6px;
  padding: 8px;
}}
.skill-category-title, .language-name {{
  font-size: 10px;
  font-weight: 600;
  color: {primary};
}}
.skill-list, .language-level {{
  display: block;
  font-size: 9px;
  line-height: 1.3;
}}
@media print {{
  .container {{ margin: 0; padding: 15mm; gap: 20px; }}
}}
"#
    )
}

fn minimal_css(style: &StyleDescriptor) -> String {
    let ColorTokens {
        primary, secondary, ..
    } = &style.colors;
    let SpacingTokens { item, compact, .. } = &style.spacing;
    let mut css = format!(
        r#"body {{
  font-size: 11px;
  line-height: 1.6;
  font-weight: 300;
}}
.container {{
  padding: 30mm;
}}
.header {{
  margin-bottom: 40px;
}}
.name {{
  font-size: 24px;
  font-weight: 300;
  letter-spacing: 2px;
  color: {primary};
  margin-bottom: 10px;
}}
.contact-info {{
  font-size: 10px;
  color: {secondary};
}}
.section-title {{
  font-size: 12px;
  font-weight: 400;
  text-transform: uppercase;
  letter-spacing: 1px;
  color: {primary};
  margin-bottom: 20px;
}}
.summary {{
  line-height: 1.7;
}}
.item {{
  margin-bottom: {item};
  padding-bottom: {item};
}}
"#
    );
    css.push_str(&split_header_css("5px"));
    css.push_str(&format!(
        r#".item-title {{
  font-size: 12px;
  font-weight: 400;
  color: {primary};
}}
.item-company, .item-school {{
  font-size: 10px;
}}
.item-date {{
  font-size: 9px;
}}
.item-description {{
  font-size: 10px;
  margin-top: {compact};
}}
.inline-list {{
  font-size: 10px;
  line-height: 1.8;
}}
@media print {{
  .container {{ margin: 0; padding: 25mm; }}
}}
"#
    ));
    css
}

fn split_header_css(gap: &str) -> String {
    format!(
        r#".item-header {{
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  margin-bottom: {gap};
}}
"#
    )
}

fn boxed_grid_css(style: &StyleDescriptor, min_width: &str) -> String {
    let ColorTokens {
        primary,
        background,
        border,
        ..
    } = &style.colors;
    format!(
        r#".skills-grid, .languages-grid {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax({min_width}, 1fr));
  gap: 12px;
}}
.skill-category, .language-item {{
  background: {background};
  border: 1px solid {border};
  border-radius: 4px;
  padding: 8px;
}}
.skill-category-title, .language-name {{
  font-size: 11px;
  font-weight: 600;
  color: {primary};
  margin-bottom: 4px;
}}
.skill-list, .language-level {{
  display: block;
  font-size: 10px;
  line-height: 1.3;
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::registry::template_by_id;

    const ALL_KINDS: [RendererKind; 4] = [
        RendererKind::ModernProfessional,
        RendererKind::ClassicExecutive,
        RendererKind::CreativePortfolio,
        RendererKind::MinimalistClean,
    ];

    #[test]
    fn test_every_profile_covers_every_body_section() {
        for kind in ALL_KINDS {
            let (first, second) = kind.profile().column_order();
            for section in &BODY_ORDER[..] {
                assert!(
                    first.contains(section) || second.contains(section),
                    "{kind:?} drops {section:?}"
                );
            }
        }
    }

    #[test]
    fn test_only_creative_uses_sidebar() {
        for kind in ALL_KINDS {
            let sidebar = kind.profile().columns == Columns::Sidebar;
            assert_eq!(sidebar, kind == RendererKind::CreativePortfolio);
        }
    }

    #[test]
    fn test_minimal_uses_en_dash() {
        assert_eq!(RendererKind::MinimalistClean.profile().date_separator, " – ");
    }

    #[test]
    fn test_stylesheet_interpolates_style_tokens() {
        let style = &template_by_id("classic-executive").unwrap().style;
        let css = RendererKind::ClassicExecutive.stylesheet(style);
        assert!(css.contains("border-bottom: 3px double #1f2937"));
        assert!(css.contains("font-family: Georgia, serif"));
        assert!(css.contains("size: A4"));
    }

    #[test]
    fn test_same_variant_different_style_changes_only_tokens() {
        let modern = &template_by_id("modern-professional").unwrap().style;
        let minimal = &template_by_id("minimalist-clean").unwrap().style;
        let a = RendererKind::ModernProfessional.stylesheet(modern);
        let b = RendererKind::ModernProfessional.stylesheet(minimal);
        assert_ne!(a, b);
        assert!(b.contains("#e0e0e0"));
        assert!(!b.contains("#2563eb"));
    }
}
