//! The explicit optional-field schema the assembler renders from.
//!
//! Every field is either present with a non-blank value or absent. Blank strings,
//! empty collections and entries with no usable content all collapse to absence,
//! so nothing downstream ever has to render a placeholder.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvRecord {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<ProfileLink>,
    pub professional_statement: Option<String>,
    pub work_experience: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub languages_known: Vec<String>,
    pub additional_sections: Vec<AdditionalSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLink {
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            start: text(map, "start_date"),
            end: text(map, "end_date"),
        }
    }

    /// `start - end`, or `start - Present` for an open range. Nothing without a start.
    pub fn display(&self) -> Option<String> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            (Some(start), None) => Some(format!("{start} - Present")),
            (None, _) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkEntry {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub dates: DateRange,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationEntry {
    pub university_name: Option<String>,
    pub course: Option<String>,
    pub discipline: Option<String>,
    pub results: Option<String>,
    pub dates: DateRange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEntry {
    pub title: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Certification {
    pub name: Option<String>,
    pub organisation: Option<String>,
    pub date: Option<String>,
    pub cert_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalSection {
    pub title: String,
    pub body: String,
}

impl CvRecord {
    /// Reads a record from a decoded model response. `None` when the value is not
    /// a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_map)
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            full_name: text(map, "full_name"),
            email: text(map, "email"),
            phone: text(map, "phone"),
            location: text(map, "location"),
            links: profile_links(map.get("links")),
            professional_statement: text(map, "professional_statement"),
            work_experience: objects(map, "work_experience")
                .map(|m| WorkEntry {
                    job_title: text(m, "job_title"),
                    company_name: text(m, "company_name"),
                    dates: DateRange::from_map(m),
                    responsibilities: text_list(m.get("responsibilities")),
                    achievements: text_list(m.get("achievements")),
                })
                .filter(|e| *e != WorkEntry::default())
                .collect(),
            education: objects(map, "education")
                .map(|m| EducationEntry {
                    university_name: text(m, "university_name"),
                    course: text(m, "course"),
                    discipline: text(m, "discipline"),
                    results: text(m, "results"),
                    dates: DateRange::from_map(m),
                })
                .filter(|e| *e != EducationEntry::default())
                .collect(),
            projects: objects(map, "projects")
                .map(|m| ProjectEntry {
                    title: text(m, "title"),
                    project_type: text(m, "type"),
                    description: text(m, "description"),
                    link: text(m, "link"),
                })
                .filter(|e| *e != ProjectEntry::default())
                .collect(),
            skills: text_list(map.get("skills")),
            certifications: objects(map, "certifications")
                .map(|m| Certification {
                    name: text(m, "name"),
                    organisation: text(m, "organisation").or_else(|| text(m, "organization")),
                    date: text(m, "date"),
                    cert_type: text(m, "type"),
                })
                .filter(|c| *c != Certification::default())
                .collect(),
            languages_known: text_list(map.get("languages_known")),
            additional_sections: objects(map, "additionalSec")
                .filter_map(|m| {
                    Some(AdditionalSection {
                        title: text(m, "title")?,
                        body: text(m, "desc")?,
                    })
                })
                .collect(),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Strings and numbers read as text; anything else is absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_text)
}

/// A list of strings. An object of lists (e.g. `{"technical_skills": [...],
/// "soft_skills": [...]}`) is flattened in key order; a lone string is one item.
fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::Object(map)) => map.values().flat_map(|v| text_list(Some(v))).collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn objects<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    map.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn profile_links(value: Option<&Value>) -> Vec<ProfileLink> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::Object(m) => Some(ProfileLink {
                name: text(m, "name"),
                url: text(m, "url")?,
            }),
            other => scalar_text(other).map(|url| ProfileLink { name: None, url }),
        })
        .collect()
}
