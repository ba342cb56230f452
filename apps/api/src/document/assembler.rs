//! Turns a structured record, or raw text when there is none, into an
//! `AssembledDocument`. There is no failure path: a bad hyperlink degrades to
//! plain text and anything that is not a record falls back to one paragraph per
//! line.

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::model::{
    AssembledDocument, AssemblyMode, Element, Inline, LinkTarget, Paragraph, Section, TextStyle,
};
use crate::document::record::{
    Certification, CvRecord, DateRange, EducationEntry, ProjectEntry, WorkEntry,
};
use crate::document::style::NAME_SIZE_PT;

const CONTACT_SEPARATOR: &str = " | ";
/// Additional sections whose title contains one of these duplicate the
/// professional statement block.
const STATEMENT_TITLE_WORDS: [&str; 3] = ["professional", "statement", "summary"];

pub fn assemble(record: Option<&Value>, raw_text: &str) -> AssembledDocument {
    match record.and_then(CvRecord::from_value) {
        Some(cv) => assemble_record(&cv),
        None => assemble_plain_text(raw_text),
    }
}

/// One untitled section holding a paragraph per input line.
pub fn assemble_plain_text(raw_text: &str) -> AssembledDocument {
    let elements = raw_text
        .lines()
        .map(|line| Element::Paragraph(Paragraph::plain(line.trim())))
        .collect();
    AssembledDocument::new(AssemblyMode::PlainText, vec![Section::untitled(elements)])
}

pub fn assemble_record(cv: &CvRecord) -> AssembledDocument {
    let mut sections = Vec::new();

    let header = header_elements(cv);
    if !header.is_empty() {
        sections.push(Section::untitled(header));
    }

    if let Some(statement) = &cv.professional_statement {
        sections.push(Section::titled(
            "Professional Statement",
            vec![Element::Paragraph(Paragraph::plain(statement))],
        ));
    }

    let work = (!cv.work_experience.is_empty())
        .then(|| Section::titled("Work Experience", work_elements(&cv.work_experience)));
    let education = (!cv.education.is_empty())
        .then(|| Section::titled("Education", education_elements(&cv.education)));
    if cv.work_experience.len() > 1 {
        sections.extend(work);
        sections.extend(education);
    } else {
        sections.extend(education);
        sections.extend(work);
    }

    if !cv.projects.is_empty() {
        sections.push(Section::titled(
            "Projects and Publications",
            project_elements(&cv.projects),
        ));
    }

    if !cv.skills.is_empty() {
        sections.push(Section::titled(
            "Skills",
            vec![Element::Paragraph(Paragraph::plain(cv.skills.join(", ")))],
        ));
    }

    if !cv.certifications.is_empty() {
        sections.push(Section::titled(
            "Certifications and Awards",
            cv.certifications
                .iter()
                .filter_map(certification_line)
                .map(Element::bullet)
                .collect(),
        ));
    }

    if !cv.languages_known.is_empty() {
        sections.push(Section::titled(
            "Languages Known",
            vec![Element::Paragraph(Paragraph::plain(
                cv.languages_known.join(", "),
            ))],
        ));
    }

    for extra in &cv.additional_sections {
        let lowered = extra.title.to_lowercase();
        if STATEMENT_TITLE_WORDS.iter().any(|w| lowered.contains(w)) {
            debug!("Skipping additional section {:?}", extra.title);
            continue;
        }
        let body: Vec<Element> = extra
            .body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Element::Paragraph(Paragraph::plain(line)))
            .collect();
        if !body.is_empty() {
            sections.push(Section::titled(extra.title.clone(), body));
        }
    }

    AssembledDocument::new(AssemblyMode::Structured, sections)
}

// ────────────────────────────────────────────────────────────────────────────
// Header and contact line
// ────────────────────────────────────────────────────────────────────────────

fn header_elements(cv: &CvRecord) -> Vec<Element> {
    let mut elements = Vec::new();

    if let Some(name) = &cv.full_name {
        let mut p = Paragraph::default().centered();
        p.push(Inline::text(
            name,
            TextStyle::PLAIN.bold().sized(NAME_SIZE_PT),
        ));
        elements.push(Element::Paragraph(p));
    }

    if let Some(location) = &cv.location {
        elements.push(Element::Paragraph(Paragraph::plain(location).centered()));
    }

    if let Some(contact) = contact_line(cv) {
        elements.push(Element::Paragraph(contact));
    }

    elements
}

fn contact_line(cv: &CvRecord) -> Option<Paragraph> {
    let mut parts: Vec<Inline> = Vec::new();

    if let Some(email) = &cv.email {
        parts.push(link_or_text(email, &format!("mailto:{email}"), TextStyle::PLAIN));
    }
    if let Some(phone) = &cv.phone {
        parts.push(Inline::text(phone, TextStyle::PLAIN));
    }
    for link in &cv.links {
        let label = link.name.as_deref().unwrap_or(&link.url);
        parts.push(link_or_text(label, &link.url, TextStyle::PLAIN));
    }

    if parts.is_empty() {
        return None;
    }

    let mut p = Paragraph::default().centered();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            p.push(Inline::text(CONTACT_SEPARATOR, TextStyle::PLAIN));
        }
        p.push(part);
    }
    Some(p)
}

/// A hyperlink run, or plain text when the target does not parse.
fn link_or_text(label: &str, target: &str, style: TextStyle) -> Inline {
    match LinkTarget::parse(target) {
        Ok(target) => Inline::Link {
            label: label.to_string(),
            target,
            style,
        },
        Err(e) => {
            warn!("Rendering {label:?} as plain text: {e}");
            Inline::text(label, style)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

/// Bold-italic heading with the date range tab-aligned to the right margin.
fn entry_heading(heading: Option<String>, dates: &DateRange) -> Option<Paragraph> {
    let mut p = Paragraph::default();
    if let Some(heading) = heading {
        p.push(Inline::text(heading, TextStyle::BOLD_ITALIC));
    }
    if let Some(range) = dates.display() {
        p.right_tab_stop = true;
        p.push(Inline::Tab);
        p.push(Inline::text(range, TextStyle::ITALIC));
    }
    (!p.is_empty()).then_some(p)
}

fn joined(parts: &[&Option<String>], separator: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().filter_map(|p| p.as_deref()).collect();
    (!present.is_empty()).then(|| present.join(separator))
}

fn work_elements(entries: &[WorkEntry]) -> Vec<Element> {
    let mut elements = Vec::new();
    for job in entries {
        let heading = joined(&[&job.job_title, &job.company_name], " | ");
        if let Some(p) = entry_heading(heading, &job.dates) {
            elements.push(Element::Paragraph(p));
        }
        elements.extend(job.responsibilities.iter().map(Element::bullet));
        elements.extend(
            job.achievements
                .iter()
                .map(|a| Element::bullet(format!("Achievement: {a}"))),
        );
    }
    elements
}

fn education_elements(entries: &[EducationEntry]) -> Vec<Element> {
    let mut elements = Vec::new();
    for edu in entries {
        if let Some(p) = entry_heading(edu.university_name.clone(), &edu.dates) {
            elements.push(Element::Paragraph(p));
        }
        if let Some(degree) = joined(&[&edu.course, &edu.discipline], " - ") {
            elements.push(Element::Paragraph(Paragraph::plain(degree)));
        }
        if let Some(result) = &edu.results {
            elements.push(Element::Paragraph(Paragraph::plain(format!(
                "Result: {result}"
            ))));
        }
    }
    elements
}

fn project_elements(entries: &[ProjectEntry]) -> Vec<Element> {
    let mut elements = Vec::new();
    for project in entries {
        let mut heading = Paragraph::default();
        if let Some(title) = &project.title {
            heading.push(match &project.link {
                Some(link) => link_or_text(title, link, TextStyle::BOLD_ITALIC),
                None => Inline::text(title, TextStyle::BOLD_ITALIC),
            });
        }
        if let Some(kind) = &project.project_type {
            heading.push(Inline::text(format!(" [{kind}]"), TextStyle::ITALIC));
        }
        if !heading.is_empty() {
            elements.push(Element::Paragraph(heading));
        }
        if let Some(description) = &project.description {
            elements.push(Element::Bullet {
                level: 1,
                paragraph: Paragraph::plain(description),
            });
        }
    }
    elements
}

/// `name, organisation (date) [type]`, each part only when present.
fn certification_line(cert: &Certification) -> Option<String> {
    let mut line = cert.name.clone().unwrap_or_default();
    if let Some(org) = &cert.organisation {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(org);
    }
    if let Some(date) = &cert.date {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("({date})"));
    }
    if let Some(kind) = &cert.cert_type {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("[{kind}]"));
    }
    (!line.is_empty()).then_some(line)
}
