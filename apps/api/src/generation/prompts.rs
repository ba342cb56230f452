// All LLM prompt constants for the generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::Value;

use crate::generation::request::{CoverLetterRequest, CvRequest, SopRequest, TargetFocus};
use crate::llm_client::prompts::{
    JSON_ONLY_INSTRUCTION, NO_CITATIONS_INSTRUCTION, NO_FABRICATION_INSTRUCTION,
};

/// Token ceiling for a statement of purpose.
pub const SOP_MAX_TOKENS: u32 = 2048;

/// The record shape every CV prompt asks for. Field names match what the
/// document assembler reads.
pub const CV_SCHEMA: &str = r#"{
  "full_name": "",
  "email": "",
  "phone": "",
  "location": "",
  "links": [{"name": "", "url": "https://..."}],
  "professional_statement": "",
  "work_experience": [
    {
      "job_title": "",
      "company_name": "",
      "type_of_work": "Full-time or Internship",
      "start_date": "",
      "end_date": "",
      "responsibilities": [""],
      "achievements": [""]
    }
  ],
  "education": [
    {
      "university_name": "",
      "course": "",
      "discipline": "",
      "level": "Undergraduate, Postgraduate or PhD",
      "location": "",
      "start_date": "",
      "end_date": "",
      "results": ""
    }
  ],
  "projects": [{"title": "", "type": "Project, Research or Publication", "description": "", "link": ""}],
  "skills": [""],
  "certifications": [{"name": "", "organisation": "", "date": "", "type": "Certificate, Award, Scholarship or Recognition"}],
  "languages_known": [""],
  "additionalSec": [{"title": "", "desc": ""}]
}"#;

/// CV generation prompt template.
/// Replace `{focus}`, `{schema}`, `{json_only}`, `{no_fabrication}` and `{user_data}`.
pub const CV_GENERATE_PROMPT_TEMPLATE: &str = r#"You are an expert CV writer. Use the information below to create a professional CV with a human-written, ATS-friendly tone.

Use strong action verbs (managed, orchestrated, achieved, generated, designed, streamlined) and quantify results where the data allows.
Write a professional_statement ONLY if the user has work experience; otherwise leave it empty.
{focus}

{no_fabrication}
If information is missing, leave the field empty.
{json_only}

Schema:
{schema}

User Data:
{user_data}"#;

/// CV parsing prompt template. Replace `{schema}`, `{json_only}` and `{raw_text}`.
pub const CV_PARSE_PROMPT_TEMPLATE: &str = r#"You are an expert CV parser. Extract structured information from the CV text below.

If the CV has sections the schema does not name (for example Positions of Responsibility), put them in additionalSec.
If information is missing, leave the field empty. Do NOT fabricate.
{json_only}

Schema:
{schema}

CV Text:
"""
{raw_text}
""""#;

/// Cover letter prompt template. Replace `{cv_data}`, `{job_description}`,
/// `{company_line}`, `{today}` and `{no_citations}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Using the CV information and job description below, write a professional cover letter.

State the role applied for, align two or three key skills with concrete examples, show insight into the company and close with a request for an interview. Keep it ATS-friendly with a human-written tone.
{company_line}
{no_citations}
Reply with the letter text only, in exactly this layout:

Full Name
Location
Phone number (+countryCode-number, e.g. +44-1234567890)
Email

{today}

Dear Hiring Manager (or the recruiter's title and name if provided),

Opening paragraph

Body paragraph(s)

Closing paragraph

Sincerely,
Full Name

CV information:
{cv_data}

Job Description:
{job_description}"#;

fn focus_instruction(focus: &TargetFocus) -> String {
    match focus {
        TargetFocus::Country(country) => format!(
            "Tailor the format, layout and word choice to CV conventions in {country}."
        ),
        TargetFocus::Company {
            company: Some(company),
            ..
        } => format!(
            "Tailor experiences and terminology to {company} and the job description in the user data, using ATS-friendly keywords from it."
        ),
        TargetFocus::Company { company: None, .. } => "Tailor experiences and terminology to the job description in the user data, using ATS-friendly keywords from it.".to_string(),
        TargetFocus::Role(role) => format!(
            "Tailor experiences and terminology to the role of {role}, using ATS-friendly keywords that relate to it."
        ),
        TargetFocus::Unspecified => {
            "Use a clean format that reads well to international recruiters.".to_string()
        }
    }
}

pub fn build_cv_prompt(request: &CvRequest) -> String {
    CV_GENERATE_PROMPT_TEMPLATE
        .replace("{focus}", &focus_instruction(&request.focus))
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{schema}", CV_SCHEMA)
        .replace("{user_data}", &format!("{:#}", request.user_data()))
}

pub fn build_cv_parse_prompt(raw_text: &str) -> String {
    CV_PARSE_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{schema}", CV_SCHEMA)
        .replace("{raw_text}", raw_text)
}

/// `today` is the letter date, already formatted (e.g. "March 05, 2025").
pub fn build_cover_letter_prompt(request: &CoverLetterRequest, today: &str) -> String {
    let company_line = request
        .target_company
        .as_deref()
        .map(|c| format!("The company is {c}."))
        .unwrap_or_default();

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{company_line}", &company_line)
        .replace("{no_citations}", NO_CITATIONS_INSTRUCTION)
        .replace("{today}", today)
        .replace("{cv_data}", &format!("{:#}", request.cv_data()))
        .replace("{job_description}", &request.job_description)
}

/// Optional SOP fields and the sentence lead-in each one gets.
const SOP_OPTIONAL_FIELDS: &[(&str, &str)] = &[
    ("key_skills", "My key skills are"),
    ("strengths", "My strengths are"),
    ("why_field", "I want to pursue this field because"),
    ("why_uni", "I chose this university because"),
    ("goals", "My long term goals are"),
    ("challenge", "More about me:"),
];

fn entry_text(entry: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn push_labelled(prompt: &mut String, entry: &serde_json::Map<String, Value>, fields: &[(&str, &str)]) {
    for (key, label) in fields {
        if let Some(value) = entry_text(entry, key) {
            prompt.push_str(&format!("{label}: {value}\n"));
        }
    }
    prompt.push('\n');
}

pub fn build_sop_prompt(request: &SopRequest) -> String {
    let required = |key: &str| request.text(key).unwrap_or_default();

    let mut prompt = format!(
        "I am {}, from {}. I want to study {} in {}. My preferred field of study is {} and my preferred university is {}. \
         Write my statement of purpose.\n\
         It must read as if a person wrote it, in a professional and formal tone, and be ATS friendly. \
         Reply with the statement text only, with no explanations or extra messages. {}\n\n",
        required("name"),
        required("country_of_origin"),
        required("intended_degree"),
        required("preferred_country"),
        required("field_of_study"),
        required("preferred_uni"),
        NO_CITATIONS_INSTRUCTION,
    );

    let details: Vec<String> = SOP_OPTIONAL_FIELDS
        .iter()
        .filter_map(|(key, label)| request.text(key).map(|v| format!("{label} {v}.")))
        .collect();
    if !details.is_empty() {
        prompt.push_str("Here are my details:\n");
        prompt.push_str(&details.join("\n"));
        prompt.push_str("\n\n");
    }

    let mut projects = request.entries("projects").peekable();
    if projects.peek().is_some() {
        prompt.push_str("I have also completed these projects, research or publications:\n");
        for p in projects {
            push_labelled(
                &mut prompt,
                p,
                &[
                    ("type", "Type"),
                    ("title", "Title"),
                    ("link", "Link"),
                    ("description", "Description"),
                ],
            );
        }
    }

    let mut education = request.entries("education").peekable();
    if education.peek().is_some() {
        prompt.push_str("Here are my past education details:\n");
        for e in education {
            let mut entry = e.clone();
            if entry_text(e, "universityName").as_deref() == Some("Other") {
                if let Some(other) = e.get("otherUniversityName") {
                    entry.insert("universityName".into(), other.clone());
                }
            }
            if e.get("isPresent").and_then(Value::as_bool) == Some(true) {
                entry.insert(
                    "endDate".into(),
                    Value::String("Presently studying here".to_string()),
                );
            }
            push_labelled(
                &mut prompt,
                &entry,
                &[
                    ("discipline", "Discipline"),
                    ("course", "Course Name"),
                    ("level", "Level of Study"),
                    ("country", "Country of Study"),
                    ("location", "Location of Study"),
                    ("results", "Results"),
                    ("universityName", "University Name"),
                    ("startDate", "Start Date"),
                    ("endDate", "End Date"),
                ],
            );
        }
    }

    let mut awards = request.entries("awards").peekable();
    if awards.peek().is_some() {
        prompt.push_str("I have received these certifications:\n");
        for a in awards {
            push_labelled(
                &mut prompt,
                a,
                &[
                    ("type", "Type of certification"),
                    ("name", "Name"),
                    ("organization", "Issuing Organization"),
                    ("dateObtained", "Date obtained"),
                ],
            );
        }
    }

    let activities: Vec<String> = request
        .entries("activity")
        .filter_map(|a| {
            let description = entry_text(a, "description")?;
            Some(match entry_text(a, "type") {
                Some(kind) => format!("{kind}: {description}"),
                None => description,
            })
        })
        .collect();
    if !activities.is_empty() {
        prompt.push_str("Here is more information about the activities I did:\n");
        prompt.push_str(&activities.join("\n"));
    }

    prompt.trim().to_string()
}
