use serde_json::Value;

use crate::generation::request::{field_text, Fields};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const SCHOLARSHIP_REQUIRED_FIELDS: &[&str] =
    &["citizenship", "preferred_country", "level", "field"];

/// Profile fields in the order they are shown to the model.
const PROFILE_LINES: &[(&str, &str)] = &[
    ("citizenship", "Citizenship"),
    ("level", "Desired level of study"),
    ("field", "Preferred field of study"),
    ("academic_perf", "Academic performance"),
    ("disability", "Disability"),
    ("preferred_country", "Preferred country of study"),
    ("course_intake", "Course intake"),
    ("dob", "Date of birth (use this to work out age)"),
    ("gender", "Gender"),
];

pub const SCHOLARSHIP_INSTRUCTIONS: &str = r#"Based on this information, recommend the most relevant scholarships for this student.
Reply with a single JSON object whose "scholarships" key holds an array. Each element has:
  - "name": the scholarship name
  - "description": what it covers, at most 20 words
  - "deadline": the next application deadline in "Mon dd, yyyy" form, if known

Example:
{
  "scholarships": [
    {"name": "Commonwealth Scholarship", "description": "Covers tuition and living costs for UK postgraduate study.", "deadline": "Dec 12, 2025"}
  ]
}"#;

fn universities(fields: &Fields) -> Option<String> {
    match fields.get("preferred_universities")? {
        Value::Array(items) => {
            let names: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

pub fn build_scholarship_prompt(fields: &Fields) -> String {
    let mut lines = vec![
        "You are an expert on global scholarships. A student has provided their profile details:"
            .to_string(),
        String::new(),
    ];

    for (key, label) in PROFILE_LINES {
        if let Some(value) = field_text(fields, key) {
            lines.push(format!("{label}: {value}"));
        }
    }
    if let Some(unis) = universities(fields) {
        lines.push(format!("Preferred universities: {unis}"));
    }
    let activity = fields
        .get("activity")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(|a| a.get("description"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty());
    if let Some(activity) = activity {
        lines.push(format!("Extracurricular activities: {activity}"));
    }

    lines.push(String::new());
    lines.push(SCHOLARSHIP_INSTRUCTIONS.to_string());
    lines.push(JSON_ONLY_INSTRUCTION.to_string());
    lines.join("\n")
}
