//! Request bodies for CV, cover letter and statement of purpose generation.
//!
//! Clients send loosely shaped JSON (a work history may be a string or a list of
//! objects), so bodies are kept as JSON maps and only the keys each flow needs are
//! validated and forwarded to the model.

use serde_json::{Map, Value};

use crate::errors::AppError;

pub type Fields = Map<String, Value>;

/// Profile keys forwarded to the model for CV and cover letter generation.
pub const PROFILE_KEYS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "links",
    "location",
    "work_experience",
    "education",
    "skills",
    "languages_known",
    "certificates",
    "certifications",
    "projects",
    "additionalSec",
];

pub const SOP_REQUIRED_FIELDS: &[&str] = &[
    "name",
    "country_of_origin",
    "intended_degree",
    "preferred_country",
    "field_of_study",
    "preferred_uni",
];

/// A value counts as absent when it is null, blank, an empty list or an empty object.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(_)) => true,
    }
}

/// Required keys missing from `fields`, in the order given.
pub fn missing_fields<'a>(fields: &Fields, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|key| !is_present(fields.get(*key)))
        .collect()
}

pub fn require_fields(fields: &Fields, required: &[&str]) -> Result<(), AppError> {
    let missing = missing_fields(fields, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Trimmed text of a string or number field.
pub fn field_text(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn profile(fields: &Fields) -> Fields {
    PROFILE_KEYS
        .iter()
        .filter_map(|key| {
            fields
                .get(*key)
                .filter(|v| is_present(Some(*v)))
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Build a CV from details typed in by the user.
    New,
    /// Reformat an existing CV towards a target.
    Existing,
}

impl Workflow {
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Err(AppError::Validation(
                "workflow field is required".to_string(),
            )),
            Some("new") => Ok(Workflow::New),
            Some("existing") => Ok(Workflow::Existing),
            Some(other) => Err(AppError::Validation(format!(
                "workflow must be 'new' or 'existing', got '{other}'"
            ))),
        }
    }
}

/// What an existing CV is tailored towards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFocus {
    Country(String),
    Company {
        company: Option<String>,
        job_description: Option<String>,
    },
    Role(String),
    Unspecified,
}

impl TargetFocus {
    /// Picks one focus from the request. A target country wins over a target
    /// company or job description, which in turn win over a target role.
    // NOTE: a request naming both a country and a company is tailored to the
    // country only. This ordering is long-standing behaviour; it is not clear
    // it was ever meant as a priority.
    pub fn select(fields: &Fields) -> Self {
        if let Some(country) = field_text(fields, "target_country") {
            return TargetFocus::Country(country);
        }
        let company = field_text(fields, "target_company");
        let job_description = field_text(fields, "job_description");
        if company.is_some() || job_description.is_some() {
            return TargetFocus::Company {
                company,
                job_description,
            };
        }
        match field_text(fields, "target_role") {
            Some(role) => TargetFocus::Role(role),
            None => TargetFocus::Unspecified,
        }
    }

    /// New CVs only ever carry a target country.
    fn for_new(fields: &Fields) -> Self {
        field_text(fields, "target_country")
            .map(TargetFocus::Country)
            .unwrap_or(TargetFocus::Unspecified)
    }

    /// Target keys as they are shown to the model.
    fn insert_into(&self, out: &mut Fields) {
        match self {
            TargetFocus::Country(country) => {
                out.insert("target_country".into(), Value::String(country.clone()));
            }
            TargetFocus::Company {
                company,
                job_description,
            } => {
                if let Some(company) = company {
                    out.insert("target_company".into(), Value::String(company.clone()));
                }
                if let Some(jd) = job_description {
                    out.insert("job_description".into(), Value::String(jd.clone()));
                }
            }
            TargetFocus::Role(role) => {
                out.insert("target_role".into(), Value::String(role.clone()));
            }
            TargetFocus::Unspecified => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct CvRequest {
    pub workflow: Workflow,
    pub focus: TargetFocus,
    profile: Fields,
}

impl CvRequest {
    pub fn from_fields(fields: &Fields) -> Result<Self, AppError> {
        let workflow = Workflow::parse(fields.get("workflow").and_then(Value::as_str))?;
        let focus = match workflow {
            Workflow::New => TargetFocus::for_new(fields),
            Workflow::Existing => TargetFocus::select(fields),
        };
        Ok(Self {
            workflow,
            focus,
            profile: profile(fields),
        })
    }

    /// The data block handed to the model: target first, then profile.
    pub fn user_data(&self) -> Value {
        let mut out = Fields::new();
        self.focus.insert_into(&mut out);
        out.extend(self.profile.clone());
        Value::Object(out)
    }
}

#[derive(Debug, Clone)]
pub struct CoverLetterRequest {
    pub job_description: String,
    pub target_company: Option<String>,
    profile: Fields,
}

impl CoverLetterRequest {
    pub fn from_fields(fields: &Fields) -> Result<Self, AppError> {
        let job_description = field_text(fields, "job_description").ok_or_else(|| {
            AppError::Validation("job_description is required".to_string())
        })?;
        let profile = profile(fields);
        if profile.is_empty() {
            return Err(AppError::Validation("CV details are required".to_string()));
        }
        Ok(Self {
            job_description,
            target_company: field_text(fields, "target_company"),
            profile,
        })
    }

    pub fn cv_data(&self) -> Value {
        Value::Object(self.profile.clone())
    }
}

#[derive(Debug, Clone)]
pub struct SopRequest {
    fields: Fields,
}

impl SopRequest {
    pub fn from_fields(fields: Fields) -> Result<Self, AppError> {
        require_fields(&fields, SOP_REQUIRED_FIELDS)?;
        Ok(Self { fields })
    }

    pub fn text(&self, key: &str) -> Option<String> {
        field_text(&self.fields, key)
    }

    /// Object entries of a list field; anything else yields nothing.
    pub fn entries(&self, key: &str) -> impl Iterator<Item = &Fields> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_workflow_parsing() {
        assert_eq!(Workflow::parse(Some("New")).unwrap(), Workflow::New);
        assert_eq!(Workflow::parse(Some("existing")).unwrap(), Workflow::Existing);
        assert!(matches!(Workflow::parse(None), Err(AppError::Validation(_))));
        assert!(matches!(
            Workflow::parse(Some("upgrade")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_focus_country_beats_company() {
        let f = fields(json!({
            "target_country": "Germany",
            "target_company": "Acme",
            "job_description": "Build things",
            "target_role": "Engineer"
        }));
        assert_eq!(
            TargetFocus::select(&f),
            TargetFocus::Country("Germany".to_string())
        );
    }

    #[test]
    fn test_focus_job_description_alone_selects_company() {
        let f = fields(json!({"job_description": "Build things", "target_role": "Engineer"}));
        assert_eq!(
            TargetFocus::select(&f),
            TargetFocus::Company {
                company: None,
                job_description: Some("Build things".to_string())
            }
        );
    }

    #[test]
    fn test_focus_role_then_unspecified() {
        assert_eq!(
            TargetFocus::select(&fields(json!({"target_country": " ", "target_role": "Analyst"}))),
            TargetFocus::Role("Analyst".to_string())
        );
        assert_eq!(TargetFocus::select(&Fields::new()), TargetFocus::Unspecified);
    }

    #[test]
    fn test_new_workflow_ignores_company_target() {
        let req = CvRequest::from_fields(&fields(json!({
            "workflow": "new",
            "target_company": "Acme",
            "full_name": "Ann Lee"
        })))
        .unwrap();
        assert_eq!(req.focus, TargetFocus::Unspecified);
        assert_eq!(req.user_data(), json!({"full_name": "Ann Lee"}));
    }

    #[test]
    fn test_user_data_drops_unknown_and_empty_keys() {
        let req = CvRequest::from_fields(&fields(json!({
            "workflow": "existing",
            "target_role": "Analyst",
            "full_name": "Ann Lee",
            "skills": [],
            "password": "hunter2"
        })))
        .unwrap();
        assert_eq!(
            req.user_data(),
            json!({"target_role": "Analyst", "full_name": "Ann Lee"})
        );
    }

    #[test]
    fn test_cover_letter_requires_job_description() {
        let err = CoverLetterRequest::from_fields(&fields(json!({"full_name": "Ann"}))).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("job_description")));

        let ok = CoverLetterRequest::from_fields(&fields(json!({
            "full_name": "Ann",
            "job_description": "Analyst role"
        })))
        .unwrap();
        assert_eq!(ok.job_description, "Analyst role");
    }

    #[test]
    fn test_sop_lists_missing_fields_in_order() {
        let err = SopRequest::from_fields(fields(json!({
            "name": "Ann",
            "intended_degree": "MSc",
            "preferred_uni": ""
        })))
        .unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(
                msg,
                "Missing required fields: country_of_origin, preferred_country, field_of_study, preferred_uni"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sop_entries_skip_non_objects() {
        let req = SopRequest::from_fields(fields(json!({
            "name": "Ann",
            "country_of_origin": "Kenya",
            "intended_degree": "MSc",
            "preferred_country": "UK",
            "field_of_study": "Data Science",
            "preferred_uni": "UCL",
            "projects": [{"title": "Crop model"}, "stray"],
            "awards": "none"
        })))
        .unwrap();
        assert_eq!(req.entries("projects").count(), 1);
        assert_eq!(req.entries("awards").count(), 0);
        assert_eq!(req.text("preferred_uni").as_deref(), Some("UCL"));
    }
}
