//! Scholarship recommendations from a student profile.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extraction::extract_embedded;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scholarship {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScholarshipList {
    scholarships: Vec<Scholarship>,
}

/// Pulls the `{"scholarships": [...]}` object out of the model reply, which may
/// carry prose or citations around it.
pub fn parse_scholarships(raw: &str) -> Result<Vec<Scholarship>, AppError> {
    let record: Value = extract_embedded(raw)?;
    let list: ScholarshipList = serde_json::from_value(record).map_err(|e| {
        AppError::UnprocessableEntity(format!("scholarship list has an unexpected shape: {e}"))
    })?;
    Ok(list
        .scholarships
        .into_iter()
        .filter(|s| !s.name.trim().is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_list_wrapped_in_prose() {
        let raw = r#"Here are some options [1]:
{"scholarships": [
  {"name": "Chevening", "description": "Fully funded UK masters.", "deadline": "Nov 05, 2025"},
  {"name": "DAAD", "description": "German study grants.",}
]}
Good luck!"#;
        let list = parse_scholarships(raw).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].deadline.as_deref(), Some("Nov 05, 2025"));
        assert_eq!(list[1].name, "DAAD");
        assert_eq!(list[1].deadline, None);
    }

    #[test]
    fn test_unnamed_entries_dropped() {
        let list =
            parse_scholarships(r#"{"scholarships": [{"name": " "}, {"name": "Fulbright"}]}"#).unwrap();
        assert_eq!(list, vec![Scholarship {
            name: "Fulbright".to_string(),
            description: String::new(),
            deadline: None,
        }]);
    }

    #[test]
    fn test_missing_list_is_unprocessable() {
        let err = parse_scholarships(r#"{"results": []}"#).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);

        let err = parse_scholarships("no json here").unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
