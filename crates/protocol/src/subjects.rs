use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// A subject as returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl Subject {
    /// Display label, `"<code> - <name>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Body of a subjects-by-department response
///
/// Success bodies are `{success: true, subjects: [...]}`. Failure bodies are
/// `{success: false, error}` or, for 4xx/5xx, just `{error}`, so both
/// `success` and `subjects` default when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubjectsResponse {
    /// Successful response carrying `subjects`
    pub const fn ok(subjects: Vec<Subject>) -> Self {
        Self {
            success: true,
            subjects,
            error: None,
        }
    }

    /// Failed response carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            subjects: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Decode a response body, which must be a JSON object
    ///
    /// Derived `Deserialize` would also take a sequence, and with every
    /// field defaulted `[]` would decode as an empty response.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("subjects response is not a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Error message for logging, with a fallback when the server sent none
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_format() {
        let s = Subject {
            id: 7,
            code: "CS101".into(),
            name: "Programming".into(),
        };
        assert_eq!(s.label(), "CS101 - Programming");
    }

    #[test]
    fn test_missing_fields_default() {
        let resp = SubjectsResponse::from_json(r#"{"error": "Department not found"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.subjects.is_empty());
        assert_eq!(resp.error_message(), "Department not found");
    }

    #[test]
    fn test_error_message_fallback() {
        let resp = SubjectsResponse::from_json(r#"{"success": false}"#).unwrap();
        assert_eq!(resp.error_message(), "unknown error");
    }

    #[test]
    fn test_failure_omits_subjects() {
        let json = serde_json::to_value(SubjectsResponse::failure("x")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "x");
        assert!(json.get("subjects").is_none());
    }

    #[test]
    fn test_sequence_body_rejected() {
        assert!(SubjectsResponse::from_json("[]").is_err());
        assert!(SubjectsResponse::from_json(r#"[true, [{"id": 1, "code": "A", "name": "B"}]]"#).is_err());
        assert!(SubjectsResponse::from_json("null").is_err());
    }
}
