//! Standardized API error body (RFC 7807 style).

use serde::{Deserialize, Serialize};

use crate::forms::FieldErrors;

/// RFC 7807 Problem Details for HTTP APIs, with an optional field-error map
/// for validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Per-field validation messages (422 responses only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<std::collections::BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_field_errors(mut self, errors: &FieldErrors) -> Self {
        self.errors = Some(
            errors
                .iter()
                .map(|(field, message)| (field.to_string(), message.clone()))
                .collect(),
        );
        self
    }

    // Common error constructors
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(401, "Unauthorized").with_detail(detail)
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn validation_failed(errors: &FieldErrors) -> Self {
        Self::new(422, "Validation Failed").with_field_errors(errors)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_carries_field_map() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Invalid email address.".to_string());

        let body = ErrorResponse::validation_failed(&errors);
        assert_eq!(body.status, 422);
        let map = body.errors.unwrap();
        assert_eq!(map.get("email").map(String::as_str), Some("Invalid email address."));
    }

    #[test]
    fn detail_is_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::forbidden()).unwrap();
        assert!(json.get("detail").is_none());
        assert_eq!(json["status"], 403);
    }
}
