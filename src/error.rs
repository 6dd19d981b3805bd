// ============================================================================
// ERRORS - Data layer error taxonomy + user-facing messages
// ============================================================================

use serde_json::Value;
use thiserror::Error;

/// One failed form check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Errors surfaced by the data-access layer.
///
/// `Clone` is required: a single in-flight query result is shared by every
/// caller waiting on the same cache key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 from any endpoint
    #[error("Request failed with status code 401")]
    Unauthorized { body: Option<Value> },

    /// Client-side form checks, never sent over the wire
    #[error("{}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Any other non-2xx response
    #[error("Request failed with status code {status}")]
    Remote { status: u16, body: Option<Value> },

    /// Transport failure (DNS, CORS, offline...)
    #[error("Network Error: {0}")]
    Network(String),

    /// Body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Durable storage failure
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        if status == 401 {
            ApiError::Unauthorized { body }
        } else {
            ApiError::Remote { status, body }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Remote { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text shown in a notice for any error.
///
/// Precedence: server `message` field, then the server's field error list,
/// then the raw body as JSON, then the error's own description.
pub fn error_message(error: &ApiError) -> String {
    if let Some(body) = error.body() {
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            return errors
                .iter()
                .map(|e| {
                    e.get("defaultMessage")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(", ");
        }
        if !is_empty_body(body) {
            return body.to_string();
        }
    }
    error.to_string()
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_server_message() {
        let err = ApiError::Remote {
            status: 400,
            body: Some(json!({ "message": "Ticket already approved", "errors": [] })),
        };
        assert_eq!(error_message(&err), "Ticket already approved");
    }

    #[test]
    fn joins_field_errors_from_server() {
        let err = ApiError::Remote {
            status: 422,
            body: Some(json!({
                "errors": [
                    { "field": "email", "defaultMessage": "must be a well-formed email address" },
                    { "field": "phoneNumber", "defaultMessage": "must not be blank" }
                ]
            })),
        };
        assert_eq!(
            error_message(&err),
            "must be a well-formed email address, must not be blank"
        );
    }

    #[test]
    fn falls_back_to_json_body() {
        let err = ApiError::Remote {
            status: 500,
            body: Some(json!({ "error": "Internal Server Error" })),
        };
        assert_eq!(error_message(&err), r#"{"error":"Internal Server Error"}"#);

        let plain = ApiError::Remote {
            status: 502,
            body: Some(json!("Bad Gateway")),
        };
        assert_eq!(error_message(&plain), "\"Bad Gateway\"");
    }

    #[test]
    fn falls_back_to_error_description() {
        let err = ApiError::Remote { status: 503, body: None };
        assert_eq!(error_message(&err), "Request failed with status code 503");

        let net = ApiError::Network("connection refused".into());
        assert_eq!(error_message(&net), "Network Error: connection refused");
    }

    #[test]
    fn validation_errors_join_messages() {
        let err = ApiError::Validation(vec![
            FieldError::new("email", "Invalid email"),
            FieldError::new("password", "Password must have at least 6 characters"),
        ]);
        assert_eq!(
            error_message(&err),
            "Invalid email, Password must have at least 6 characters"
        );
    }

    #[test]
    fn classifies_status_codes() {
        assert!(ApiError::from_status(401, None).is_unauthorized());
        assert_eq!(ApiError::from_status(403, None).status(), Some(403));
        assert!(!ApiError::from_status(403, None).is_unauthorized());
    }
}
