use reqwest::StatusCode;
use thiserror::Error;
use tracing::error;

/// Classified error for every failed API call.
///
/// One variant per failure class the backend can produce. Each carries a
/// human-readable message; HTTP-derived variants keep their status reachable
/// through [`ApiError::status`] so callers can still branch on it.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response from the server at all.
    #[error("{0}")]
    Connectivity(String),

    /// 400 - the backend rejected the submitted data.
    #[error("{0}")]
    Validation(String),

    /// 401, or a sign-in response missing required account fields.
    #[error("{0}")]
    Authentication(String),

    /// 403 - authenticated but not allowed.
    #[error("{0}")]
    Authorization(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 409
    #[error("{0}")]
    Conflict(String),

    /// 500
    #[error("{0}")]
    Server(String),

    /// Any status without a dedicated mapping.
    #[error("Error {status}: {message}")]
    UnknownStatus { status: u16, message: String },
}

impl ApiError {
    /// Classify an error response by status code, preferring the backend's
    /// own message where the class allows it.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        match status.as_u16() {
            400 => ApiError::Validation(message.unwrap_or_else(|| {
                "Invalid data. Check the information you submitted.".to_string()
            })),
            401 => ApiError::Authentication("Session expired. Please sign in again.".to_string()),
            403 => ApiError::Authorization(
                "You do not have permission to perform this action.".to_string(),
            ),
            404 => ApiError::NotFound(message.unwrap_or_else(|| "Resource not found.".to_string())),
            409 => ApiError::Conflict(
                message.unwrap_or_else(|| "The resource already exists.".to_string()),
            ),
            500 => ApiError::Server("Server error. Please try again later.".to_string()),
            other => ApiError::UnknownStatus {
                status: other,
                message: message.unwrap_or_else(|| "Unexpected response from server.".to_string()),
            },
        }
    }

    /// Build the connectivity error for a request that never got a response.
    pub fn from_transport(err: reqwest::Error) -> Self {
        error!(error = %err, "network failure, no response received");
        ApiError::Connectivity("Network error. Check your internet connection.".to_string())
    }

    /// Authentication error for a sign-in response missing a required field.
    pub(crate) fn missing_field(field: &str) -> Self {
        ApiError::Authentication(format!(
            "Incomplete account data in server response: missing {field}."
        ))
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Connectivity(_) => None,
            ApiError::Validation(_) => Some(400),
            ApiError::Authentication(_) => Some(401),
            ApiError::Authorization(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::Server(_) => Some(500),
            ApiError::UnknownStatus { status, .. } => Some(*status),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Backends answer with several shapes (`message`, `detail`, `title`, or an
/// `errors` array/map). All probing happens here, once, instead of ad hoc at
/// every call site.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["message", "detail", "title"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    match value.get("errors") {
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Some(serde_json::Value::Object(map)) => {
            // field -> message, or field -> [messages]
            let parts: Vec<String> = map
                .values()
                .flat_map(|v| match v {
                    serde_json::Value::String(s) => vec![s.clone()],
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|i| i.as_str().map(str::to_string))
                        .collect(),
                    _ => vec![],
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StatusCode::BAD_REQUEST, Some(400)),
            (StatusCode::UNAUTHORIZED, Some(401)),
            (StatusCode::FORBIDDEN, Some(403)),
            (StatusCode::NOT_FOUND, Some(404)),
            (StatusCode::CONFLICT, Some(409)),
            (StatusCode::INTERNAL_SERVER_ERROR, Some(500)),
            (StatusCode::BAD_GATEWAY, Some(502)),
        ];
        for (status, expected) in cases {
            assert_eq!(ApiError::from_status(status, "").status(), expected);
        }
    }

    #[test]
    fn test_backend_message_preferred_for_400() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Capacity must be positive"}"#,
        );
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Capacity must be positive"));
    }

    #[test]
    fn test_401_message_is_fixed() {
        // The expired-session message never echoes backend text
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message": "nope"}"#);
        assert_eq!(err.to_string(), "Session expired. Please sign in again.");
    }

    #[test]
    fn test_generic_messages_without_body() {
        let err = ApiError::from_status(StatusCode::CONFLICT, "not json");
        assert_eq!(err.to_string(), "The resource already exists.");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "Server error. Please try again later.");
    }

    #[test]
    fn test_extract_message_shapes() {
        assert_eq!(extract_message(r#"{"message": "m"}"#).as_deref(), Some("m"));
        assert_eq!(extract_message(r#"{"detail": "d"}"#).as_deref(), Some("d"));
        assert_eq!(extract_message(r#"{"title": "t"}"#).as_deref(), Some("t"));
        assert_eq!(
            extract_message(r#"{"errors": ["a", "b"]}"#).as_deref(),
            Some("a, b")
        );
        assert_eq!(
            extract_message(r#"{"errors": {"dni": ["must be 8 digits"]}}"#).as_deref(),
            Some("must be 8 digits")
        );
        assert_eq!(extract_message(r#"{"message": ""}"#), None);
        assert_eq!(extract_message("not json"), None);
    }

    #[test]
    fn test_unknown_status_keeps_code_in_message() {
        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, "");
        assert_eq!(err.status(), Some(418));
        assert!(err.to_string().starts_with("Error 418"));
    }
}
