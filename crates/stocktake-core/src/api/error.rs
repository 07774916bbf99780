use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Request rejected by validation: {0}")]
    Unprocessable(String),

    #[error("Server error ({status}): {body}")]
    ServerError { status: StatusCode, body: String },

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(truncated),
            409 => ApiError::Conflict(truncated),
            422 => ApiError::Unprocessable(truncated),
            500..=599 => ApiError::ServerError {
                status,
                body: truncated,
            },
            _ => ApiError::Rejected {
                status,
                body: truncated,
            },
        }
    }

    /// HTTP status carried by this error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Conflict(_) => Some(StatusCode::CONFLICT),
            ApiError::Unprocessable(_) => Some(StatusCode::UNPROCESSABLE_ENTITY),
            ApiError::ServerError { status, .. } | ApiError::Rejected { status, .. } => {
                Some(*status)
            }
            ApiError::Network(_) | ApiError::InvalidResponse(_) | ApiError::InvalidUrl(_) => None,
        }
    }

    /// True when the request never produced a response
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, "taken"),
            ApiError::Conflict(ref b) if b == "taken"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "{}"),
            ApiError::Unprocessable(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down"),
            ApiError::ServerError { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "bad"),
            ApiError::Rejected { status, .. } if status == StatusCode::BAD_REQUEST
        ));
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 520 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // 'é' is two bytes, so byte 500 falls inside a character
        let long = format!("a{}", "é".repeat(300));
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(
            ApiError::from_status(StatusCode::CONFLICT, "").status(),
            Some(StatusCode::CONFLICT)
        );
        assert_eq!(
            ApiError::from_status(StatusCode::FORBIDDEN, "").status(),
            Some(StatusCode::FORBIDDEN)
        );
        assert!(!ApiError::Unauthorized.is_network());
    }
}
