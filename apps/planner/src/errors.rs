use thiserror::Error;

/// Planner-level error type.
/// Every failure of a topics or outline action is normalized into one of these variants,
/// and `Display` yields the human-readable message shown next to the failed panel.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Client-side rejection. The backend is never contacted.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response. `message` is the backend's `error` field when it sent one,
    /// otherwise a status-line fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body did not match the expected envelope.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlannerError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlannerError::Validation(message.into())
    }

    /// HTTP status behind the error, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            PlannerError::Api { status, .. } => Some(*status),
            PlannerError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for errors raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message_verbatim() {
        let err = PlannerError::Api {
            status: 500,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_validation_error_is_client_side() {
        let err = PlannerError::validation("Please enter a blog theme.");
        assert!(err.is_client_side());
        assert_eq!(err.to_string(), "Please enter a blog theme.");
    }

    #[test]
    fn test_malformed_response_is_not_client_side() {
        let err = PlannerError::MalformedResponse("bad shape".to_string());
        assert!(!err.is_client_side());
    }
}
