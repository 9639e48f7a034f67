//! Synthesis error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while exchanging a turn with the synthesis service
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unrecognized response status: {0:?}")]
    UnrecognizedStatus(Option<String>),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,
}

impl SynthesisError {
    /// No usable response came back from the service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SynthesisError::Network(_) | SynthesisError::ApiError { .. } | SynthesisError::Timeout(_)
        )
    }

    /// A response came back but its shape is not one we understand
    pub fn is_unrecognized(&self) -> bool {
        matches!(
            self,
            SynthesisError::UnrecognizedStatus(_) | SynthesisError::InvalidResponse(_) | SynthesisError::Json(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SynthesisError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(
            SynthesisError::ApiError {
                status: 502,
                message: "Bad gateway".to_string()
            }
            .is_transport()
        );
        assert!(
            SynthesisError::ApiError {
                status: 422,
                message: "Unprocessable".to_string()
            }
            .is_transport()
        );
        assert!(SynthesisError::Timeout(Duration::from_secs(30)).is_transport());

        assert!(!SynthesisError::UnrecognizedStatus(Some("thinking".to_string())).is_transport());
        assert!(!SynthesisError::Cancelled.is_transport());
    }

    #[test]
    fn test_is_unrecognized() {
        assert!(SynthesisError::UnrecognizedStatus(None).is_unrecognized());
        assert!(SynthesisError::InvalidResponse("plan is not an object".to_string()).is_unrecognized());

        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(SynthesisError::Json(json_err).is_unrecognized());

        assert!(!SynthesisError::Timeout(Duration::from_secs(1)).is_unrecognized());
    }

    #[test]
    fn test_categories_are_disjoint() {
        let cancelled = SynthesisError::Cancelled;
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_transport());
        assert!(!cancelled.is_unrecognized());
    }

    #[test]
    fn test_display() {
        let err = SynthesisError::UnrecognizedStatus(Some("pending".to_string()));
        assert_eq!(err.to_string(), "Unrecognized response status: Some(\"pending\")");
    }
}
