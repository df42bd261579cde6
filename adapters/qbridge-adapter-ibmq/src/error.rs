//! Error types for the IBM Q adapter.

use thiserror::Error;

/// Result type for IBM Q operations.
pub type IbmqResult<T> = Result<T, IbmqError>;

/// Errors that can occur when using IBM Q.
#[derive(Debug, Error)]
pub enum IbmqError {
    /// Missing API token.
    #[error("IBM Q API token not found. Set the QE_TOKEN environment variable.")]
    MissingToken,

    /// Invalid API token.
    #[error("Invalid IBM Q API token")]
    InvalidToken,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("IBM Q API error: {message}")]
    ApiError {
        /// Error code from API.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A backend operation failed (job retrieval, foreign or legacy jobs).
    #[error("{0}")]
    Backend(String),

    /// A value passed to a backend operation was not recognized.
    #[error("{0}")]
    BackendValue(String),

    /// Backend status could not be parsed.
    #[error("Couldn't get backend status: {0}")]
    Lookup(String),

    /// Backend not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job could not be submitted.
    #[error("Job submission failed: {0}")]
    JobSubmission(String),

    /// Invalid parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IbmqError {
    /// Build the error reported when a single job cannot be retrieved.
    pub(crate) fn job_retrieval(job_id: &str, reason: impl std::fmt::Display) -> Self {
        IbmqError::Backend(format!("Failed to get job \"{job_id}\": {reason}"))
    }
}

impl From<IbmqError> for qbridge_hal::HalError {
    fn from(e: IbmqError) -> Self {
        match e {
            IbmqError::MissingToken | IbmqError::InvalidToken => {
                qbridge_hal::HalError::AuthenticationFailed(e.to_string())
            }
            IbmqError::HttpError(err) => qbridge_hal::HalError::Network(err),
            IbmqError::JsonError(err) => qbridge_hal::HalError::Serialization(err),
            IbmqError::BackendValue(msg) => qbridge_hal::HalError::InvalidValue(msg),
            IbmqError::Lookup(_) => qbridge_hal::HalError::StatusLookup(e.to_string()),
            IbmqError::BackendUnavailable(msg) => qbridge_hal::HalError::BackendUnavailable(msg),
            IbmqError::JobNotFound(id) => qbridge_hal::HalError::JobNotFound(id),
            IbmqError::JobSubmission(msg) => qbridge_hal::HalError::SubmissionFailed(msg),
            IbmqError::InvalidParameter(msg) => qbridge_hal::HalError::Configuration(msg),
            _ => qbridge_hal::HalError::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = IbmqError::MissingToken;
        assert!(err.to_string().contains("QE_TOKEN"));
    }

    #[test]
    fn test_job_retrieval_display() {
        let err = IbmqError::job_retrieval("abc", "not found");
        assert_eq!(err.to_string(), "Failed to get job \"abc\": not found");
    }

    #[test]
    fn test_lookup_display_wraps_detail() {
        let err = IbmqError::Lookup("missing field `pending_jobs`".into());
        let msg = err.to_string();
        assert!(msg.starts_with("Couldn't get backend status"));
        assert!(msg.contains("pending_jobs"));
    }

    #[test]
    fn test_api_error_display() {
        let err = IbmqError::ApiError {
            code: Some("AUTHORIZATION_REQUIRED".into()),
            message: "Authorization Required".into(),
        };
        assert!(err.to_string().contains("Authorization Required"));
    }

    #[test]
    fn test_missing_token_to_hal_auth_failed() {
        let hal: qbridge_hal::HalError = IbmqError::MissingToken.into();
        assert!(matches!(hal, qbridge_hal::HalError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_backend_value_to_hal_invalid_value() {
        let hal: qbridge_hal::HalError = IbmqError::BackendValue("bad status".into()).into();
        assert!(matches!(hal, qbridge_hal::HalError::InvalidValue(msg) if msg == "bad status"));
    }

    #[test]
    fn test_lookup_to_hal_status_lookup() {
        let hal: qbridge_hal::HalError = IbmqError::Lookup("oops".into()).into();
        assert!(
            matches!(hal, qbridge_hal::HalError::StatusLookup(msg) if msg.contains("Couldn't get backend status"))
        );
    }

    #[test]
    fn test_job_submission_to_hal() {
        let hal: qbridge_hal::HalError = IbmqError::JobSubmission("quota".into()).into();
        assert!(matches!(hal, qbridge_hal::HalError::SubmissionFailed(msg) if msg == "quota"));
    }

    #[test]
    fn test_backend_error_to_hal_backend() {
        let hal: qbridge_hal::HalError = IbmqError::job_retrieval("j1", "gone").into();
        assert!(matches!(hal, qbridge_hal::HalError::Backend(msg) if msg.contains("j1")));
    }

    #[test]
    fn test_json_error_to_hal_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let hal: qbridge_hal::HalError = IbmqError::from(json_err).into();
        assert!(matches!(hal, qbridge_hal::HalError::Serialization(_)));
    }
}
