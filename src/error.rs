//! Error types for video generation.

use std::time::Duration;

/// Errors that can occur during video generation.
#[derive(Debug, thiserror::Error)]
pub enum ReelGenError {
    /// Prompt or seed image failed validation before submission.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Seed image could not be read or recognized.
    #[error("image encoding failed: {0}")]
    Encoding(String),

    /// The generation service rejected the submission or a status check.
    #[error("submission failed: {status} - {message}")]
    Submission {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error body returned by the service.
        message: String,
    },

    /// The service reported that the generation job itself failed.
    #[error("video generation failed: {0}")]
    JobFailed(String),

    /// Generation finished but the response carried no video reference.
    #[error("generation finished but returned no video")]
    EmptyResult,

    /// Downloading the generated video did not succeed.
    #[error("download failed: {status} - {message}")]
    Download {
        /// HTTP status code of the failed download.
        status: u16,
        /// Status text of the failed download.
        message: String,
    },

    /// The poll loop exceeded the configured maximum wait.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the operation.
    #[error("generation cancelled")]
    Cancelled,

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (e.g. saving the video).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for video generation operations.
pub type Result<T> = std::result::Result<T, ReelGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReelGenError::Download {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "download failed: 404 - Not Found");

        let err = ReelGenError::InvalidInput("prompt must not be empty".into());
        assert_eq!(err.to_string(), "invalid input: prompt must not be empty");

        let err = ReelGenError::EmptyResult;
        assert_eq!(err.to_string(), "generation finished but returned no video");
    }

    #[test]
    fn test_timeout_display_includes_duration() {
        let err = ReelGenError::Timeout(Duration::from_secs(600));
        assert!(err.to_string().contains("600"));
    }
}
