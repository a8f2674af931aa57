//! Error types for streamio-core
//!
//! This module defines error types using thiserror for ergonomic error
//! handling. Errors are categorized by domain (API, download, file,
//! storage) so callers can branch on the failure class without string
//! matching.

use thiserror::Error;

/// Result type alias using our StreamioError type
pub type Result<T> = std::result::Result<T, StreamioError>;

/// Main error type for streamio-core
#[derive(Error, Debug)]
pub enum StreamioError {
    // ===== API Errors =====

    /// Generic API request failure
    #[error("API request failed: {message}")]
    ApiRequestFailed {
        message: String,
        /// HTTP status code if available
        status_code: Option<u16>,
        /// API endpoint that failed
        endpoint: Option<String>,
    },

    /// API returned invalid or unexpected response format
    #[error("Invalid API response: {message}")]
    InvalidApiResponse { message: String },

    /// API rate limiting (HTTP 429)
    #[error("API rate limit exceeded. Retry after {retry_after_seconds} seconds")]
    RateLimitExceeded {
        retry_after_seconds: u64,
        endpoint: String,
    },

    // ===== Download Errors =====

    /// Generic download failure
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// Network connectivity error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        /// Whether this error might be transient
        is_transient: bool,
    },

    /// Server returned unexpected status code during a transfer
    #[error("Server responded with unexpected status code: {status_code}")]
    UnexpectedStatusCode { status_code: u16, url: String },

    /// Operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    // ===== File/Storage Errors =====

    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Generic file I/O error
    #[error("File I/O error: {0}")]
    FileIoError(String),

    /// Invalid file path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The download directory could not be created
    #[error("Could not initialize download directory: {0}")]
    DownloadDirectoryInit(String),

    /// Key-value storage backend failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Record not found in a persisted collection
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    // ===== General Errors =====

    /// Generic input validation error
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error that should not normally occur
    #[error("Internal error: {0}")]
    InternalError(String),

    // ===== External Library Errors =====

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl StreamioError {
    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: Option<u16>,
        endpoint: Option<String>,
    ) -> Self {
        StreamioError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint,
        }
    }

    /// Create a NetworkError
    pub fn network_error<S: Into<String>>(message: S, is_transient: bool) -> Self {
        StreamioError::NetworkError {
            message: message.into(),
            is_transient,
        }
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        StreamioError::InvalidInput(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        StreamioError::InternalError(message.into())
    }

    /// Check if error is retryable (transient network errors, 5xx, rate limiting)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamioError::NetworkError { is_transient: true, .. }
                | StreamioError::ApiRequestFailed { status_code: Some(500..=599), .. }
                | StreamioError::RateLimitExceeded { .. }
        )
    }

    /// Check if error is related to file/disk operations
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            StreamioError::FileNotFound(_)
                | StreamioError::FileIoError(_)
                | StreamioError::InvalidPath(_)
                | StreamioError::DownloadDirectoryInit(_)
        )
    }

    /// Get retry delay in seconds for retryable errors
    ///
    /// Returns `Some(seconds)` if the error includes retry timing
    /// information, `None` otherwise.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            StreamioError::RateLimitExceeded {
                retry_after_seconds, ..
            } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Get user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            StreamioError::NetworkError { .. } => {
                "A network problem occurred. Please check your connection and try again."
                    .to_string()
            }
            StreamioError::RateLimitExceeded {
                retry_after_seconds,
                ..
            } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                retry_after_seconds
            ),
            StreamioError::DownloadFailed(_) => {
                "The download could not be completed. Please try again.".to_string()
            }
            StreamioError::Cancelled => "The operation was cancelled.".to_string(),
            _ => self.to_string(),
        }
    }
}
