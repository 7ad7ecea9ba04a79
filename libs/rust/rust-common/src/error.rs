//! Centralized error type for the shared plumbing.
//!
//! Failures that are not specific to one service (building the HTTP
//! transport, installing the tracing subscriber) are reported through
//! [`PlatformError`] so dependent crates can wrap them with `#[from]`.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP transport could not be built or a request failed
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tracing subscriber could not be installed
    #[error("Telemetry initialisation failed: {0}")]
    Telemetry(String),
}

impl PlatformError {
    /// Check if this error is retryable.
    ///
    /// Only transport failures are considered transient; everything else
    /// will fail the same way on a second attempt.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    ///
    /// let err = PlatformError::invalid_input("timeout must be positive");
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a telemetry error with the given message.
    #[must_use]
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }
}
