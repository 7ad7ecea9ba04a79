//! Vault error types using thiserror 2.0.
//!
//! Every failure is terminal for the call that produced it. The
//! retryability classification only tells callers whether invoking the
//! whole operation again has a chance of succeeding.

use rust_common::PlatformError;
use std::path::PathBuf;
use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// A required configuration value is missing or empty
    #[error("missing environment variable `{name}`")]
    MissingConfig {
        /// Name of the environment variable carrying the value
        name: &'static str,
    },

    /// A configuration value is present but unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The service-account token could not be read
    #[error("error reading kubernetes service account token from {}: {source}", path.display())]
    TokenRead {
        /// Token file location
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure talking to Vault
    #[error("error communicating with vault: {0}")]
    Network(#[source] reqwest::Error),

    /// The login endpoint answered with a non-success status
    #[error("error retrieving vault auth token: {status} {reason}: {body}")]
    AuthenticationFailed {
        /// Numeric HTTP status
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// A Vault response did not have the expected JSON shape
    #[error("error reading {what}: {source}")]
    Decode {
        /// What was being decoded
        what: &'static str,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// The secret has no data, or its data lacks the requested field
    #[error("field `{field}` not found in secret `{path}`")]
    FieldNotFound {
        /// Requested field name
        field: String,
        /// Requested secret path
        path: String,
    },

    /// A secret read was rejected by Vault
    #[error("error reading secret `{path}`: {status}: {body}")]
    ReadFailed {
        /// Requested secret path
        path: String,
        /// Numeric HTTP status
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// Platform error
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if invoking the failed operation again may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::ReadFailed { status, .. } | Self::AuthenticationFailed { status, .. } => {
                *status == 429 || *status >= 500
            }
            Self::Platform(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Create a missing configuration error.
    #[must_use]
    pub const fn missing_config(name: &'static str) -> Self {
        Self::MissingConfig { name }
    }

    /// Create a field not found error.
    #[must_use]
    pub fn field_not_found(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
            path: path.into(),
        }
    }

    pub(crate) const fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }
}
