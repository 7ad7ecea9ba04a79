//! HTTP transport configuration and building.
//!
//! No timeouts are imposed unless the caller sets them: latency bounds are
//! a deployment decision, not something the helpers pick on their own.

use crate::error::PlatformError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout (default: none)
    pub timeout: Option<Duration>,
    /// Connection timeout (default: none)
    pub connect_timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: format!("vault-incluster/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Set the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Parse a timeout given as whole seconds, optionally suffixed with `s`
/// (`"30"` or `"30s"`).
///
/// # Errors
///
/// Returns [`PlatformError::InvalidInput`] for anything else.
///
/// # Examples
///
/// ```
/// use rust_common::http::parse_timeout;
/// use std::time::Duration;
///
/// assert_eq!(parse_timeout("30s").unwrap(), Duration::from_secs(30));
/// assert!(parse_timeout("soon").is_err());
/// ```
pub fn parse_timeout(raw: &str) -> Result<Duration, PlatformError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
    digits
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| PlatformError::invalid_input(format!("invalid timeout `{raw}`")))
}

/// Build a configured HTTP client.
///
/// Creates a reqwest client with rustls TLS and the given timeouts.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
pub fn build_http_client(config: &HttpConfig) -> Result<Client, PlatformError> {
    let mut builder = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .use_rustls_tls();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }

    builder.build().map_err(PlatformError::from)
}
