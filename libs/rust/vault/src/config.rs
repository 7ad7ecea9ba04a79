//! Vault client configuration.
//!
//! A [`VaultConfig`] can only be obtained through validating constructors,
//! so holding one means the endpoint, auth mount and role are all present.

use crate::error::{VaultError, VaultResult};
use rust_common::{HttpConfig, http::parse_timeout};
use std::path::{Path, PathBuf};

/// Base URL of the Vault server.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";
/// Mount path of the Kubernetes auth method.
pub const ENV_VAULT_AUTH_PATH: &str = "VAULT_AUTH_PATH";
/// Role requested during login.
pub const ENV_VAULT_ROLE: &str = "VAULT_ROLE";
/// Optional request timeout, whole seconds with an optional `s` suffix.
pub const ENV_VAULT_CLIENT_TIMEOUT: &str = "VAULT_CLIENT_TIMEOUT";

/// Where Kubernetes mounts the pod's service-account token.
pub const DEFAULT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    addr: String,
    auth_path: String,
    role: String,
    token_path: PathBuf,
    http: HttpConfig,
}

impl VaultConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingConfig`] naming the first empty value,
    /// checked in the order address, auth path, role.
    pub fn new(
        addr: impl Into<String>,
        auth_path: impl Into<String>,
        role: impl Into<String>,
    ) -> VaultResult<Self> {
        let addr = required(ENV_VAULT_ADDR, addr.into())?;
        let auth_path = required(ENV_VAULT_AUTH_PATH, auth_path.into())?;
        let role = required(ENV_VAULT_ROLE, role.into())?;

        Ok(Self {
            addr: addr.trim_end_matches('/').to_string(),
            auth_path: auth_path.trim_matches('/').to_string(),
            role,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            http: HttpConfig::default(),
        })
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or empty, or if
    /// `VAULT_CLIENT_TIMEOUT` does not parse.
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`VaultConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> VaultResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| lookup(name).unwrap_or_default();
        let mut config = Self::new(
            var(ENV_VAULT_ADDR),
            var(ENV_VAULT_AUTH_PATH),
            var(ENV_VAULT_ROLE),
        )?;

        if let Some(raw) = lookup(ENV_VAULT_CLIENT_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            let timeout = parse_timeout(&raw).map_err(|e| {
                VaultError::InvalidConfig(format!("`{ENV_VAULT_CLIENT_TIMEOUT}`: {e}"))
            })?;
            config.http = config.http.with_timeout(timeout);
        }

        Ok(config)
    }

    /// Read the service-account token from a different file.
    #[must_use]
    pub fn with_token_path(mut self, token_path: impl Into<PathBuf>) -> Self {
        self.token_path = token_path.into();
        self
    }

    /// Replace the HTTP transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Vault base URL, without trailing slash.
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Kubernetes auth mount path, without surrounding slashes.
    #[must_use]
    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    /// Role requested during login.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Service-account token file.
    #[must_use]
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// HTTP transport settings.
    #[must_use]
    pub const fn http(&self) -> &HttpConfig {
        &self.http
    }

    /// Kubernetes auth login endpoint.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/v1/auth/{}/login", self.addr, self.auth_path)
    }
}

fn required(name: &'static str, value: String) -> VaultResult<String> {
    if value.trim().is_empty() {
        return Err(VaultError::missing_config(name));
    }
    Ok(value)
}
