//! Authenticated Vault client handle.

use crate::{
    error::{VaultError, VaultResult},
    provider::SecretStore,
    secrets::Secret,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{debug, instrument};

/// Header carrying the bearer token on every request.
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Vault client bound to one server and one bearer token.
///
/// Dropping the handle is all the cleanup there is; the token is not revoked.
#[derive(Clone)]
pub struct VaultClient {
    http: Client,
    addr: String,
    token: SecretString,
}

impl VaultClient {
    /// Create a handle from an existing transport.
    #[must_use]
    pub fn new(http: Client, addr: impl Into<String>, token: SecretString) -> Self {
        Self {
            http,
            addr: addr.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Vault base URL.
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Bearer token presented on requests.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Replace the bearer token.
    pub fn set_token(&mut self, token: SecretString) {
        self.token = token;
    }
}

impl fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultClient")
            .field("addr", &self.addr)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> VaultResult<Option<Secret>> {
        let url = format!("{}/v1/{}", self.addr, path.trim_start_matches('/'));
        debug!(addr = %self.addr, "Reading secret");

        let response = self
            .http
            .get(&url)
            .header(VAULT_TOKEN_HEADER, self.token.expose_secret())
            .send()
            .await
            .map_err(VaultError::Network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(VaultError::Network)?;

        if status == StatusCode::NOT_FOUND {
            debug!(path, "No secret at path");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(VaultError::ReadFailed {
                path: path.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| VaultError::decode("secret", e))
    }
}
