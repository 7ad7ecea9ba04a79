//! Kubernetes auth login: trades the pod's service-account token for a
//! Vault bearer token.

use crate::{
    client::VaultClient,
    config::VaultConfig,
    error::{VaultError, VaultResult},
    reader,
    secrets::{AuthResponse, LoginRequest},
};
use reqwest::{Client, StatusCode};
use rust_common::build_http_client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::Error as _;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Performs the login exchange. Holds no token state: every call to
/// [`CredentialExchanger::login`] reads the token file and logs in again.
#[derive(Debug, Clone)]
pub struct CredentialExchanger {
    config: VaultConfig,
    http: Client,
}

impl CredentialExchanger {
    /// Create an exchanger and its HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(config: VaultConfig) -> VaultResult<Self> {
        let http = build_http_client(config.http())?;
        Ok(Self { config, http })
    }

    /// Create an exchanger configured from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MissingConfig`] before any I/O if a required
    /// variable is absent.
    pub fn from_env() -> VaultResult<Self> {
        Self::new(VaultConfig::from_env()?)
    }

    /// Configuration this exchanger logs in with.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Log in and return a handle bearing the issued token.
    ///
    /// # Errors
    ///
    /// - [`VaultError::TokenRead`] if the service-account token is unreadable
    /// - [`VaultError::Network`] on transport failure
    /// - [`VaultError::AuthenticationFailed`] on any status other than 200
    /// - [`VaultError::Decode`] if the response carries no client token
    #[instrument(skip(self), fields(
        addr = %self.config.addr(),
        auth_path = %self.config.auth_path(),
        role = %self.config.role(),
    ))]
    pub async fn login(&self) -> VaultResult<VaultClient> {
        let jwt = read_identity_token(self.config.token_path()).await?;

        let request = LoginRequest {
            jwt: jwt.expose_secret(),
            role: self.config.role(),
        };

        debug!("Sending kubernetes login request");
        let response = self
            .http
            .post(self.config.login_url())
            .json(&request)
            .send()
            .await
            .map_err(VaultError::Network)?;

        // read the body before deciding anything so every exit path drains it
        let status = response.status();
        let body = response.bytes().await.map_err(VaultError::Network)?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Vault rejected login");
            return Err(VaultError::AuthenticationFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let auth: AuthResponse =
            serde_json::from_slice(&body).map_err(|e| VaultError::decode("client token", e))?;
        if auth.auth.client_token.is_empty() {
            return Err(VaultError::decode(
                "client token",
                serde_json::Error::custom("login response carried an empty client token"),
            ));
        }

        info!("Authenticated with Vault");
        Ok(VaultClient::new(
            self.http.clone(),
            self.config.addr(),
            SecretString::from(auth.auth.client_token),
        ))
    }

    /// Log in afresh and read one field of the secret at `path`.
    ///
    /// # Errors
    ///
    /// Any login error, any error from the read itself, or
    /// [`VaultError::FieldNotFound`].
    pub async fn read_secret_field(&self, path: &str, field: &str) -> VaultResult<String> {
        let client = self.login().await?;
        reader::read_field(&client, path, field).await
    }
}

async fn read_identity_token(path: &Path) -> VaultResult<SecretString> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| VaultError::TokenRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(SecretString::from(raw))
}

/// Log in with configuration taken from `VAULT_ADDR`, `VAULT_AUTH_PATH`
/// and `VAULT_ROLE`.
///
/// # Errors
///
/// See [`VaultConfig::from_env`] and [`CredentialExchanger::login`].
pub async fn in_cluster_client() -> VaultResult<VaultClient> {
    CredentialExchanger::from_env()?.login().await
}

/// Log in with configuration from the environment and read one field.
///
/// # Errors
///
/// See [`in_cluster_client`] and [`reader::read_field`].
pub async fn in_cluster_secret(path: &str, field: &str) -> VaultResult<String> {
    CredentialExchanger::from_env()?
        .read_secret_field(path, field)
        .await
}
