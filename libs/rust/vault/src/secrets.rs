//! Wire types for the Vault HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kubernetes auth login request body.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    /// Service-account token
    pub jwt: &'a str,
    /// Role to log in as
    pub role: &'a str,
}

/// Vault auth response. Everything except the client token is dropped.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    /// Authentication result
    pub auth: AuthData,
}

/// Authentication result carried by a login response.
#[derive(Deserialize)]
pub struct AuthData {
    /// Bearer token for subsequent requests
    pub client_token: String,
}

impl fmt::Debug for AuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthData")
            .field("client_token", &"[REDACTED]")
            .finish()
    }
}

/// Envelope of a logical read.
#[derive(Clone, Default, Deserialize)]
pub struct Secret {
    /// Request identifier assigned by Vault
    #[serde(default)]
    pub request_id: String,
    /// Lease identifier, empty for static secrets
    #[serde(default)]
    pub lease_id: String,
    /// Lease duration in seconds
    #[serde(default)]
    pub lease_duration: u64,
    /// Whether the lease is renewable
    #[serde(default)]
    pub renewable: bool,
    /// Secret payload
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    /// Warnings attached by Vault
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl Secret {
    /// Look up one field of the payload.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref()?.get(name)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Option<Vec<&String>> = self.data.as_ref().map(|d| d.keys().collect());
        f.debug_struct("Secret")
            .field("request_id", &self.request_id)
            .field("lease_id", &self.lease_id)
            .field("lease_duration", &self.lease_duration)
            .field("renewable", &self.renewable)
            .field("data_keys", &keys)
            .field("warnings", &self.warnings)
            .finish()
    }
}
