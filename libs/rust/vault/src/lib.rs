//! In-cluster HashiCorp Vault access for Kubernetes workloads.
//!
//! Logs in through the Kubernetes auth method with the pod's mounted
//! service-account token, then reads single secret fields with the issued
//! token. Nothing is cached: every call performs its own login.
//!
//! ```no_run
//! # async fn example() -> vault_incluster::VaultResult<()> {
//! let password = vault_incluster::in_cluster_secret("secret/data/app", "password").await?;
//! # let _ = password;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod login;
pub mod provider;
pub mod reader;
pub mod secrets;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use login::{CredentialExchanger, in_cluster_client, in_cluster_secret};
pub use provider::SecretStore;
pub use reader::read_field;
pub use secrets::Secret;
