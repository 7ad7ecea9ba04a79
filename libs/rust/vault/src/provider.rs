//! Secret store abstraction used by the field reader.

use crate::{error::VaultResult, secrets::Secret};
use async_trait::async_trait;

/// Anything that can answer a logical read by path.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the secret stored at `path`.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    async fn read(&self, path: &str) -> VaultResult<Option<Secret>>;
}
