//! Single-field secret reads.

use crate::{
    error::{VaultError, VaultResult},
    provider::SecretStore,
    secrets::Secret,
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Read the secret at `path` from `store` and return `field` as a string.
///
/// Read errors are returned unchanged.
///
/// # Errors
///
/// [`VaultError::FieldNotFound`] if nothing is stored at `path`, the secret
/// has no data, or the data lacks `field`.
#[instrument(skip(store))]
pub async fn read_field<S>(store: &S, path: &str, field: &str) -> VaultResult<String>
where
    S: SecretStore + ?Sized,
{
    let secret = store.read(path).await?;
    extract_field(secret.as_ref(), path, field)
}

/// Pull `field` out of a read result.
///
/// # Errors
///
/// [`VaultError::FieldNotFound`] when the secret, its data or the field is
/// absent.
pub fn extract_field(secret: Option<&Secret>, path: &str, field: &str) -> VaultResult<String> {
    let Some(secret) = secret.filter(|s| s.data.is_some()) else {
        debug!(path, "Secret has no data");
        return Err(VaultError::field_not_found(field, path));
    };

    secret.field(field).map(render_value).ok_or_else(|| {
        debug!(path, field, "Field missing from secret data");
        VaultError::field_not_found(field, path)
    })
}

/// Render a secret value as text.
///
/// Strings come out verbatim. Every other value, `null` included, comes out
/// as compact JSON: `null` renders as `null`, `[1,2]` and `{"a":1}` keep
/// their JSON form.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
