//! `vault-secret`: prints one field of a Vault secret.

use anyhow::Context;
use clap::Parser;
use rust_common::{TracingConfig, init_tracing};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use vault_incluster::{CredentialExchanger, VaultConfig};

/// Print one field of a Vault secret, logging in with the pod's
/// Kubernetes service account.
///
/// Reads `VAULT_ADDR`, `VAULT_AUTH_PATH` and `VAULT_ROLE` from the
/// environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "vault-secret", version, about)]
struct Cli {
    /// Secret path, e.g. `secret/data/app`
    path: String,

    /// Field to print
    field: String,

    /// Service-account token file
    #[arg(long)]
    token_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Connection timeout in seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Log level filter (overridden by `RUST_LOG`)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Cli {
    fn vault_config(&self) -> anyhow::Result<VaultConfig> {
        let config = VaultConfig::from_env().context("invalid vault configuration")?;
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: VaultConfig) -> VaultConfig {
        if let Some(token_path) = &self.token_path {
            config = config.with_token_path(token_path);
        }
        let mut http = config
            .http()
            .clone()
            .with_user_agent(format!("vault-secret/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = self.timeout {
            http = http.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout {
            http = http.with_connect_timeout(Duration::from_secs(secs));
        }
        config.with_http(http)
    }

    fn tracing_config(&self) -> TracingConfig {
        let config = TracingConfig::default()
            .with_service_name("vault-secret")
            .with_log_level(&self.log_level);
        if self.log_json {
            config.with_json_output()
        } else {
            config
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.tracing_config()).context("failed to initialise logging")?;

    let exchanger = CredentialExchanger::new(cli.vault_config()?)?;
    debug!(
        addr = %exchanger.config().addr(),
        role = %exchanger.config().role(),
        path = %cli.path,
        field = %cli.field,
        "Reading secret field"
    );

    let value = exchanger
        .read_secret_field(&cli.path, &cli.field)
        .await
        .with_context(|| format!("failed to read `{}` from `{}`", cli.field, cli.path))?;

    println!("{value}");
    Ok(())
}
