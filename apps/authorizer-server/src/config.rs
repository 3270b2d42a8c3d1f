//! Server configuration.
//!
//! Layered as defaults, then the YAML file, then `AUTHORIZER__*` environment
//! variables (nested keys separated by `__`, e.g. `AUTHORIZER__SERVER__BIND_ADDR`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use dynamodb_credential_store_plugin::DynamoDbCredentialStoreConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use request_authorizer::AuthorizerConfig;
use serde::{Deserialize, Serialize};
use static_credential_store_plugin::StaticCredentialStoreConfig;

pub const ENV_PREFIX: &str = "AUTHORIZER__";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub authorizer: AuthorizerConfig,
    pub credential_store: CredentialStoreConfig,
}

/// Trust-store implementation backing the authorizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Static,
    Dynamodb,
}

/// Backend selector plus the settings of every backend. Only the selected
/// backend's section is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialStoreConfig {
    pub backend: StoreBackend,
    #[serde(rename = "static")]
    pub static_store: StaticCredentialStoreConfig,
    pub dynamodb: DynamoDbCredentialStoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Assemble every configuration layer without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load the configuration.
    ///
    /// # Errors
    ///
    /// If an explicitly given file does not exist, or any layer fails to parse
    /// into the expected shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(missing) = path.filter(|p| !p.is_file()) {
            bail!("config file not found: {}", missing.display());
        }

        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }
}
