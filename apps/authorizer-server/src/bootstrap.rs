//! Startup shared by every entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use dynamodb_credential_store_plugin::DynamoDbCredentialStore;
use request_authorizer::{RequestAuthorizerLocalClient, Service, SystemClock};
use request_authorizer_sdk::{CredentialStorePluginClient, RequestAuthorizerClient};
use static_credential_store_plugin::StaticCredentialStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, CredentialStoreConfig, LoggingConfig, StoreBackend};

/// Install the global tracing subscriber. `RUST_LOG` wins over `logging.level`.
///
/// # Errors
///
/// If the level directive does not parse or a subscriber is already installed.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid logging.level '{}'", cfg.level))?,
    };

    let fmt_layer = if cfg.json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Build the configured trust store.
///
/// # Errors
///
/// If the static backend's provisioning is invalid.
pub async fn credential_store(
    cfg: &CredentialStoreConfig,
) -> Result<Arc<dyn CredentialStorePluginClient>> {
    match cfg.backend {
        StoreBackend::Static => {
            let store = StaticCredentialStore::from_config(&cfg.static_store)
                .context("invalid credential_store.static configuration")?;
            info!(
                principals = cfg.static_store.principals.len(),
                tokens = cfg.static_store.tokens.len(),
                "Static credential store provisioned"
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Dynamodb => Ok(Arc::new(
            DynamoDbCredentialStore::connect(&cfg.dynamodb).await,
        )),
    }
}

/// Wire the trust store, wall clock and engine into one client.
///
/// # Errors
///
/// See [`credential_store`].
pub async fn authorizer(cfg: &AppConfig) -> Result<Arc<dyn RequestAuthorizerClient>> {
    let store = credential_store(&cfg.credential_store).await?;
    let svc = Arc::new(Service::new(store, Arc::new(SystemClock), &cfg.authorizer));
    Ok(Arc::new(RequestAuthorizerLocalClient::new(svc)))
}
