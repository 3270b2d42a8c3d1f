//! Request authorizer as an AWS Lambda function.
//!
//! Configuration comes from the optional YAML file named by
//! `AUTHORIZER_CONFIG`, layered under `AUTHORIZER__*` environment variables.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;
use std::sync::Arc;

use authorizer_server::config::AppConfig;
use authorizer_server::{bootstrap, lambda};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use request_authorizer_sdk::AuthorizerEvent;

const CONFIG_PATH_VAR: &str = "AUTHORIZER_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let cfg = AppConfig::load(path.as_deref())?;

    bootstrap::init_tracing(&cfg.logging)?;
    let authorizer = bootstrap::authorizer(&cfg).await?;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<AuthorizerEvent>| {
        let authorizer = Arc::clone(&authorizer);
        async move { lambda::handle(authorizer.as_ref(), event).await }
    }))
    .await
}
