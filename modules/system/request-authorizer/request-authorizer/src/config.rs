//! Configuration for the request authorizer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorizerConfig {
    /// Header carrying the bearer token. Matched case-insensitively.
    pub token_header: String,

    /// Prefix every bearer token must carry before a lookup is attempted.
    /// Empty disables the filter.
    pub token_prefix: String,

    /// Pinned service/scope context for token mode.
    ///
    /// When unset, the service context supplied with the request (the `Host`
    /// header of the gateway event) is used.
    pub service_scope: Option<String>,

    /// Deadline for a single trust-store lookup, in milliseconds.
    pub store_timeout_ms: u64,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            token_header: "authorization".to_owned(),
            token_prefix: String::new(),
            service_scope: None,
            store_timeout_ms: 3000,
        }
    }
}

impl AuthorizerConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
