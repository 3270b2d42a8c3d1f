//! Configuration for the DynamoDB credential store.

use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DynamoDbCredentialStoreConfig {
    /// AWS region. Falls back to the SDK provider chain when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Endpoint override, e.g. DynamoDB Local.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Table of principals keyed by `id`.
    pub principal_table: String,

    /// Table of bearer tokens keyed by `authKey`.
    pub token_table: String,
}

impl Default for DynamoDbCredentialStoreConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            principal_table: "agents".to_owned(),
            token_table: "auth-keys".to_owned(),
        }
    }
}
