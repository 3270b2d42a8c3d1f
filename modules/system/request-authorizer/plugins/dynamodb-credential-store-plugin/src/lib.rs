#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! DynamoDB Credential Store Plugin
//!
//! Resolves principals and bearer tokens from DynamoDB. Region and
//! credentials come from the standard AWS provider chain unless overridden.
//!
//! ## Configuration
//!
//! ```yaml
//! credential_store:
//!   backend: dynamodb
//!   dynamodb:
//!     region: "eu-west-2"
//!     endpoint: "http://localhost:8000"
//!     principal_table: "agents"
//!     token_table: "auth-keys"
//! ```

pub mod config;
pub mod domain;

pub use config::DynamoDbCredentialStoreConfig;
pub use domain::Service as DynamoDbCredentialStore;
