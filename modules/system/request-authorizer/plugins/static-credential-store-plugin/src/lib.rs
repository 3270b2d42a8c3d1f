#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Credential Store Plugin
//!
//! A read-only trust store provisioned entirely from configuration. Useful for
//! development, tests, and small deployments whose principals and tokens are
//! managed alongside the authorizer's own config.
//!
//! ## Configuration
//!
//! ```yaml
//! credential_store:
//!   backend: static
//!   static:
//!     principals:
//!       - id: "p-1"
//!         tenant_id: "t-1"
//!         name: "frontend agent"
//!         key: "k1"
//!         secret: "s1"
//!     tokens:
//!       - token: "tester-69e668a5"
//!         expires: 1767225600
//!         service: "svc.example.com"
//! ```

pub mod config;
pub mod domain;

pub use config::StaticCredentialStoreConfig;
pub use domain::{Service as StaticCredentialStore, StaticStoreConfigError};
