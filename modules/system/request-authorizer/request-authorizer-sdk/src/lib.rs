//! Request Authorizer SDK
//!
//! This crate provides the public API for the `request_authorizer` module:
//!
//! - [`RequestAuthorizerClient`] - Public API trait for the transport adapter
//! - [`CredentialStorePluginClient`] - Trust-store API trait for store implementations
//! - [`AuthorizationRequest`] / [`AuthorizerEvent`] - Inbound request models
//! - [`Decision`] - The rendered gateway policy
//! - [`RequestAuthorizerError`] / [`CredentialStoreError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use request_authorizer_sdk::{AuthorizerEvent, RequestAuthorizerClient};
//!
//! let decision = authorizer.authorize_event(event).await?;
//! if decision.is_allowed() {
//!     // route to the backend
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::RequestAuthorizerClient;
pub use error::{CredentialStoreError, RequestAuthorizerError};
pub use models::{
    AuthorizationRequest, AuthorizerEvent, Decision, Effect, PolicyDocument, PolicyStatement,
    PrincipalRecord, TokenRecord,
};
pub use plugin_api::CredentialStorePluginClient;
