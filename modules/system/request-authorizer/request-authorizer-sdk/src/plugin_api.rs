//! Plugin API trait for trust-store implementations.
//!
//! The authorizer performs at most one call on this trait per decision and
//! never writes through it: records are provisioned out of band.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::CredentialStoreError;
use crate::models::{PrincipalRecord, TokenRecord};

/// Trust-store API used by the authorizer to resolve and validate credentials.
#[async_trait]
pub trait CredentialStorePluginClient: Send + Sync {
    /// Point lookup of a principal record by its identifier.
    ///
    /// # Errors
    ///
    /// Any `CredentialStoreError` if the store cannot answer.
    async fn get_principal_by_id(
        &self,
        id: &str,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError>;

    /// Find the principal provisioned with both `key` and `secret`.
    ///
    /// # Errors
    ///
    /// - `Ambiguous` if more than one record matches
    /// - any other `CredentialStoreError` if the store cannot answer
    async fn find_principal_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError>;

    /// Point lookup of a token record keyed by the literal token string.
    ///
    /// # Errors
    ///
    /// Any `CredentialStoreError` if the store cannot answer.
    async fn get_token_record(
        &self,
        token: &SecretString,
    ) -> Result<Option<TokenRecord>, CredentialStoreError>;
}
