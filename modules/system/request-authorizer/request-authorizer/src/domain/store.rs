//! Deadline-bounded access to the trust store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use request_authorizer_sdk::{
    CredentialStoreError, CredentialStorePluginClient, PrincipalRecord, TokenRecord,
};
use secrecy::SecretString;

/// Trust store handle shared by the resolver and the validator.
///
/// Every call is bounded by the configured deadline; an elapsed deadline is
/// reported as `Unavailable` like any other store fault.
#[derive(Clone)]
pub struct TrustStore {
    inner: Arc<dyn CredentialStorePluginClient>,
    timeout: Duration,
}

impl TrustStore {
    #[must_use]
    pub fn new(inner: Arc<dyn CredentialStorePluginClient>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// # Errors
    ///
    /// Any store fault, including an elapsed deadline.
    pub async fn principal_by_id(
        &self,
        id: &str,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        self.bounded(self.inner.get_principal_by_id(id)).await
    }

    /// # Errors
    ///
    /// `Ambiguous` when more than one principal matches, otherwise any store
    /// fault.
    pub async fn principal_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        self.bounded(self.inner.find_principal_by_key_and_secret(key, secret))
            .await
    }

    /// # Errors
    ///
    /// Any store fault, including an elapsed deadline.
    pub async fn token_record(
        &self,
        token: &SecretString,
    ) -> Result<Option<TokenRecord>, CredentialStoreError> {
        self.bounded(self.inner.get_token_record(token)).await
    }

    async fn bounded<T>(
        &self,
        lookup: impl Future<Output = Result<T, CredentialStoreError>>,
    ) -> Result<T, CredentialStoreError> {
        tokio::time::timeout(self.timeout, lookup)
            .await
            .unwrap_or_else(|_| {
                Err(CredentialStoreError::Unavailable(format!(
                    "lookup timed out after {}ms",
                    self.timeout.as_millis()
                )))
            })
    }
}
