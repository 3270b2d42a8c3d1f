//! Client implementation for the static credential store.
//!
//! Implements `CredentialStorePluginClient` using the domain service.

use async_trait::async_trait;
use request_authorizer_sdk::{
    CredentialStoreError, CredentialStorePluginClient, PrincipalRecord, TokenRecord,
};
use secrecy::SecretString;

use super::service::Service;

#[async_trait]
impl CredentialStorePluginClient for Service {
    async fn get_principal_by_id(
        &self,
        id: &str,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        Ok(self.principal(id))
    }

    async fn find_principal_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        let mut matches = self.principals_by_key_and_secret(key, secret);
        if matches.len() > 1 {
            return Err(CredentialStoreError::Ambiguous {
                matches: matches.len(),
            });
        }
        Ok(matches.pop())
    }

    async fn get_token_record(
        &self,
        token: &SecretString,
    ) -> Result<Option<TokenRecord>, CredentialStoreError> {
        Ok(self.token(token))
    }
}
