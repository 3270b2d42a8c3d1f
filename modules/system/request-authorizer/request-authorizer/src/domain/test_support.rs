//! Test doubles shared by the domain unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use request_authorizer_sdk::{
    CredentialStoreError, CredentialStorePluginClient, PrincipalRecord, TokenRecord,
};
use secrecy::{ExposeSecret, SecretString};

use super::store::TrustStore;

pub const ARN: &str =
    "arn:aws:execute-api:eu-west-2:123456789:wmcwzleu0i/ESTestInvoke-stage/GET/";
pub const NOW: i64 = 1_700_000_000;
pub const SERVICE: &str = "svc.example.com";

/// How the mock store should misbehave.
#[derive(Clone, Copy, Default)]
pub enum Fault {
    #[default]
    None,
    Unavailable,
    Stall,
}

struct KeyedPrincipal {
    record: PrincipalRecord,
    key: String,
    secret: String,
}

/// In-memory store that counts every lookup it serves.
#[derive(Default)]
pub struct MockStore {
    principals: Vec<KeyedPrincipal>,
    tokens: Vec<TokenRecord>,
    fault: Fault,
    calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principal(mut self, id: &str, key: &str, secret: &str) -> Self {
        self.principals.push(KeyedPrincipal {
            record: PrincipalRecord {
                id: id.to_owned(),
                tenant_id: "tenant-1".to_owned(),
                name: format!("agent {id}"),
            },
            key: key.to_owned(),
            secret: secret.to_owned(),
        });
        self
    }

    pub fn with_token(mut self, token: &str, expires: i64, service: &str) -> Self {
        self.tokens.push(TokenRecord {
            token: SecretString::from(token),
            expires,
            service: service.to_owned(),
        });
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), CredentialStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fault {
            Fault::None => Ok(()),
            Fault::Unavailable => Err(CredentialStoreError::Unavailable(
                "connection refused".to_owned(),
            )),
            Fault::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl CredentialStorePluginClient for MockStore {
    async fn get_principal_by_id(
        &self,
        id: &str,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        self.enter().await?;
        Ok(self
            .principals
            .iter()
            .find(|p| p.record.id == id)
            .map(|p| p.record.clone()))
    }

    async fn find_principal_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        self.enter().await?;
        let matches: Vec<_> = self
            .principals
            .iter()
            .filter(|p| p.key == key && p.secret == secret.expose_secret())
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(only.record.clone())),
            many => Err(CredentialStoreError::Ambiguous {
                matches: many.len(),
            }),
        }
    }

    async fn get_token_record(
        &self,
        token: &SecretString,
    ) -> Result<Option<TokenRecord>, CredentialStoreError> {
        self.enter().await?;
        Ok(self
            .tokens
            .iter()
            .find(|t| t.token.expose_secret() == token.expose_secret())
            .cloned())
    }
}

pub fn trust_store(store: &Arc<MockStore>) -> TrustStore {
    let inner: Arc<dyn CredentialStorePluginClient> = store.clone();
    TrustStore::new(inner, Duration::from_millis(50))
}
