//! Credential resolution.
//!
//! Turns the highest-precedence credential into a candidate identity. Only
//! key/secret resolution touches the trust store; asserted ids and bearer
//! tokens are handed to the validator as they are.

use request_authorizer_sdk::{CredentialStoreError, PrincipalRecord};
use secrecy::SecretString;
use tracing::warn;

use super::extractor::{ExtractedCredentials, RawCredential};
use super::store::TrustStore;
use super::verdict::DenyReason;

/// Candidate identity produced by resolution.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// Principal id claimed by the caller; not yet trusted.
    Asserted(String),
    /// Principal backed by the record that matched the key/secret pair.
    Verified(PrincipalRecord),
    /// Bearer token, which is both credential and candidate identity.
    Token(SecretString),
}

pub struct Resolver {
    store: TrustStore,
}

impl Resolver {
    #[must_use]
    pub fn new(store: TrustStore) -> Self {
        Self { store }
    }

    /// Resolve the highest-precedence credential.
    ///
    /// # Errors
    ///
    /// The deny reason when no credential is usable. Only the selected form
    /// is checked for conflicting values. Store faults are folded into
    /// `StoreFault` and never surface as errors of their own.
    pub async fn resolve(&self, credentials: &ExtractedCredentials) -> Result<Resolved, DenyReason> {
        let selected = credentials.select().ok_or(DenyReason::NoCredential)?;
        if credentials.is_conflicting(selected.kind()) {
            return Err(DenyReason::ConflictingCredentials);
        }

        match selected {
            RawCredential::PrincipalAssertion(id) => Ok(Resolved::Asserted(id)),
            RawCredential::KeyPair { key, secret } => self.resolve_key_pair(&key, &secret).await,
            RawCredential::BearerToken(token) => Ok(Resolved::Token(token)),
        }
    }

    async fn resolve_key_pair(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Resolved, DenyReason> {
        match self.store.principal_by_key_and_secret(key, secret).await {
            Ok(Some(record)) if !record.id.is_empty() => Ok(Resolved::Verified(record)),
            Ok(_) => Err(DenyReason::UnknownPrincipal),
            Err(CredentialStoreError::Ambiguous { matches }) => {
                warn!(matches, "key/secret lookup matched more than one principal");
                Err(DenyReason::AmbiguousMatch)
            }
            Err(e) => {
                warn!(error = %e, "key/secret lookup failed");
                Err(DenyReason::StoreFault)
            }
        }
    }
}
