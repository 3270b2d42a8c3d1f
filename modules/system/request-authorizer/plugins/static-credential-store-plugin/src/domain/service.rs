//! Service implementation for the static credential store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use request_authorizer_sdk::{PrincipalRecord, TokenRecord};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::config::{PrincipalEntry, StaticCredentialStoreConfig};

/// Rejected store configuration.
#[derive(Debug, thiserror::Error)]
pub enum StaticStoreConfigError {
    #[error("principal id must not be empty")]
    EmptyPrincipalId,

    #[error("duplicate principal id '{0}'")]
    DuplicatePrincipal(String),

    #[error("principal '{0}' has a key without a secret or a secret without a key")]
    IncompleteKeyPair(String),

    #[error("token must not be empty")]
    EmptyToken,

    #[error("duplicate token for service '{0}'")]
    DuplicateToken(String),
}

struct KeyedCredential {
    key: String,
    secret: SecretString,
    principal_id: String,
}

/// Static credential store.
///
/// Immutable after construction, so lookups need no synchronization.
pub struct Service {
    principals: HashMap<String, PrincipalRecord>,
    key_pairs: Vec<KeyedCredential>,
    tokens: HashMap<String, TokenRecord>,
}

impl Service {
    /// Build the store from configuration.
    ///
    /// # Errors
    ///
    /// `StaticStoreConfigError` if an id or token is empty or provisioned twice,
    /// or a principal carries only half of a key pair.
    pub fn from_config(cfg: &StaticCredentialStoreConfig) -> Result<Self, StaticStoreConfigError> {
        let mut principals = HashMap::with_capacity(cfg.principals.len());
        let mut key_pairs = Vec::new();

        for entry in &cfg.principals {
            if entry.id.is_empty() {
                return Err(StaticStoreConfigError::EmptyPrincipalId);
            }
            if let Some(credential) = keyed_credential(entry)? {
                key_pairs.push(credential);
            }
            match principals.entry(entry.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(StaticStoreConfigError::DuplicatePrincipal(entry.id.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(PrincipalRecord {
                        id: entry.id.clone(),
                        tenant_id: entry.tenant_id.clone(),
                        name: entry.name.clone(),
                    });
                }
            }
        }

        let mut tokens = HashMap::with_capacity(cfg.tokens.len());
        for entry in &cfg.tokens {
            if entry.token.is_empty() {
                return Err(StaticStoreConfigError::EmptyToken);
            }
            match tokens.entry(entry.token.clone()) {
                Entry::Occupied(_) => {
                    return Err(StaticStoreConfigError::DuplicateToken(entry.service.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(TokenRecord {
                        token: SecretString::from(entry.token.as_str()),
                        expires: entry.expires,
                        service: entry.service.clone(),
                    });
                }
            }
        }

        tracing::info!(
            principals = principals.len(),
            key_pairs = key_pairs.len(),
            tokens = tokens.len(),
            "Static credential store loaded"
        );

        Ok(Self {
            principals,
            key_pairs,
            tokens,
        })
    }

    #[must_use]
    pub fn principal(&self, id: &str) -> Option<PrincipalRecord> {
        self.principals.get(id).cloned()
    }

    /// Every principal provisioned with exactly this key and secret.
    ///
    /// All pairs are compared so the time taken does not depend on where a
    /// match sits.
    #[must_use]
    pub fn principals_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Vec<PrincipalRecord> {
        let presented = secret.expose_secret().as_bytes();
        self.key_pairs
            .iter()
            .filter(|c| {
                let key_eq = c.key.as_bytes().ct_eq(key.as_bytes());
                let secret_eq = c.secret.expose_secret().as_bytes().ct_eq(presented);
                bool::from(key_eq & secret_eq)
            })
            .filter_map(|c| self.principal(&c.principal_id))
            .collect()
    }

    #[must_use]
    pub fn token(&self, token: &SecretString) -> Option<TokenRecord> {
        self.tokens.get(token.expose_secret()).cloned()
    }
}

fn keyed_credential(
    entry: &PrincipalEntry,
) -> Result<Option<KeyedCredential>, StaticStoreConfigError> {
    match (&entry.key, &entry.secret) {
        (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
            Ok(Some(KeyedCredential {
                key: key.clone(),
                secret: SecretString::from(secret.as_str()),
                principal_id: entry.id.clone(),
            }))
        }
        (None, None) => Ok(None),
        _ => Err(StaticStoreConfigError::IncompleteKeyPair(entry.id.clone())),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::TokenEntry;

    fn principal(id: &str, key: Option<&str>, secret: Option<&str>) -> PrincipalEntry {
        PrincipalEntry {
            id: id.to_owned(),
            tenant_id: "b9e9153a-028c-4173-a7a8-e5063334416a".to_owned(),
            name: "test frontend".to_owned(),
            key: key.map(str::to_owned),
            secret: secret.map(str::to_owned),
        }
    }

    fn token(value: &str) -> TokenEntry {
        TokenEntry {
            token: value.to_owned(),
            expires: 1_700_000_600,
            service: "svc.example.com".to_owned(),
        }
    }

    #[test]
    fn principals_are_found_by_id() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![principal("p-1", None, None)],
            tokens: vec![],
        };
        let store = Service::from_config(&cfg).unwrap();

        assert_eq!(store.principal("p-1").unwrap().name, "test frontend");
        assert!(store.principal("p-2").is_none());
    }

    #[test]
    fn key_and_secret_must_both_match() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![principal("p-2", Some("k1"), Some("s1"))],
            tokens: vec![],
        };
        let store = Service::from_config(&cfg).unwrap();

        assert_eq!(
            store.principals_by_key_and_secret("k1", &SecretString::from("s1")).len(),
            1
        );
        assert!(
            store
                .principals_by_key_and_secret("k1", &SecretString::from("wrong"))
                .is_empty()
        );
        assert!(
            store
                .principals_by_key_and_secret("k2", &SecretString::from("s1"))
                .is_empty()
        );
    }

    #[test]
    fn shared_key_pair_returns_every_match() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![
                principal("p-2", Some("k1"), Some("s1")),
                principal("p-3", Some("k1"), Some("s1")),
            ],
            tokens: vec![],
        };
        let store = Service::from_config(&cfg).unwrap();

        assert_eq!(
            store.principals_by_key_and_secret("k1", &SecretString::from("s1")).len(),
            2
        );
    }

    #[test]
    fn duplicate_principal_ids_are_rejected() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![principal("p-1", None, None), principal("p-1", None, None)],
            tokens: vec![],
        };

        assert!(matches!(
            Service::from_config(&cfg),
            Err(StaticStoreConfigError::DuplicatePrincipal(id)) if id == "p-1"
        ));
    }

    #[test]
    fn half_key_pair_is_rejected() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![principal("p-1", Some("k1"), None)],
            tokens: vec![],
        };

        assert!(matches!(
            Service::from_config(&cfg),
            Err(StaticStoreConfigError::IncompleteKeyPair(_))
        ));
    }

    #[test]
    fn duplicate_tokens_are_rejected() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![],
            tokens: vec![token("abc-123"), token("abc-123")],
        };

        assert!(matches!(
            Service::from_config(&cfg),
            Err(StaticStoreConfigError::DuplicateToken(_))
        ));
    }

    #[test]
    fn tokens_are_found_by_value() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![],
            tokens: vec![token("abc-123")],
        };
        let store = Service::from_config(&cfg).unwrap();

        let record = store.token(&SecretString::from("abc-123")).unwrap();
        assert_eq!(record.expires, 1_700_000_600);
        assert_eq!(record.service, "svc.example.com");
        assert!(store.token(&SecretString::from("abc-124")).is_none());
    }

    #[test]
    fn config_debug_redacts_credentials() {
        let cfg = StaticCredentialStoreConfig {
            principals: vec![principal("p-2", Some("k1"), Some("very-secret"))],
            tokens: vec![token("token-value")],
        };
        let rendered = format!("{cfg:?}");

        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("token-value"));
    }
}
