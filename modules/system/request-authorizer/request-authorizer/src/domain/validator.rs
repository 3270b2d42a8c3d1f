//! Trust validation of resolved identities.
//!
//! Principal mode checks existence only. Token mode checks prefix, existence,
//! expiry and service scope, in that order. Any store failure is a deny.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use super::clock::Clock;
use super::resolver::Resolved;
use super::store::TrustStore;
use super::verdict::{DenyReason, PrincipalIdentity, Verdict};

pub struct Validator {
    store: TrustStore,
    clock: Arc<dyn Clock>,
    token_prefix: String,
    service_scope: Option<String>,
}

impl Validator {
    #[must_use]
    pub fn new(
        store: TrustStore,
        clock: Arc<dyn Clock>,
        token_prefix: &str,
        service_scope: Option<&str>,
    ) -> Self {
        Self {
            store,
            clock,
            token_prefix: token_prefix.to_owned(),
            service_scope: service_scope.map(str::to_owned),
        }
    }

    /// Validate a resolved identity against the trust store.
    ///
    /// `request_service` is the service context supplied with the request; a
    /// configured service scope takes its place when present.
    pub async fn validate(&self, resolved: Resolved, request_service: Option<&str>) -> Verdict {
        match resolved {
            Resolved::Asserted(id) => self.validate_principal(id).await,
            Resolved::Verified(record) => Verdict::Allow(PrincipalIdentity::Principal(record.id)),
            Resolved::Token(token) => {
                let scope = self.service_scope.as_deref().or(request_service);
                self.validate_token(token, scope).await
            }
        }
    }

    async fn validate_principal(&self, id: String) -> Verdict {
        match self.store.principal_by_id(&id).await {
            Ok(Some(_)) => Verdict::Allow(PrincipalIdentity::Principal(id)),
            Ok(None) => Verdict::Deny(DenyReason::UnknownPrincipal),
            Err(e) => {
                warn!(error = %e, "principal lookup failed");
                Verdict::Deny(DenyReason::StoreFault)
            }
        }
    }

    async fn validate_token(&self, token: SecretString, scope: Option<&str>) -> Verdict {
        if !token.expose_secret().starts_with(&self.token_prefix) {
            return Verdict::Deny(DenyReason::TokenPrefixMismatch);
        }
        let Some(scope) = scope else {
            return Verdict::Deny(DenyReason::ScopeUnavailable);
        };

        let record = match self.store.token_record(&token).await {
            Ok(Some(record)) => record,
            Ok(None) => return Verdict::Deny(DenyReason::UnknownToken),
            Err(e) => {
                warn!(error = %e, "token lookup failed");
                return Verdict::Deny(DenyReason::StoreFault);
            }
        };

        if self.clock.now_unix() > record.expires {
            return Verdict::Deny(DenyReason::TokenExpired);
        }
        if record.service != scope {
            return Verdict::Deny(DenyReason::ScopeMismatch);
        }

        Verdict::Allow(PrincipalIdentity::Token(token))
    }
}
