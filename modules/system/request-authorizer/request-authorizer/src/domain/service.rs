//! Authorization pipeline: extract, resolve, validate, render.

use std::sync::Arc;

use request_authorizer_sdk::{
    AuthorizationRequest, AuthorizerEvent, CredentialStorePluginClient, Decision,
};
use tracing::{debug, info};

use super::clock::Clock;
use super::error::DomainError;
use super::extractor::Extractor;
use super::policy;
use super::resolver::Resolver;
use super::store::TrustStore;
use super::validator::Validator;
use super::verdict::Verdict;
use crate::config::AuthorizerConfig;

/// Request authorizer service.
///
/// Holds no per-request state; a single instance serves any number of
/// concurrent decisions.
pub struct Service {
    extractor: Extractor,
    resolver: Resolver,
    validator: Validator,
}

impl Service {
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStorePluginClient>,
        clock: Arc<dyn Clock>,
        cfg: &AuthorizerConfig,
    ) -> Self {
        let store = TrustStore::new(store, cfg.store_timeout());
        info!(
            token_header = %cfg.token_header,
            token_prefix_set = !cfg.token_prefix.is_empty(),
            service_scope = ?cfg.service_scope,
            "Request authorizer configured"
        );

        Self {
            extractor: Extractor::new(&cfg.token_header),
            resolver: Resolver::new(store.clone()),
            validator: Validator::new(
                store,
                clock,
                &cfg.token_prefix,
                cfg.service_scope.as_deref(),
            ),
        }
    }

    /// Evaluate a request to its internal verdict.
    #[tracing::instrument(skip_all, fields(kind = %request.kind, resource = %request.resource))]
    pub async fn evaluate(&self, request: &AuthorizationRequest) -> Verdict {
        let credentials = self.extractor.extract(request);

        let verdict = match self.resolver.resolve(&credentials).await {
            Ok(resolved) => {
                self.validator
                    .validate(resolved, request.service.as_deref())
                    .await
            }
            Err(reason) => Verdict::Deny(reason),
        };

        match &verdict {
            Verdict::Allow(identity) => debug!(principal = %identity, "allowed"),
            Verdict::Deny(reason) => debug!(%reason, "denied"),
        }
        verdict
    }

    /// Evaluate a request and render the gateway decision.
    pub async fn authorize(&self, request: &AuthorizationRequest) -> Decision {
        let verdict = self.evaluate(request).await;
        policy::render(&verdict, &request.resource)
    }

    /// Parse a raw gateway event and authorize it.
    ///
    /// # Errors
    ///
    /// `MalformedRequest` if the event cannot be evaluated.
    pub async fn authorize_event(&self, event: AuthorizerEvent) -> Result<Decision, DomainError> {
        let request = AuthorizationRequest::try_from(event)?;
        Ok(self.authorize(&request).await)
    }
}
