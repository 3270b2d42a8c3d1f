//! Local (in-process) client for the request authorizer.

use std::sync::Arc;

use async_trait::async_trait;
use request_authorizer_sdk::{
    AuthorizationRequest, AuthorizerEvent, Decision, RequestAuthorizerClient,
    RequestAuthorizerError,
};

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Handed to the transport adapter at startup.
pub struct RequestAuthorizerLocalClient {
    svc: Arc<Service>,
}

impl RequestAuthorizerLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> RequestAuthorizerError {
    match &e {
        DomainError::MalformedRequest(_) => {
            tracing::warn!(operation = op, error = %e, "request_authorizer rejected event");
        }
        DomainError::Internal(_) => {
            tracing::error!(operation = op, error = %e, "request_authorizer call failed");
        }
    }
    e.into()
}

#[async_trait]
impl RequestAuthorizerClient for RequestAuthorizerLocalClient {
    async fn authorize(
        &self,
        request: AuthorizationRequest,
    ) -> Result<Decision, RequestAuthorizerError> {
        Ok(self.svc.authorize(&request).await)
    }

    async fn authorize_event(
        &self,
        event: AuthorizerEvent,
    ) -> Result<Decision, RequestAuthorizerError> {
        self.svc
            .authorize_event(event)
            .await
            .map_err(|e| log_and_convert("authorize_event", e))
    }
}
