//! Public API trait for the request authorizer.
//!
//! The transport adapter that receives gateway authorizer events consumes this
//! trait and serializes the returned [`Decision`] back to the gateway.

use async_trait::async_trait;

use crate::error::RequestAuthorizerError;
use crate::models::{AuthorizationRequest, AuthorizerEvent, Decision};

/// Public API trait for the request authorizer.
///
/// ```ignore
/// let decision = authorizer.authorize(request).await?;
/// let body = serde_json::to_string(&decision)?;
/// ```
#[async_trait]
pub trait RequestAuthorizerClient: Send + Sync {
    /// Evaluate an already-parsed authorization request.
    ///
    /// Every evaluated request produces a decision; credential, lookup and
    /// store failures all yield a `Deny` decision rather than an error.
    ///
    /// # Errors
    ///
    /// - `Internal` for unexpected errors
    async fn authorize(
        &self,
        request: AuthorizationRequest,
    ) -> Result<Decision, RequestAuthorizerError>;

    /// Parse a raw gateway event and evaluate it.
    ///
    /// # Errors
    ///
    /// - `MalformedRequest` if the event cannot be evaluated (e.g. no `methodArn`)
    /// - `Internal` for unexpected errors
    async fn authorize_event(
        &self,
        event: AuthorizerEvent,
    ) -> Result<Decision, RequestAuthorizerError>;
}
