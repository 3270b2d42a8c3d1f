//! AWS Lambda adapter.
//!
//! The gateway invokes the function with the authorizer event as payload and
//! expects the decision document back. A Deny is a successful invocation;
//! only an event that cannot be evaluated fails it.

use lambda_runtime::{Error, LambdaEvent};
use request_authorizer_sdk::{AuthorizerEvent, Decision, RequestAuthorizerClient};
use tracing::debug;

/// Handle one invocation.
///
/// # Errors
///
/// If the authorizer rejects the event as malformed.
pub async fn handle(
    authorizer: &dyn RequestAuthorizerClient,
    event: LambdaEvent<AuthorizerEvent>,
) -> Result<Decision, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "Authorizer invoked");

    Ok(authorizer.authorize_event(payload).await?)
}
