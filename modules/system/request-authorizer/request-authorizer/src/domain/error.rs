//! Domain errors for the request authorizer.

use request_authorizer_sdk::RequestAuthorizerError;

/// Internal domain errors.
///
/// Credential and store failures never appear here: they are absorbed into a
/// `Deny` verdict. Only requests that cannot be evaluated at all do.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Mirrors the SDK variant so conversions stay lossless; the engine itself
    /// never raises it.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RequestAuthorizerError> for DomainError {
    fn from(e: RequestAuthorizerError) -> Self {
        match e {
            RequestAuthorizerError::MalformedRequest(msg) => Self::MalformedRequest(msg),
            RequestAuthorizerError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<DomainError> for RequestAuthorizerError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MalformedRequest(msg) => Self::MalformedRequest(msg),
            DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}
