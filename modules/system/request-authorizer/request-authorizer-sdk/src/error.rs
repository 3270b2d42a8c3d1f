//! Error types for the request authorizer module.

use thiserror::Error;

/// Errors that can occur when using the request authorizer API.
///
/// These are hard failures only: the authorizer could not evaluate the
/// request at all. A rejected credential is expressed as a `Deny` decision,
/// not as an error variant.
#[derive(Debug, Error)]
pub enum RequestAuthorizerError {
    /// The inbound event could not be turned into an authorization request.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// An internal error occurred.
    ///
    /// Reserved for client implementations that cross a process or network
    /// boundary. The in-process engine never returns it.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by a trust-store implementation.
///
/// The authorizer never forwards these to its caller; every variant collapses
/// to a `Deny` decision.
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// The store could not be reached or did not answer in time.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// A lookup that must match at most one record matched several.
    #[error("ambiguous lookup: {matches} records matched")]
    Ambiguous { matches: usize },

    /// The store returned a record that could not be decoded.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
