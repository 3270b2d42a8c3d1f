//! Internal outcome of an evaluation.
//!
//! The gateway only ever sees Allow or Deny. The reason behind a deny is kept
//! here so it can be logged and asserted on, never serialized.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Identity a decision was evaluated for.
#[derive(Debug, Clone)]
pub enum PrincipalIdentity {
    /// A principal identifier from the trust store.
    Principal(String),
    /// A bearer token; token-mode credentials have no separate identifier.
    Token(SecretString),
}

impl PrincipalIdentity {
    /// Raw identifier. For token identities this is the token itself.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Principal(id) => id,
            Self::Token(token) => token.expose_secret(),
        }
    }
}

impl fmt::Display for PrincipalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Principal(id) => f.write_str(id),
            Self::Token(_) => f.write_str("<token>"),
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No recognized credential header was present.
    NoCredential,
    /// The same credential was supplied with different values.
    ConflictingCredentials,
    /// No principal matches the asserted id or the key/secret pair.
    UnknownPrincipal,
    /// The key/secret pair matched more than one principal.
    AmbiguousMatch,
    /// The token does not carry the configured prefix.
    TokenPrefixMismatch,
    /// No token record exists for the token.
    UnknownToken,
    /// The token record is past its expiry.
    TokenExpired,
    /// The token is restricted to another service.
    ScopeMismatch,
    /// No service context was available to match the token against.
    ScopeUnavailable,
    /// The trust store failed or timed out.
    StoreFault,
}

impl DenyReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::ConflictingCredentials => "conflicting_credentials",
            Self::UnknownPrincipal => "unknown_principal",
            Self::AmbiguousMatch => "ambiguous_match",
            Self::TokenPrefixMismatch => "token_prefix_mismatch",
            Self::UnknownToken => "unknown_token",
            Self::TokenExpired => "token_expired",
            Self::ScopeMismatch => "scope_mismatch",
            Self::ScopeUnavailable => "scope_unavailable",
            Self::StoreFault => "store_fault",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single evaluation.
#[derive(Debug, Clone)]
pub enum Verdict {
    Allow(PrincipalIdentity),
    Deny(DenyReason),
}

impl Verdict {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    #[must_use]
    pub fn principal(&self) -> Option<&PrincipalIdentity> {
        match self {
            Self::Allow(identity) => Some(identity),
            Self::Deny(_) => None,
        }
    }

    #[must_use]
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow(_) => None,
            Self::Deny(reason) => Some(*reason),
        }
    }
}
