//! Credential extraction from request headers.
//!
//! The extractor never fails: a request without credentials is represented by
//! an empty [`ExtractedCredentials`] and denied further down the pipeline.

use request_authorizer_sdk::AuthorizationRequest;
use secrecy::SecretString;

/// Header carrying an explicitly asserted principal id.
pub const PRINCIPAL_HEADER: &str = "x-agent-id";
/// Header carrying the API key half of a key pair.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the API secret half of a key pair.
pub const API_SECRET_HEADER: &str = "x-api-secret";

const BEARER_SCHEME: &str = "bearer ";

/// Credential forms the authorizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    PrincipalAssertion,
    KeyPair,
    BearerToken,
}

/// Order in which credential forms are consulted when several are present.
pub const PRECEDENCE: [CredentialKind; 3] = [
    CredentialKind::PrincipalAssertion,
    CredentialKind::KeyPair,
    CredentialKind::BearerToken,
];

/// A single credential taken from the request.
#[derive(Debug, Clone)]
pub enum RawCredential {
    BearerToken(SecretString),
    PrincipalAssertion(String),
    KeyPair { key: String, secret: SecretString },
}

impl RawCredential {
    #[must_use]
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::BearerToken(_) => CredentialKind::BearerToken,
            Self::PrincipalAssertion(_) => CredentialKind::PrincipalAssertion,
            Self::KeyPair { .. } => CredentialKind::KeyPair,
        }
    }
}

/// Every credential form found on a request.
#[derive(Debug, Default, Clone)]
pub struct ExtractedCredentials {
    principal: Option<String>,
    key_pair: Option<(String, SecretString)>,
    bearer: Option<SecretString>,
    principal_conflict: bool,
    key_pair_conflict: bool,
    bearer_conflict: bool,
}

impl ExtractedCredentials {
    /// Whether the given credential form arrived with disagreeing values.
    #[must_use]
    pub fn is_conflicting(&self, kind: CredentialKind) -> bool {
        match kind {
            CredentialKind::PrincipalAssertion => self.principal_conflict,
            CredentialKind::KeyPair => self.key_pair_conflict,
            CredentialKind::BearerToken => self.bearer_conflict,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principal.is_none() && self.key_pair.is_none() && self.bearer.is_none()
    }

    /// The credential of the given form, if present.
    #[must_use]
    pub fn get(&self, kind: CredentialKind) -> Option<RawCredential> {
        match kind {
            CredentialKind::PrincipalAssertion => self
                .principal
                .clone()
                .map(RawCredential::PrincipalAssertion),
            CredentialKind::KeyPair => {
                self.key_pair
                    .clone()
                    .map(|(key, secret)| RawCredential::KeyPair { key, secret })
            }
            CredentialKind::BearerToken => self.bearer.clone().map(RawCredential::BearerToken),
        }
    }

    /// The highest-precedence credential present.
    #[must_use]
    pub fn select(&self) -> Option<RawCredential> {
        PRECEDENCE.iter().find_map(|kind| self.get(*kind))
    }
}

/// Collects the value of one recognized header across name casings.
#[derive(Default)]
struct Slot {
    value: Option<String>,
    conflicting: bool,
}

impl Slot {
    fn offer(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        match &self.value {
            Some(existing) if existing != value => self.conflicting = true,
            Some(_) => {}
            None => self.value = Some(value.to_owned()),
        }
    }
}

/// Pulls candidate credentials out of a request's headers.
#[derive(Debug, Clone)]
pub struct Extractor {
    token_header: String,
}

impl Extractor {
    #[must_use]
    pub fn new(token_header: &str) -> Self {
        Self {
            token_header: token_header.trim().to_ascii_lowercase(),
        }
    }

    /// Scan the headers once and collect every recognized credential.
    #[must_use]
    pub fn extract(&self, request: &AuthorizationRequest) -> ExtractedCredentials {
        let mut principal = Slot::default();
        let mut key = Slot::default();
        let mut secret = Slot::default();
        let mut bearer = Slot::default();

        for (name, value) in &request.headers {
            let name = name.trim().to_ascii_lowercase();
            if name == self.token_header {
                bearer.offer(strip_bearer_scheme(value));
                continue;
            }
            match name.as_str() {
                PRINCIPAL_HEADER => principal.offer(value),
                API_KEY_HEADER => key.offer(value),
                API_SECRET_HEADER => secret.offer(value),
                _ => {}
            }
        }

        if let Some(token) = &request.token {
            bearer.offer(strip_bearer_scheme(token));
        }

        let key_pair = match (key.value, secret.value) {
            (Some(key), Some(secret)) => Some((key, SecretString::from(secret))),
            _ => None,
        };

        ExtractedCredentials {
            principal: principal.value,
            key_pair,
            bearer: bearer.value.map(SecretString::from),
            principal_conflict: principal.conflicting,
            key_pair_conflict: key.conflicting || secret.conflicting,
            bearer_conflict: bearer.conflicting,
        }
    }
}

/// Strip an optional `Bearer ` scheme, matched case-insensitively.
fn strip_bearer_scheme(value: &str) -> &str {
    let value = value.trim();
    match value.get(..BEARER_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            value[BEARER_SCHEME.len()..].trim()
        }
        _ => value,
    }
}
