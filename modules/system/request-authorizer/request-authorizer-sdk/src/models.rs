//! Domain models for the request authorizer module.
//!
//! The wire types ([`AuthorizerEvent`], [`Decision`]) follow the gateway's
//! custom-authorizer JSON contract; everything else is transport-neutral.

use std::collections::{BTreeMap, HashMap};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::RequestAuthorizerError;

/// Header carrying the service/host context for token scope matching.
pub const HOST_HEADER: &str = "host";

/// Immutable input to a single authorization decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Request kind tag as reported by the gateway (e.g. `"REQUEST"`, `"TOKEN"`).
    pub kind: String,
    /// Header names to values. Names are compared case-insensitively.
    pub headers: HashMap<String, String>,
    /// Resource scope the decision is bound to, echoed back verbatim.
    pub resource: String,
    /// Service/host context used by token scope matching.
    pub service: Option<String>,
    /// Token field of TOKEN-type events, which carry the token outside the headers.
    pub token: Option<String>,
}

impl AuthorizationRequest {
    /// Create a request for `resource` with no headers.
    #[must_use]
    pub fn new(kind: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            resource: resource.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Gateway custom-authorizer event as received on the wire.
///
/// Only the fields the authorizer reads are modelled; everything else the
/// gateway sends is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_token: Option<String>,
}

impl TryFrom<AuthorizerEvent> for AuthorizationRequest {
    type Error = RequestAuthorizerError;

    fn try_from(event: AuthorizerEvent) -> Result<Self, Self::Error> {
        let resource = event
            .method_arn
            .filter(|arn| !arn.trim().is_empty())
            .ok_or_else(|| {
                RequestAuthorizerError::MalformedRequest("missing methodArn".to_owned())
            })?;

        let headers = event.headers.unwrap_or_default();
        let service = service_context(&headers);

        Ok(Self {
            kind: event.kind,
            headers,
            resource,
            service,
            token: event.authorization_token,
        })
    }
}

/// The `Host` value shared by every casing of the header.
///
/// Disagreeing values yield no service context at all, so token scope
/// matching fails closed instead of depending on map iteration order.
fn service_context(headers: &HashMap<String, String>) -> Option<String> {
    let mut found: Option<&str> = None;
    for (name, value) in headers {
        let value = value.trim();
        if value.is_empty() || !name.eq_ignore_ascii_case(HOST_HEADER) {
            continue;
        }
        match found {
            Some(existing) if existing != value => return None,
            Some(_) => {}
            None => found = Some(value),
        }
    }
    found.map(str::to_owned)
}

/// Principal record held by the trust store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    /// Unique, immutable principal identifier.
    pub id: String,
    /// Owning tenant.
    pub tenant_id: String,
    /// Display name.
    pub name: String,
}

/// Token record held by the trust store, keyed by the token itself.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub token: SecretString,
    /// Unix seconds. The token is valid while `now <= expires`.
    pub expires: i64,
    /// Service the token is restricted to.
    pub service: String,
}

/// Policy effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One statement of a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: Vec<String>,
    pub effect: Effect,
    pub resource: Vec<String>,
}

/// Policy document attached to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// Authorization decision returned to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Subject label. Never the resolved principal.
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    /// Auxiliary claims attached to every decision.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl Decision {
    /// Effect of the decision; a document without statements denies.
    #[must_use]
    pub fn effect(&self) -> Effect {
        let allowed = !self.policy_document.statement.is_empty()
            && self
                .policy_document
                .statement
                .iter()
                .all(|s| s.effect == Effect::Allow);
        if allowed { Effect::Allow } else { Effect::Deny }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.effect() == Effect::Allow
    }

    /// All resources the decision is scoped to.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.policy_document
            .statement
            .iter()
            .flat_map(|s| s.resource.iter().map(String::as_str))
    }
}
