//! Rendering of verdicts into gateway policy documents.

use std::collections::BTreeMap;

use request_authorizer_sdk::{Decision, Effect, PolicyDocument, PolicyStatement};
use serde_json::Value;

use super::verdict::Verdict;

/// Subject label on every decision, whichever principal was resolved.
pub const SUBJECT: &str = "system";
/// Policy language version understood by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";
/// The gateway's invoke action.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Render a verdict as a decision scoped to exactly `resource`.
#[must_use]
pub fn render(verdict: &Verdict, resource: &str) -> Decision {
    let effect = if verdict.is_allow() {
        Effect::Allow
    } else {
        Effect::Deny
    };

    Decision {
        principal_id: SUBJECT.to_owned(),
        policy_document: PolicyDocument {
            version: POLICY_VERSION.to_owned(),
            statement: vec![PolicyStatement {
                action: vec![INVOKE_ACTION.to_owned()],
                effect,
                resource: vec![resource.to_owned()],
            }],
        },
        context: decision_context(),
    }
}

/// Fixed auxiliary claims attached to every decision.
fn decision_context() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("booleanKey".to_owned(), Value::Bool(true)),
        ("numberKey".to_owned(), Value::from(123)),
        ("stringKey".to_owned(), Value::from("stringval")),
    ])
}
