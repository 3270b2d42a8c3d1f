#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end decision scenarios against the static credential store.
//!
//! These tests verify that:
//! 1. Every credential path reaches Allow when the trust store backs it
//! 2. Every failure mode reaches Deny with the same decision shape
//! 3. Decisions are always scoped to exactly the request's resource

use std::sync::Arc;

use request_authorizer::{
    AuthorizerConfig, Clock, DenyReason, FixedClock, PrincipalIdentity, Service, SystemClock,
};
use request_authorizer_sdk::{
    AuthorizationRequest, AuthorizerEvent, CredentialStorePluginClient, Decision, Effect,
};
use serde_json::json;
use static_credential_store_plugin::{StaticCredentialStore, StaticCredentialStoreConfig};

const ARN: &str = "arn:aws:execute-api:eu-west-2:123456789:wmcwzleu0i/ESTestInvoke-stage/GET/";
const NOW: i64 = 1_700_000_000;
const SERVICE: &str = "svc.example.com";

fn store_config(now: i64) -> StaticCredentialStoreConfig {
    serde_json::from_value(json!({
        "principals": [
            { "id": "p-1", "tenant_id": "t-1", "name": "frontend" },
            { "id": "p-2", "tenant_id": "t-1", "name": "backend", "key": "k1", "secret": "s1" },
            { "id": "p-3", "tenant_id": "t-2", "name": "twin a", "key": "shared", "secret": "same" },
            { "id": "p-4", "tenant_id": "t-2", "name": "twin b", "key": "shared", "secret": "same" }
        ],
        "tokens": [
            { "token": "abc-123", "expires": now + 600, "service": SERVICE },
            { "token": "old-456", "expires": now - 600, "service": SERVICE },
            { "token": "other-789", "expires": now + 600, "service": "other.example.com" }
        ]
    }))
    .unwrap()
}

fn service_with(clock: Arc<dyn Clock>, now: i64, cfg: &AuthorizerConfig) -> Service {
    let store: Arc<dyn CredentialStorePluginClient> =
        Arc::new(StaticCredentialStore::from_config(&store_config(now)).unwrap());
    Service::new(store, clock, cfg)
}

fn service() -> Service {
    service_with(Arc::new(FixedClock(NOW)), NOW, &AuthorizerConfig::default())
}

fn request() -> AuthorizationRequest {
    AuthorizationRequest::new("REQUEST", ARN)
}

fn token_request(token: &str) -> AuthorizationRequest {
    request()
        .with_header("Authorization", token)
        .with_service(SERVICE)
}

fn assert_scoped(decision: &Decision, effect: Effect) {
    assert_eq!(decision.effect(), effect);
    assert_eq!(decision.principal_id, "system");
    assert_eq!(decision.resources().collect::<Vec<_>>(), vec![ARN]);
}

#[tokio::test]
async fn no_credential_is_denied() {
    let svc = service();
    let req = request().with_header("Accept", "*/*");

    assert_eq!(
        svc.evaluate(&req).await.deny_reason(),
        Some(DenyReason::NoCredential)
    );
    assert_scoped(&svc.authorize(&req).await, Effect::Deny);
}

#[tokio::test]
async fn unexpired_token_for_current_service_is_allowed() {
    let svc = service();

    assert_scoped(&svc.authorize(&token_request("abc-123")).await, Effect::Allow);
}

#[tokio::test]
async fn token_mode_surfaces_the_raw_token_internally() {
    let verdict = service().evaluate(&token_request("abc-123")).await;

    assert!(matches!(
        verdict.principal(),
        Some(PrincipalIdentity::Token(_))
    ));
    assert_eq!(
        verdict.principal().map(PrincipalIdentity::expose),
        Some("abc-123")
    );
}

#[tokio::test]
async fn expired_token_is_denied() {
    let svc = service();

    assert_eq!(
        svc.evaluate(&token_request("old-456")).await.deny_reason(),
        Some(DenyReason::TokenExpired)
    );
    assert_scoped(&svc.authorize(&token_request("old-456")).await, Effect::Deny);
}

#[tokio::test]
async fn token_for_other_service_is_denied() {
    let svc = service();

    assert_eq!(
        svc.evaluate(&token_request("other-789")).await.deny_reason(),
        Some(DenyReason::ScopeMismatch)
    );
}

#[tokio::test]
async fn token_scenarios_hold_against_the_wall_clock() {
    let now = chrono::Utc::now().timestamp();
    let svc = service_with(Arc::new(SystemClock), now, &AuthorizerConfig::default());

    assert!(svc.authorize(&token_request("abc-123")).await.is_allowed());
    assert!(!svc.authorize(&token_request("old-456")).await.is_allowed());
}

#[tokio::test]
async fn token_prefix_filter_denies_foreign_tokens() {
    let cfg = AuthorizerConfig {
        token_prefix: "tester-".to_owned(),
        ..AuthorizerConfig::default()
    };
    let svc = service_with(Arc::new(FixedClock(NOW)), NOW, &cfg);

    assert_eq!(
        svc.evaluate(&token_request("abc-123")).await.deny_reason(),
        Some(DenyReason::TokenPrefixMismatch)
    );
}

#[tokio::test]
async fn key_pair_without_match_is_denied() {
    let svc = service();
    let req = request()
        .with_header("x-api-key", "k1")
        .with_header("x-api-secret", "wrong");

    assert_eq!(
        svc.evaluate(&req).await.deny_reason(),
        Some(DenyReason::UnknownPrincipal)
    );
    assert_scoped(&svc.authorize(&req).await, Effect::Deny);
}

#[tokio::test]
async fn key_pair_with_single_match_is_allowed_as_stored_principal() {
    let svc = service();
    let req = request()
        .with_header("x-api-key", "k1")
        .with_header("x-api-secret", "s1");

    let verdict = svc.evaluate(&req).await;
    assert_eq!(
        verdict.principal().map(PrincipalIdentity::expose),
        Some("p-2")
    );
    assert_scoped(&svc.authorize(&req).await, Effect::Allow);
}

#[tokio::test]
async fn key_pair_with_several_matches_is_denied() {
    let svc = service();
    let req = request()
        .with_header("x-api-key", "shared")
        .with_header("x-api-secret", "same");

    assert_eq!(
        svc.evaluate(&req).await.deny_reason(),
        Some(DenyReason::AmbiguousMatch)
    );
}

#[tokio::test]
async fn asserted_principal_present_is_allowed() {
    let svc = service();
    let req = request().with_header("x-agent-id", "p-1");

    assert_scoped(&svc.authorize(&req).await, Effect::Allow);
}

#[tokio::test]
async fn asserted_principal_absent_is_denied() {
    let svc = service();
    let req = request().with_header("x-agent-id", "p-404");

    assert_eq!(
        svc.evaluate(&req).await.deny_reason(),
        Some(DenyReason::UnknownPrincipal)
    );
}

#[tokio::test]
async fn asserted_principal_wins_over_valid_token() {
    let svc = service();
    let req = token_request("abc-123").with_header("X-Agent-Id", "p-404");

    assert_eq!(
        svc.evaluate(&req).await.deny_reason(),
        Some(DenyReason::UnknownPrincipal)
    );
}

#[tokio::test]
async fn repeated_evaluation_yields_identical_decisions() {
    let svc = service();
    let requests = [
        token_request("abc-123"),
        token_request("old-456"),
        request().with_header("x-agent-id", "p-1"),
        request()
            .with_header("x-api-key", "k1")
            .with_header("x-api-secret", "s1"),
    ];

    for req in &requests {
        assert_eq!(svc.authorize(req).await, svc.authorize(req).await);
    }
}

#[tokio::test]
async fn gateway_event_round_trip() {
    let svc = service();
    let event: AuthorizerEvent = serde_json::from_value(json!({
        "type": "REQUEST",
        "methodArn": ARN,
        "headers": {
            "Host": SERVICE,
            "Authorization": "abc-123"
        }
    }))
    .unwrap();

    let decision = svc.authorize_event(event).await.unwrap();

    assert_eq!(
        serde_json::to_value(&decision).unwrap(),
        json!({
            "principalId": "system",
            "policyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": ["execute-api:Invoke"],
                    "Effect": "Allow",
                    "Resource": [ARN]
                }]
            },
            "context": {
                "booleanKey": true,
                "numberKey": 123,
                "stringKey": "stringval"
            }
        })
    );
}

#[tokio::test]
async fn token_type_event_carries_token_outside_headers() {
    let svc = service();
    let event: AuthorizerEvent = serde_json::from_value(json!({
        "type": "TOKEN",
        "methodArn": ARN,
        "authorizationToken": "Bearer abc-123",
        "headers": { "Host": SERVICE }
    }))
    .unwrap();

    assert!(svc.authorize_event(event).await.unwrap().is_allowed());
}

#[tokio::test]
async fn disagreeing_host_casings_deny_on_every_call() {
    let svc = service();

    for _ in 0..64 {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "type": "REQUEST",
            "methodArn": ARN,
            "headers": {
                "Host": SERVICE,
                "host": "other.example.com",
                "Authorization": "abc-123"
            }
        }))
        .unwrap();

        let decision = svc.authorize_event(event).await.unwrap();
        assert_scoped(&decision, Effect::Deny);
    }
}

#[tokio::test]
async fn concurrent_decisions_share_one_service() {
    let svc = Arc::new(service());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                let req = if i % 2 == 0 {
                    token_request("abc-123")
                } else {
                    token_request("old-456")
                };
                (i, svc.authorize(&req).await.is_allowed())
            })
        })
        .collect();

    for handle in handles {
        let (i, allowed) = handle.await.unwrap();
        assert_eq!(allowed, i % 2 == 0);
    }
}
