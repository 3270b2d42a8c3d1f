//! Request Authorizer Module
//!
//! Turns the credential material of an inbound gateway request into a
//! fail-closed Allow/Deny decision scoped to exactly the invoked resource.
//!
//! The pipeline is `extract -> resolve -> validate -> render`. Every failure
//! before `render` becomes a `Deny`; only malformed events surface as errors.
//!
//! Provides the `RequestAuthorizerClient` implementation
//! ([`domain::RequestAuthorizerLocalClient`]) for the transport adapter.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::AuthorizerConfig;
pub use domain::{
    Clock, DenyReason, FixedClock, PrincipalIdentity, RequestAuthorizerLocalClient, Service,
    SystemClock, Verdict,
};
