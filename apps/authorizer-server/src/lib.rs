//! Request authorizer entry points.
//!
//! The HTTP server and the Lambda handler share configuration and bootstrap;
//! only the transport differs.

pub mod bootstrap;
pub mod config;
pub mod http;
#[cfg(feature = "lambda")]
pub mod lambda;
