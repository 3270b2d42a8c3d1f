//! Domain layer for the DynamoDB credential store.

pub mod client;
pub mod mapping;
pub mod service;

pub use service::Service;
