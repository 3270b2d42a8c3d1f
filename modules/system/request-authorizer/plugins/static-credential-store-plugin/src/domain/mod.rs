//! Domain layer for the static credential store.

pub mod client;
pub mod service;

pub use service::{Service, StaticStoreConfigError};
