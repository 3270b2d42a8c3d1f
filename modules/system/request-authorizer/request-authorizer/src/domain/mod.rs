//! Domain layer for the request authorizer.

pub mod clock;
pub mod error;
pub mod extractor;
pub mod local_client;
pub mod policy;
pub mod resolver;
pub mod service;
pub mod store;
pub mod validator;
pub mod verdict;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use extractor::{CredentialKind, ExtractedCredentials, Extractor, RawCredential};
pub use local_client::RequestAuthorizerLocalClient;
pub use service::Service;
pub use verdict::{DenyReason, PrincipalIdentity, Verdict};
