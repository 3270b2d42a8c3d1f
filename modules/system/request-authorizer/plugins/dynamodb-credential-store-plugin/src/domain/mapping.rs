//! Item decoding.
//!
//! Attribute names follow the tables the authorizer has always been deployed
//! against, so they differ from the record field names.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use request_authorizer_sdk::{CredentialStoreError, PrincipalRecord, TokenRecord};
use secrecy::SecretString;

/// A raw DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

pub const PRINCIPAL_ID: &str = "id";
pub const PRINCIPAL_KEY: &str = "key";
pub const PRINCIPAL_SECRET: &str = "secret";
pub const PRINCIPAL_TENANT: &str = "companyId";
pub const PRINCIPAL_NAME: &str = "name";

pub const TOKEN: &str = "authKey";
pub const TOKEN_EXPIRES: &str = "expires";
pub const TOKEN_SERVICE: &str = "service";

/// Decode a principal item. Tenant and name are optional.
///
/// # Errors
///
/// `Malformed` if `id` is missing or any known attribute has the wrong type.
pub fn principal_from_item(item: &Item) -> Result<PrincipalRecord, CredentialStoreError> {
    Ok(PrincipalRecord {
        id: required_string(item, PRINCIPAL_ID)?,
        tenant_id: optional_string(item, PRINCIPAL_TENANT)?.unwrap_or_default(),
        name: optional_string(item, PRINCIPAL_NAME)?.unwrap_or_default(),
    })
}

/// Decode a token item.
///
/// # Errors
///
/// `Malformed` if any attribute is missing, has the wrong type, or `expires`
/// is not an integer.
pub fn token_from_item(item: &Item) -> Result<TokenRecord, CredentialStoreError> {
    Ok(TokenRecord {
        token: SecretString::from(required_string(item, TOKEN)?),
        expires: required_integer(item, TOKEN_EXPIRES)?,
        service: required_string(item, TOKEN_SERVICE)?,
    })
}

fn optional_string(item: &Item, name: &str) -> Result<Option<String>, CredentialStoreError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value.clone())),
        Some(_) => Err(malformed(name, "is not a string")),
    }
}

fn required_string(item: &Item, name: &str) -> Result<String, CredentialStoreError> {
    optional_string(item, name)?.ok_or_else(|| malformed(name, "is missing"))
}

fn required_integer(item: &Item, name: &str) -> Result<i64, CredentialStoreError> {
    match item.get(name) {
        Some(AttributeValue::N(value)) => value
            .trim()
            .parse()
            .map_err(|_| malformed(name, "is not an integer")),
        Some(_) => Err(malformed(name, "is not a number")),
        None => Err(malformed(name, "is missing")),
    }
}

// Values are never echoed: they may be secrets.
fn malformed(name: &str, problem: &str) -> CredentialStoreError {
    CredentialStoreError::Malformed(format!("attribute '{name}' {problem}"))
}
