//! Service implementation for the DynamoDB credential store.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use request_authorizer_sdk::{CredentialStoreError, PrincipalRecord, TokenRecord};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::mapping::{
    Item, PRINCIPAL_ID, PRINCIPAL_KEY, PRINCIPAL_NAME, PRINCIPAL_SECRET, PRINCIPAL_TENANT, TOKEN,
    principal_from_item, token_from_item,
};
use crate::config::DynamoDbCredentialStoreConfig;

const KEY_PAIR_FILTER: &str = "#key = :key AND #secret = :secret";
const PRINCIPAL_PROJECTION: &str = "#id, #tenant, #name";

/// DynamoDB credential store.
///
/// `Client` is internally reference counted, so one instance serves every
/// concurrent decision.
pub struct Service {
    client: Client,
    principal_table: String,
    token_table: String,
}

impl Service {
    /// Resolve region and credentials through the AWS provider chain and build
    /// the store. No request is sent until the first lookup.
    pub async fn connect(cfg: &DynamoDbCredentialStoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &cfg.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &cfg.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        info!(
            region = cfg.region.as_deref().unwrap_or("provider chain"),
            principal_table = %cfg.principal_table,
            token_table = %cfg.token_table,
            "DynamoDB credential store configured"
        );
        Self::from_client(Client::new(&sdk_config), cfg)
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn from_client(client: Client, cfg: &DynamoDbCredentialStoreConfig) -> Self {
        Self {
            client,
            principal_table: cfg.principal_table.clone(),
            token_table: cfg.token_table.clone(),
        }
    }

    /// Point lookup by principal id. Items with an empty id count as absent.
    ///
    /// # Errors
    ///
    /// `Unavailable` on any SDK failure, `Malformed` if the item cannot be decoded.
    pub async fn principal(
        &self,
        id: &str,
    ) -> Result<Option<PrincipalRecord>, CredentialStoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.principal_table)
            .key(PRINCIPAL_ID, AttributeValue::S(id.to_owned()))
            .send()
            .await
            .map_err(|e| unavailable(&e))?;

        let record = output.item().map(principal_from_item).transpose()?;
        Ok(record.filter(|r| !r.id.is_empty()))
    }

    /// Every principal provisioned with exactly this key and secret.
    ///
    /// Follows scan pagination to the end so the match count is exact.
    ///
    /// # Errors
    ///
    /// `Unavailable` on any SDK failure, `Malformed` if a matching item cannot
    /// be decoded.
    pub async fn principals_by_key_and_secret(
        &self,
        key: &str,
        secret: &SecretString,
    ) -> Result<Vec<PrincipalRecord>, CredentialStoreError> {
        let mut matches = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0_usize;

        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.principal_table)
                .filter_expression(KEY_PAIR_FILTER)
                .projection_expression(PRINCIPAL_PROJECTION)
                .expression_attribute_names("#key", PRINCIPAL_KEY)
                .expression_attribute_names("#secret", PRINCIPAL_SECRET)
                .expression_attribute_names("#id", PRINCIPAL_ID)
                .expression_attribute_names("#tenant", PRINCIPAL_TENANT)
                .expression_attribute_names("#name", PRINCIPAL_NAME)
                .expression_attribute_values(":key", AttributeValue::S(key.to_owned()))
                .expression_attribute_values(
                    ":secret",
                    AttributeValue::S(secret.expose_secret().to_owned()),
                )
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| unavailable(&e))?;
            pages += 1;

            for item in page.items() {
                matches.push(principal_from_item(item)?);
            }

            match page.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        debug!(pages, matches = matches.len(), "Key pair scan finished");
        Ok(matches)
    }

    /// Point lookup by the literal token.
    ///
    /// # Errors
    ///
    /// `Unavailable` on any SDK failure, `Malformed` if the item cannot be decoded.
    pub async fn token(
        &self,
        token: &SecretString,
    ) -> Result<Option<TokenRecord>, CredentialStoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.token_table)
            .key(TOKEN, AttributeValue::S(token.expose_secret().to_owned()))
            .send()
            .await
            .map_err(|e| unavailable(&e))?;

        output.item().map(token_from_item).transpose()
    }
}

fn unavailable(err: &impl std::error::Error) -> CredentialStoreError {
    CredentialStoreError::Unavailable(DisplayErrorContext(err).to_string())
}
