//! Upstream session catalog.
//!
//! The catalog service lists every session either as a bare JSON array or wrapped in an
//! object under `results`, `data` or `items`. Fetching is fail-open: callers of
//! [`CatalogSource::fetch_catalog`] get an empty catalog on any failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CACHE_CONTROL, Client};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::AppError;
use crate::models::CatalogItem;

/// Keys that may wrap the record array, tried in order.
const ENVELOPE_KEYS: [&str; 3] = ["results", "data", "items"];

/// Provides the session catalog to the recommendation resolver.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Returns the current catalog. Never fails: upstream problems yield an empty catalog.
    async fn fetch_catalog(&self) -> Vec<CatalogItem>;
}

/// Catalog fetched over HTTP on every call. No caching.
pub struct HttpCatalog {
    client: Client,
    endpoint: Url,
}

impl HttpCatalog {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.catalog_url, config.catalog_timeout())
    }

    /// Fetches and decodes the catalog, reporting failures instead of swallowing them.
    pub async fn try_fetch(&self) -> Result<Vec<CatalogItem>, AppError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        debug!(endpoint = %self.endpoint, %status, "Catalog responded");

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "catalog responded with status {}",
                status
            )));
        }

        let body: Value = response.json().await?;

        Ok(extract_records(body)
            .into_iter()
            .map(CatalogItem::from_value)
            .collect())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_catalog(&self) -> Vec<CatalogItem> {
        match self.try_fetch().await {
            Ok(items) => {
                info!(count = items.len(), "Fetched session catalog");
                items
            }
            Err(e) => {
                warn!("Catalog unavailable, continuing with an empty catalog: {}", e);
                Vec::new()
            }
        }
    }
}

/// Pulls the record array out of a catalog response body.
///
/// The first envelope key that is present and not null wins; if it does not hold an
/// array the catalog is empty.
pub fn extract_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Object(mut fields) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| fields.remove(*key).filter(|value| !value.is_null()))
            .map(|wrapped| match wrapped {
                Value::Array(records) => records,
                _ => Vec::new(),
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
