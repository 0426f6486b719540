use crate::config::Config;
use crate::shop::types::Product;
use color_eyre::{eyre::eyre, Result};
use tracing::{debug, info};
use url::Url;

/// Product catalog API client
#[derive(Clone)]
pub struct CatalogClient {
  http: reqwest::Client,
  url: Url,
}

impl CatalogClient {
  pub fn new(config: &Config) -> Result<Self> {
    let url = config.catalog_url()?;

    let http = reqwest::Client::builder()
      .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, url })
  }

  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Fetch the full product collection in a single request
  pub async fn fetch_products(&self) -> Result<Vec<Product>> {
    debug!(url = %self.url, "requesting catalog");

    let response = self
      .http
      .get(self.url.clone())
      .send()
      .await
      .map_err(|e| eyre!("Failed to reach catalog at {}: {}", self.url, e))?
      .error_for_status()
      .map_err(|e| eyre!("Catalog request failed: {}", e))?;

    let body = response
      .bytes()
      .await
      .map_err(|e| eyre!("Failed to read catalog response: {}", e))?;

    let products = decode_products(&body)?;
    info!(count = products.len(), "catalog loaded");
    Ok(products)
  }
}

/// Decode a JSON array of product records
pub fn decode_products(body: &[u8]) -> Result<Vec<Product>> {
  serde_json::from_slice(body).map_err(|e| eyre!("Failed to decode catalog: {}", e))
}
