use super::{Product, ProductCatalog};
use crate::core::{Result, StoreError};
use async_trait::async_trait;
use serde::Deserialize;

/// A collaborator that produces the product listing.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>>;
}

/// Product document as served by the remote catalog API.
///
/// Remote ids are numeric; they are stringified into [`Product::id`].
/// Description and category are optional in older listings.
#[derive(Debug, Deserialize)]
pub struct RemoteProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub image: String,
}

impl From<RemoteProduct> for Product {
    fn from(remote: RemoteProduct) -> Self {
        Self {
            id: remote.id.to_string(),
            title: remote.title,
            price: remote.price,
            description: remote.description,
            category: remote.category,
            image: remote.image,
        }
    }
}

/// HTTP product source: GET `{base_url}/products`.
pub struct RemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the listing and replaces the catalog contents with it.
    pub async fn load_into(&self, catalog: &ProductCatalog) -> Result<usize> {
        let listing = self.fetch().await?;
        let count = listing.len();
        catalog.replace_all(listing).await;
        tracing::info!(count, url = %self.base_url, "catalog loaded from remote source");
        Ok(count)
    }
}

#[async_trait]
impl ProductSource for RemoteSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        let url = format!("{}/products", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            log::warn!("catalog fetch from {} failed: {}", url, response.status());
            return Err(StoreError::Fetch(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let documents: Vec<RemoteProduct> = response.json().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }
}
