pub mod remote;

pub use remote::{ProductSource, RemoteSource};

use crate::cart::CartEntry;
use crate::core::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A product in the catalog.
///
/// Carries a stable id so that catalog operations never depend on display
/// titles; only the cart keys its lines by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl Product {
    /// Creates a product with a fresh id.
    pub fn new(
        title: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            price,
            description: description.into(),
            category: category.into(),
            image: image.into(),
        }
    }

    /// The descriptor handed to the cart when this product is added.
    pub fn cart_entry(&self) -> CartEntry {
        CartEntry::new(self.title.clone(), self.price, self.image.clone())
    }
}

/// In-memory product catalog with admin CRUD.
///
/// Products are keyed by id under a single lock; each method is one
/// read-modify-write critical section.
pub struct ProductCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a product. Fails if a product with the same id exists.
    pub async fn create(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(StoreError::ProductExists(product.id));
        }
        tracing::debug!(id = %product.id, title = %product.title, "product created");
        products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Replaces the stored product with the same id.
    pub async fn update(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(StoreError::ProductNotFound(product.id));
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Deletes the product with the given id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut products = self.products.write().await;
        if products.remove(id).is_none() {
            return Err(StoreError::ProductNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Returns the product with the given id.
    pub async fn get(&self, id: &str) -> Result<Product> {
        let products = self.products.read().await;
        products
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))
    }

    /// All products, sorted by title for stable display.
    pub async fn list(&self) -> Vec<Product> {
        let products = self.products.read().await;
        let mut listing: Vec<Product> = products.values().cloned().collect();
        listing.sort_by(|a, b| a.title.cmp(&b.title));
        listing
    }

    /// Replaces the whole catalog, e.g. with a freshly fetched listing.
    pub async fn replace_all(&self, listing: Vec<Product>) {
        let mut products = self.products.write().await;
        products.clear();
        for product in listing {
            products.insert(product.id.clone(), product);
        }
        tracing::debug!(count = products.len(), "catalog replaced");
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.products.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, price: f64) -> Product {
        Product::new(title, price, "desc", "misc", "https://img/p.png")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let catalog = ProductCatalog::new();
        let p = product("Mug", 12.5);
        let id = p.id.clone();

        catalog.create(p.clone()).await.unwrap();

        assert_eq!(catalog.get(&id).await.unwrap(), p);
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let catalog = ProductCatalog::new();
        let p = product("Mug", 12.5);

        catalog.create(p.clone()).await.unwrap();
        let result = catalog.create(p).await;

        assert!(matches!(result, Err(StoreError::ProductExists(_))));
    }

    #[tokio::test]
    async fn test_update() {
        let catalog = ProductCatalog::new();
        let mut p = product("Mug", 12.5);
        catalog.create(p.clone()).await.unwrap();

        p.price = 9.99;
        catalog.update(p.clone()).await.unwrap();

        assert_eq!(catalog.get(&p.id).await.unwrap().price, 9.99);
    }

    #[tokio::test]
    async fn test_update_unknown_fails() {
        let catalog = ProductCatalog::new();
        let result = catalog.update(product("Ghost", 1.0)).await;
        assert!(matches!(result, Err(StoreError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = ProductCatalog::new();
        let p = product("Mug", 12.5);
        let id = p.id.clone();
        catalog.create(p).await.unwrap();

        catalog.delete(&id).await.unwrap();

        assert!(catalog.is_empty().await);
        assert!(matches!(
            catalog.delete(&id).await,
            Err(StoreError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_by_title() {
        let catalog = ProductCatalog::new();
        catalog.create(product("Zebra", 1.0)).await.unwrap();
        catalog.create(product("Apple", 1.0)).await.unwrap();
        catalog.create(product("Mango", 1.0)).await.unwrap();

        let titles: Vec<String> = catalog.list().await.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Apple", "Mango", "Zebra"]);
    }

    #[tokio::test]
    async fn test_replace_all() {
        let catalog = ProductCatalog::new();
        catalog.create(product("Old", 1.0)).await.unwrap();

        catalog
            .replace_all(vec![product("New A", 2.0), product("New B", 3.0)])
            .await;

        let titles: Vec<String> = catalog.list().await.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["New A", "New B"]);
    }

    #[tokio::test]
    async fn test_cart_entry_descriptor() {
        let p = product("Mug", 12.5);
        let entry = p.cart_entry();
        assert_eq!(entry.title, "Mug");
        assert_eq!(entry.price, 12.5);
        assert_eq!(entry.image, p.image);
    }
}
