use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};

/// Repository trait for Product persistence.
///
/// Lookups return `Option` so callers can distinguish "not found" (a signal)
/// from storage failures (an error).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List all products, newest first
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by id
    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Create a new product
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Fully replace a product by id
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Option<Product>>;

    /// Delete a product by id, returning the deleted row
    async fn delete(&self, id: i32) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i32, Product>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(0)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        // Newest first, matching the SQL ordering
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product::new(id, input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id) else {
            return Ok(None);
        };
        product.apply_input(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let removed = products.remove(&id);
        if removed.is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64, stock: Option<i32>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: Some("test product".to_string()),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Widget", 9.99, Some(5))).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.stock, 5);

        let fetched = repo.find_by_id(product.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().name, "Widget");
    }

    #[tokio::test]
    async fn test_create_defaults_stock_to_zero() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Widget", 9.99, None)).await.unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = InMemoryProductRepository::new();

        repo.create(input("First", 1.0, None)).await.unwrap();
        repo.create(input("Second", 2.0, None)).await.unwrap();

        let products = repo.find_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Second");
        assert_eq!(products[1].name, "First");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(42, input("Widget", 9.99, None)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Widget", 9.99, Some(3))).await.unwrap();

        let deleted = repo.delete(product.id).await.unwrap();
        assert_eq!(deleted.unwrap().stock, 3);

        assert!(repo.find_by_id(product.id).await.unwrap().is_none());
        assert!(repo.delete(product.id).await.unwrap().is_none());
    }
}
