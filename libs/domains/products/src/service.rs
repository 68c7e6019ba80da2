use std::sync::Arc;
use validator::Validate;

use axum_helpers::errors::format_validation_errors;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// Service layer for Product business logic.
///
/// Validation runs here as well as in the HTTP extractor, so non-HTTP
/// callers get the same guarantees.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products, newest first
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by id
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product with validation
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(format_validation_errors(&e)))?;

        self.repository.create(input).await
    }

    /// Fully replace a product with validation
    pub async fn update_product(&self, id: i32, input: ProductInput) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(format_validation_errors(&e)))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning the deleted row
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn input(name: &str, price: f64, stock: Option<i32>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_product_passes_valid_input_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(1, input)));

        let service = ProductService::new(mock_repo);
        let product = service
            .create_product(input("Widget", 0.0, None))
            .await
            .unwrap();

        // Zero price is valid, missing stock defaults to 0
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price_before_storage() {
        // No expectations set: any repository call would panic
        let mock_repo = MockProductRepository::new();

        let service = ProductService::new(mock_repo);
        let result = service.create_product(input("Widget", -1.0, None)).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_stock_before_storage() {
        let mock_repo = MockProductRepository::new();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(input("Widget", 9.99, Some(-1)))
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_maps_missing_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(42))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_product_maps_missing_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.update_product(7, input("Widget", 9.99, None)).await;

        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }
}
