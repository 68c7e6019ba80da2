use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (storage-assigned)
    pub id: i32,
    /// Product name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Unit price, never negative
    pub price: f64,
    /// Units in stock, never negative
    pub stock: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating or fully replacing a product.
///
/// Updates are full replacements, so the same input shape and validation
/// rules apply to both POST and PUT. A missing `stock` resolves to 0.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "must be non-negative"))]
    pub stock: Option<i32>,
}

impl Product {
    /// Build a product from an input DTO with a storage-assigned id
    pub fn new(id: i32, input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fully replace the mutable fields from an input DTO
    pub fn apply_input(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock.unwrap_or(0);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64, stock: Option<i32>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: None,
            price,
            stock,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input("Widget", 9.99, Some(5)).validate().is_ok());
        // Zero is a valid price
        assert!(input("Freebie", 0.0, None).validate().is_ok());
    }

    #[test]
    fn test_negative_price_fails() {
        assert!(input("Widget", -1.0, None).validate().is_err());
    }

    #[test]
    fn test_negative_stock_fails() {
        assert!(input("Widget", 9.99, Some(-1)).validate().is_err());
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(input("", 9.99, None).validate().is_err());
    }

    #[test]
    fn test_missing_stock_defaults_to_zero() {
        let product = Product::new(1, input("Widget", 9.99, None));
        assert_eq!(product.stock, 0);
    }
}
