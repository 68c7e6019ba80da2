use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;

/// PostgreSQL implementation of ProductRepository using sqlx
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Helper struct for deserializing product rows from the database
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: f64,
    stock: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let rows =
            sqlx::query_as::<_, ProductRow>("SELECT * FROM products ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| ProductError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProductError::Storage(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (name, description, price, stock) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProductError::Storage(e.to_string()))?;

        tracing::info!(product_id = row.id, "Created product");
        Ok(row.into())
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "UPDATE products SET name = $1, description = $2, price = $3, stock = $4, updated_at = CURRENT_TIMESTAMP WHERE id = $5 RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock.unwrap_or(0))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::Storage(e.to_string()))?;

        if row.is_some() {
            tracing::info!(product_id = id, "Updated product");
        }
        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProductError::Storage(e.to_string()))?;

        if row.is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(row.map(|r| r.into()))
    }
}
