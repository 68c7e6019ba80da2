use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};
use crate::repository::UserRepository;

/// PostgreSQL unique_violation SQLSTATE, raised by the users email constraint
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of UserRepository using sqlx
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    age: Option<i32>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row.age,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Classify a driver error: unique violations become DuplicateEmail,
/// everything else is a storage failure carrying the driver message.
fn classify_write_error(e: sqlx::Error, email: &str) -> UserError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return UserError::DuplicateEmail(email.to_string());
        }
    }
    UserError::Storage(e.to_string())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, input: UserInput) -> UserResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, age) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, &input.email))?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.into())
    }

    async fn update(&self, id: i32, input: UserInput) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET name = $1, email = $2, age = $3, updated_at = CURRENT_TIMESTAMP WHERE id = $4 RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, &input.email))?;

        if row.is_some() {
            tracing::info!(user_id = id, "Updated user");
        }
        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: i32) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("DELETE FROM users WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?;

        if row.is_some() {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(row.map(|r| r.into()))
    }
}
