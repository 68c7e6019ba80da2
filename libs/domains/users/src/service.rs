use std::sync::Arc;
use validator::Validate;

use axum_helpers::errors::format_validation_errors;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};
use crate::repository::UserRepository;

/// Service layer for User business logic.
///
/// Validation runs here as well as in the HTTP extractor, so non-HTTP
/// callers get the same guarantees.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all users, newest first
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Get a user by id
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Create a new user with validation
    pub async fn create_user(&self, input: UserInput) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(format_validation_errors(&e)))?;

        self.repository.create(input).await
    }

    /// Fully replace a user with validation
    pub async fn update_user(&self, id: i32, input: UserInput) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(format_validation_errors(&e)))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Delete a user, returning the deleted row
    pub async fn delete_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .delete(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}
