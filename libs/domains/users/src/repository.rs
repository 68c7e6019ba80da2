use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};

/// Repository trait for User persistence.
///
/// Lookups return `Option` so callers can distinguish "not found" (a signal)
/// from storage failures (an error).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users, newest first
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Get a user by id
    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Create a new user
    async fn create(&self, input: UserInput) -> UserResult<User>;

    /// Fully replace a user by id
    async fn update(&self, id: i32, input: UserInput) -> UserResult<Option<User>>;

    /// Delete a user by id, returning the deleted row
    async fn delete(&self, id: i32) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(0)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        // Newest first, matching the SQL ordering
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, input: UserInput) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Same uniqueness guarantee the database constraint provides
        if users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User::new(id, input);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i32, input: UserInput) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Ok(None);
        }

        let email_taken = users
            .values()
            .any(|u| u.id != id && u.email == input.email);
        if email_taken {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = users.get_mut(&id).ok_or(UserError::Storage(
            "user vanished during update".to_string(),
        ))?;
        user.apply_input(input);
        let updated = user.clone();

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let removed = users.remove(&id);
        if removed.is_some() {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str) -> UserInput {
        UserInput {
            name: name.to_string(),
            email: email.to_string(),
            age: Some(30),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(input("Ann", "ann@x.com")).await.unwrap();
        let second = repo.create(input("Bob", "bob@x.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(input("Ann", "ann@x.com")).await.unwrap();

        let fetched = repo.find_by_id(user.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(input("Ann", "ann@x.com")).await.unwrap();
        let result = repo.create(input("Other Ann", "ann@x.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = InMemoryUserRepository::new();

        repo.create(input("Ann", "ann@x.com")).await.unwrap();
        repo.create(input("Bob", "bob@x.com")).await.unwrap();

        let users = repo.find_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "bob@x.com");
        assert_eq!(users[1].email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(42, input("Ann", "ann@x.com")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let repo = InMemoryUserRepository::new();

        repo.create(input("Ann", "ann@x.com")).await.unwrap();
        let bob = repo.create(input("Bob", "bob@x.com")).await.unwrap();

        let result = repo.update(bob.id, input("Bob", "ann@x.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot() {
        let repo = InMemoryUserRepository::new();

        let user = repo.create(input("Ann", "ann@x.com")).await.unwrap();

        let deleted = repo.delete(user.id).await.unwrap();
        assert_eq!(deleted.unwrap().email, "ann@x.com");

        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.delete(user.id).await.unwrap().is_none());
    }
}
