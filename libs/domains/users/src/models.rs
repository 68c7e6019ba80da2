use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

/// Regex pattern for email addresses: local@domain.tld with no whitespace
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Custom validator for email addresses
fn validate_email(email: &str) -> Result<(), validator::ValidationError> {
    if !EMAIL_PATTERN.is_match(email) {
        let mut err = validator::ValidationError::new("invalid_email");
        err.message = Some("must be a valid email address".into());
        return Err(err);
    }
    Ok(())
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (storage-assigned)
    pub id: i32,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Age in years
    pub age: Option<i32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating or fully replacing a user.
///
/// Updates are full replacements, so the same input shape and validation
/// rules apply to both POST and PUT.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    pub age: Option<i32>,
}

impl User {
    /// Build a user from an input DTO with a storage-assigned id
    pub fn new(id: i32, input: UserInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fully replace the mutable fields from an input DTO
    pub fn apply_input(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.age = input.age;
        self.updated_at = Utc::now();
    }
}
