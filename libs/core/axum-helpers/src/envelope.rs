//! Uniform JSON envelope for all API responses.

use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope wrapping every API payload.
///
/// All successful responses share this shape so clients can branch on
/// `success` alone:
/// - `data`: the payload (a single resource or a list)
/// - `count`: number of elements, present only for list responses
/// - `message`: human-readable confirmation, present only for mutations
///
/// # JSON Examples
///
/// ```json
/// { "success": true, "count": 2, "data": [ ... ] }
/// { "success": true, "data": { ... }, "message": "User created successfully" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for this envelope
    pub success: bool,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Element count, set only for list payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Human-readable confirmation, set only for mutations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope for a single resource read.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    /// Envelope for a mutation, carrying the affected resource and a confirmation.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Envelope for a list response, with `count` set to the list length.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            success: true,
            data: Some(items),
            count: Some(count),
            message: None,
        }
    }
}
