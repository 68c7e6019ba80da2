//! Application state management

use sqlx::PgPool;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: PgPool,
}
