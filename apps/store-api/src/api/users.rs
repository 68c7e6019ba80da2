//! Users API routes

use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

/// Create users router backed by Postgres
pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
