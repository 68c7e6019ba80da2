use sqlx::PgPool;

use crate::common::error::{DatabaseError, DatabaseResult};

/// Verify the database is reachable by running a trivial query
pub async fn check(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}
