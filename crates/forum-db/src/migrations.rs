//! Embedded schema

use sqlx::PgPool;
use tracing::info;

/// Initial schema, applied as a single implicit transaction
const INITIAL_SCHEMA: &str = include_str!("../migrations/0001_initial.sql");

/// Create any missing tables and indexes
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(INITIAL_SCHEMA).execute(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
