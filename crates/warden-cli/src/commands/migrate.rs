//! Database migration command.

use crate::output;
use warden_core::error::AppError;
use warden_database::RegistryPool;

/// Apply all pending migrations
pub async fn execute(pool: &RegistryPool) -> Result<(), AppError> {
    println!("Running database migrations...");
    pool.migrate().await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
