#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Migrated database for one test: `DATABASE_URL` when `TEST_DATABASE` is set
/// to `env`, otherwise a private in-memory SQLite database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let url = match std::env::var("TEST_DATABASE").as_deref() {
        Ok("env") => models::db::DATABASE_URL.clone(),
        _ => "sqlite::memory:".to_string(),
    };
    let cfg = DatabaseConfig { url, ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
