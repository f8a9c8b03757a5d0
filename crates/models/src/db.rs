use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use once_cell::sync::Lazy;
use std::{env, time::Duration};
use tracing::info;

pub use configs::DatabaseConfig;

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| configs::DEFAULT_DATABASE_URL.to_string())
});

/// Open a pool using the timeouts and bounds from `cfg`.
///
/// An in-memory SQLite database only lives as long as its connection, so the
/// pool is pinned to a single connection.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_memory_sqlite(&cfg.url) {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    let db = Database::connect(opt).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

fn is_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_memory_sqlite() {
        assert!(is_memory_sqlite("sqlite::memory:"));
        assert!(!is_memory_sqlite("sqlite://database.sqlite?mode=rwc"));
        assert!(!is_memory_sqlite("postgres://localhost/happy"));
    }

    #[tokio::test]
    async fn memory_pool_from_config_is_usable() {
        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
        let db = connect_with_config(&cfg).await.unwrap();
        db.ping().await.unwrap();
    }
}
