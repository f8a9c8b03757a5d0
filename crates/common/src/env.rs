//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the uploads directory exists, creating it (and parents) if missing.
pub async fn ensure_env(uploads_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(uploads_dir).await.is_err() {
        info!(%uploads_dir, "uploads directory missing; creating it");
    }
    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {uploads_dir}: {e}"))?;
    Ok(())
}
