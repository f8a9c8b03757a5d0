use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;
use crate::metrics::IMAGES_STORED_TOTAL;

/// Destination for uploaded orphanage photos.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` and return the file name assigned to them.
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, ServiceError>;

    /// Remove a previously stored file. Removing a missing file is not an error.
    async fn remove(&self, file_name: &str) -> Result<(), ServiceError>;
}

/// Writes images into a flat directory, the same one served under `/uploads`.
pub struct DiskImageStore {
    root: PathBuf,
    seq: AtomicU64,
}

impl DiskImageStore {
    /// Create the store, creating `root` if it does not exist yet.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Self, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root, seq: AtomicU64::new(0) })
    }

    pub fn root(&self) -> &Path { &self.root }

    /// `<unix-millis>-<seq>-<sanitized original name>`
    fn assign_name(&self, original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", millis, seq, sanitize_file_name(original_name))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let name = self.assign_name(original_name);
        fs::write(self.root.join(&name), bytes).await?;
        IMAGES_STORED_TOTAL.inc();
        debug!(file = %name, size = bytes.len(), "image stored");
        Ok(name)
    }

    async fn remove(&self, file_name: &str) -> Result<(), ServiceError> {
        // names come from `store`, but never follow anything that could leave root
        if sanitize_file_name(file_name) != file_name {
            return Err(ServiceError::Storage(format!("refusing to remove {file_name:?}")));
        }
        match fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reduce a client-supplied file name to a safe basename.
///
/// Directory components are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Names that end up empty or made only of dots become `image`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if cleaned.chars().all(|c| c == '.') {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("foto.jpg"), "foto.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\fotos\\lar 1.png"), "lar_1.png");
        assert_eq!(sanitize_file_name("crianças.jpeg"), "crian_as.jpeg");
        assert_eq!(sanitize_file_name(""), "image");
        assert_eq!(sanitize_file_name(".."), "image");
        assert_eq!(sanitize_file_name("dir/"), "image");
    }

    #[tokio::test]
    async fn store_writes_file_with_unique_names() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let store = DiskImageStore::new(tmp.path().join("uploads")).await?;

        let a = store.store("foto.jpg", b"first").await?;
        let b = store.store("foto.jpg", b"second").await?;
        assert_ne!(a, b);
        assert!(a.ends_with("-foto.jpg"));
        assert_eq!(std::fs::read(store.root().join(&a))?, b"first");
        assert_eq!(std::fs::read(store.root().join(&b))?, b"second");
        Ok(())
    }

    #[tokio::test]
    async fn remove_is_idempotent() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let store = DiskImageStore::new(tmp.path()).await?;
        let name = store.store("x.png", b"px").await?;

        store.remove(&name).await?;
        assert!(!store.root().join(&name).exists());
        store.remove(&name).await?;
        Ok(())
    }

    #[tokio::test]
    async fn remove_rejects_paths() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let store = DiskImageStore::new(tmp.path()).await?;
        assert!(matches!(store.remove("../secret").await, Err(ServiceError::Storage(_))));
        Ok(())
    }
}
