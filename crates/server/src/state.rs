use std::{path::PathBuf, sync::Arc};

use configs::UploadsConfig;
use sea_orm::DatabaseConnection;
use service::errors::ServiceError;
use service::orphanage::{OrphanagePresenter, OrphanageService, SeaOrmOrphanageRepository};
use service::storage::DiskImageStore;

pub type AppOrphanageService = OrphanageService<SeaOrmOrphanageRepository, DiskImageStore>;

#[derive(Clone)]
pub struct ServerState {
    pub orphanages: Arc<AppOrphanageService>,
    pub uploads_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl ServerState {
    /// Wire the orphanage service over `db` and the configured uploads directory.
    pub async fn build(db: DatabaseConnection, uploads: &UploadsConfig) -> Result<Self, ServiceError> {
        let images = Arc::new(DiskImageStore::new(uploads.dir.clone()).await?);
        let repo = Arc::new(SeaOrmOrphanageRepository::new(db));
        let presenter = OrphanagePresenter::new(uploads.public_base_url.clone());
        Ok(Self {
            orphanages: Arc::new(OrphanageService::new(repo, images, presenter)),
            uploads_dir: PathBuf::from(&uploads.dir),
            max_body_bytes: uploads.max_body_bytes,
        })
    }
}
