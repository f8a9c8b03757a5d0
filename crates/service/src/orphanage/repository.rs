use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::orphanage::{self, OrphanageRecord, ValidOrphanage};

use crate::errors::ServiceError;

/// Persistence capability the orphanage service depends on.
#[async_trait]
pub trait OrphanageRepository: Send + Sync {
    /// Store the orphanage and all its images atomically.
    async fn save(&self, orphanage: ValidOrphanage) -> Result<OrphanageRecord, ServiceError>;
    async fn find_all(&self) -> Result<Vec<OrphanageRecord>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrphanageRecord>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmOrphanageRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrphanageRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl OrphanageRepository for SeaOrmOrphanageRepository {
    async fn save(&self, new: ValidOrphanage) -> Result<OrphanageRecord, ServiceError> {
        Ok(orphanage::create(&self.db, new).await?)
    }

    async fn find_all(&self) -> Result<Vec<OrphanageRecord>, ServiceError> {
        Ok(orphanage::find_all_with_images(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrphanageRecord>, ServiceError> {
        Ok(orphanage::find_with_images(&self.db, id).await?)
    }
}
