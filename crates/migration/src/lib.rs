//! Migrator registering entity-specific migrations in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20201012_000001_create_orphanages;
mod m20201012_000002_create_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20201012_000001_create_orphanages::Migration),
            // images reference orphanages
            Box::new(m20201012_000002_create_images::Migration),
        ]
    }
}
