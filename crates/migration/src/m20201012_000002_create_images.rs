//! Create `images` table.
//! Photos belong to exactly one orphanage and go away with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(pk_auto(Images::Id))
                    .col(string(Images::Path))
                    .col(integer(Images::OrphanageId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_orphanage")
                            .from(Images::Table, Images::OrphanageId)
                            .to(Orphanages::Table, Orphanages::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_images_orphanage_id")
                    .table(Images::Table)
                    .col(Images::OrphanageId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Images::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Path,
    OrphanageId,
}

#[derive(DeriveIden)]
enum Orphanages { Table, Id }
