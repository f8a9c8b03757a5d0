//! Create `orphanages` table.
//! One row per registered institution with its location and visiting rules.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orphanages::Table)
                    .if_not_exists()
                    .col(pk_auto(Orphanages::Id))
                    .col(string(Orphanages::Name))
                    .col(double(Orphanages::Latitude))
                    .col(double(Orphanages::Longitude))
                    .col(text(Orphanages::About))
                    .col(text(Orphanages::Instructions))
                    .col(string(Orphanages::OpeningHours))
                    .col(boolean(Orphanages::OpenOnWeekends).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orphanages::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orphanages {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    About,
    Instructions,
    OpeningHours,
    OpenOnWeekends,
}
