use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::orphanage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// File name assigned by the image store, relative to the uploads directory.
    pub path: String,
    #[serde(skip)]
    pub orphanage_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Orphanage }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Orphanage => Entity::belongs_to(orphanage::Entity)
                .from(Column::OrphanageId)
                .to(orphanage::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<orphanage::Entity> for Entity {
    fn to() -> RelationDef { Relation::Orphanage.def() }
}

impl ActiveModelBehavior for ActiveModel {}
