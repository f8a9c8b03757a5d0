use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::validation::{finite_number, not_blank};
use crate::{errors, image};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orphanages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[sea_orm(column_type = "Text")]
    pub about: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Images }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Images => Entity::has_many(image::Entity).into(),
        }
    }
}

impl Related<image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Images.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// A persisted orphanage together with its images, ordered by image id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrphanageRecord {
    #[serde(flatten)]
    pub orphanage: Model,
    pub images: Vec<image::Model>,
}

/// Boundary coercion for the `open_on_weekends` form flag.
///
/// Only the exact string `"true"` is true; everything else, including a
/// missing value, `"TRUE"` and `"1"`, is false.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Candidate orphanage as submitted, before any rule has been checked.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewOrphanage {
    #[validate(required(message = "name is a required field"), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(required(message = "latitude is a required field"), custom(function = "finite_number"))]
    pub latitude: Option<String>,
    #[validate(required(message = "longitude is a required field"), custom(function = "finite_number"))]
    pub longitude: Option<String>,
    #[validate(
        required(message = "about is a required field"),
        custom(function = "not_blank"),
        length(max = 300, message = "about must be at most 300 characters")
    )]
    pub about: Option<String>,
    #[validate(required(message = "instructions is a required field"), custom(function = "not_blank"))]
    pub instructions: Option<String>,
    #[validate(required(message = "opening_hours is a required field"), custom(function = "not_blank"))]
    pub opening_hours: Option<String>,
    pub open_on_weekends: bool,
    #[validate(nested)]
    pub images: Vec<NewImage>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct NewImage {
    #[validate(custom(function = "not_blank"))]
    pub path: String,
}

/// An orphanage that passed every rule, with coordinates parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrphanage {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub images: Vec<String>,
}

impl NewOrphanage {
    /// Check every rule in one pass; on failure all violations are returned together.
    pub fn validated(self) -> Result<ValidOrphanage, ValidationErrors> {
        self.validate()?;
        Ok(ValidOrphanage {
            name: self.name.unwrap_or_default(),
            latitude: parse_number(self.latitude.as_deref()),
            longitude: parse_number(self.longitude.as_deref()),
            about: self.about.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            opening_hours: self.opening_hours.unwrap_or_default(),
            open_on_weekends: self.open_on_weekends,
            images: self.images.into_iter().map(|i| i.path).collect(),
        })
    }
}

// only called after `finite_number` accepted the value
fn parse_number(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or_default()
}

/// Insert the orphanage and its images in one transaction.
pub async fn create(db: &DatabaseConnection, new: ValidOrphanage) -> Result<OrphanageRecord, errors::ModelError> {
    let txn = db.begin().await?;
    let am = ActiveModel {
        name: Set(new.name),
        latitude: Set(new.latitude),
        longitude: Set(new.longitude),
        about: Set(new.about),
        instructions: Set(new.instructions),
        opening_hours: Set(new.opening_hours),
        open_on_weekends: Set(new.open_on_weekends),
        ..Default::default()
    };
    let orphanage = am.insert(&txn).await?;

    let mut images = Vec::with_capacity(new.images.len());
    for path in new.images {
        let img = image::ActiveModel {
            path: Set(path),
            orphanage_id: Set(orphanage.id),
            ..Default::default()
        };
        images.push(img.insert(&txn).await?);
    }
    txn.commit().await?;
    debug!(id = orphanage.id, images = images.len(), "orphanage inserted");
    Ok(OrphanageRecord { orphanage, images })
}

/// All orphanages in insertion order with their images eagerly loaded.
pub async fn find_all_with_images(db: &DatabaseConnection) -> Result<Vec<OrphanageRecord>, errors::ModelError> {
    let rows = Entity::find()
        .find_with_related(image::Entity)
        .order_by_asc(Column::Id)
        .order_by_asc(image::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(orphanage, images)| OrphanageRecord { orphanage, images })
        .collect())
}

pub async fn find_with_images(db: &DatabaseConnection, id: i32) -> Result<Option<OrphanageRecord>, errors::ModelError> {
    let Some(orphanage) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let images = orphanage
        .find_related(image::Entity)
        .order_by_asc(image::Column::Id)
        .all(db)
        .await?;
    Ok(Some(OrphanageRecord { orphanage, images }))
}
