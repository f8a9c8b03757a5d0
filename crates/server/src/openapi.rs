use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Multipart registration form. `images` may repeat, one part per file.
#[derive(ToSchema)]
pub struct CreateOrphanageForm {
    pub name: String,
    #[schema(example = "-27.2092052")]
    pub latitude: String,
    #[schema(example = "-49.6401092")]
    pub longitude: String,
    /// At most 300 characters.
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    /// Only the exact string `true` means open on weekends.
    #[schema(example = "true")]
    pub open_on_weekends: String,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ImageDoc { pub id: i32, pub url: String }

#[derive(ToSchema)]
pub struct OrphanageDoc {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub images: Vec<ImageDoc>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub message: String,
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::orphanages::create,
        crate::routes::orphanages::index,
        crate::routes::orphanages::show,
    ),
    components(
        schemas(
            HealthResponse,
            CreateOrphanageForm,
            ImageDoc,
            OrphanageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "orphanages")
    )
)]
pub struct ApiDoc;
