use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::orphanage::{OrphanageForm, OrphanageView, UploadedImage};

use crate::errors::JsonApiError;
use crate::state::ServerState;

const IMAGES_FIELD: &str = "images";

#[utoipa::path(
    post, path = "/orphanages", tag = "orphanages",
    request_body(content = crate::openapi::CreateOrphanageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::OrphanageDoc),
        (status = 400, description = "Validation fails", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<OrphanageView>), JsonApiError> {
    let mut form = OrphanageForm::default();
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGES_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            // browsers send an empty part when no file was picked
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            uploads.push(UploadedImage { file_name, bytes: bytes.to_vec() });
        } else {
            let value = field.text().await?;
            form.set(&name, value);
        }
    }

    info!(uploads = uploads.len(), "orphanage_create_request");
    let created = state.orphanages.create(form, uploads).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/orphanages", tag = "orphanages",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::OrphanageDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn index(State(state): State<ServerState>) -> Result<Json<Vec<OrphanageView>>, JsonApiError> {
    let list = state.orphanages.index().await?;
    info!(count = list.len(), "list orphanages");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/orphanages/{id}", tag = "orphanages",
    params(("id" = i32, Path, description = "Orphanage ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::OrphanageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn show(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<OrphanageView>, JsonApiError> {
    Ok(Json(state.orphanages.show(id).await?))
}
