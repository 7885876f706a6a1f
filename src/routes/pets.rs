//! Pet routes: pet types, multipart create/update, and pet images.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::pet::{Pet, PetForm, PetType};
use crate::services::pet as pet_service;
use crate::AppState;

/// GET /api/v1/pettypes — all pet types.
pub async fn types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PetType>>>, AppError> {
    let types = pet_service::pet_types(&state.db).await?;
    Ok(ApiResponse::success(types))
}

/// POST /api/v1/owners/:owner_id/pets — add a pet (multipart form).
pub async fn create(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Pet>>, AppError> {
    let form = read_pet_form(multipart).await?;
    let pet = pet_service::create(&state.db, owner_id, &form, state.clock.today()).await?;
    Ok(ApiResponse::success(pet))
}

/// PUT /api/v1/owners/:owner_id/pets/:pet_id — update a pet (multipart form).
pub async fn update(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(Uuid, Uuid)>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Pet>>, AppError> {
    let form = read_pet_form(multipart).await?;
    let pet =
        pet_service::update(&state.db, owner_id, pet_id, &form, state.clock.today()).await?;
    Ok(ApiResponse::success(pet))
}

/// GET /api/v1/owners/:owner_id/pets/:pet_id/image — stored PNG image.
pub async fn image(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, AppError> {
    let bytes = pet_service::image(&state.db, owner_id, pet_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

/// Collect the pet form fields; unknown fields are ignored.
async fn read_pet_form(mut multipart: Multipart) -> Result<PetForm, AppError> {
    let mut form = PetForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image_file" => {
                form.image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?
                        .to_vec(),
                );
            }
            "name" | "type" | "birth_date" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                match name.as_str() {
                    "name" => form.name = Some(text),
                    "type" => form.pet_type = Some(text),
                    _ => form.birth_date = Some(text),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
