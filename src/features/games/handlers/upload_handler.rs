use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::games::dtos::{
    IncomingFile, UploadField, UploadGameDto, UploadGameForm, UploadGameResponseDto,
};
use crate::features::games::services::UploadService;
use crate::shared::types::{ErrorResponse, FieldError};

/// Upload a game
///
/// Accepts multipart/form-data with:
/// - `thumbnail`: image file (optional)
/// - `webglFolder`: zipped WebGL build (optional)
/// - `gameName`, `description`, `categoryId`: text fields (optional)
///
/// At least one file is required.
#[utoipa::path(
    post,
    path = "/api/upload-game",
    tag = "games",
    request_body(
        content = UploadGameDto,
        content_type = "multipart/form-data",
        description = "Game upload form",
    ),
    responses(
        (status = 200, description = "Game stored and recorded", body = UploadGameResponseDto),
        (status = 400, description = "Invalid fields, malformed form, or no files", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 415, description = "Unsupported file type", body = ErrorResponse),
        (status = 422, description = "Bundle could not be extracted", body = ErrorResponse),
        (status = 500, description = "Filesystem or database failure", body = ErrorResponse),
    )
)]
pub async fn upload_game(
    State(service): State<Arc<UploadService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadGameResponseDto>> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected upload body: {}", e);
        AppError::BadRequest(format!("Expected a multipart form: {}", e.body_text()))
    })?;

    let form = read_form(&mut multipart).await?;
    let response = service.upload(form).await?;

    Ok(Json(response))
}

/// Buffer every known part of the form. Nothing is written to disk here.
async fn read_form(multipart: &mut Multipart) -> Result<UploadGameForm> {
    let mut form = UploadGameForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        let is_file = field.file_name().is_some();

        if is_file {
            read_file_part(&mut form, &field_name, field).await?;
            continue;
        }

        let slot = match field_name.as_str() {
            "gameName" => &mut form.game_name,
            "description" => &mut form.description,
            "categoryId" => &mut form.category_id,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
                continue;
            }
        };
        if slot.is_some() {
            debug!("Ignoring repeated field: {}", field_name);
            continue;
        }
        let text = field.text().await.map_err(multipart_error)?;
        *slot = Some(text);
    }

    Ok(form)
}

async fn read_file_part(form: &mut UploadGameForm, field_name: &str, field: Field<'_>) -> Result<()> {
    let Some(upload_field) = UploadField::from_name(field_name) else {
        match UploadGameForm::text_field_message(field_name) {
            Some(message) => form
                .rejected_fields
                .push(FieldError::new(field_name, message)),
            None => debug!("Ignoring unknown file field: {}", field_name),
        }
        return Ok(());
    };

    let slot = match upload_field {
        UploadField::Thumbnail => &mut form.thumbnail,
        UploadField::WebglFolder => &mut form.webgl_folder,
    };
    if slot.is_some() {
        debug!("Ignoring extra file for field: {}", field_name);
        return Ok(());
    }

    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let original_name = field.file_name().unwrap_or("").to_string();
    let data = field.bytes().await.map_err(multipart_error)?;

    *slot = Some(IncomingFile {
        field: upload_field,
        original_name,
        content_type,
        data,
    });

    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}
