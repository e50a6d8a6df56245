//! Axum route handler for document uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::documents::extract_document_text;
use crate::errors::AppError;

/// Multipart field that carries the document.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub text: String,
}

/// POST /api/v1/documents
///
/// Accepts a multipart PDF upload in the `file` field and returns its cleaned text.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("document.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload
        .ok_or_else(|| AppError::Validation(format!("Missing '{FILE_FIELD}' field")))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    info!("Extracting text from '{}' ({} bytes)", file_name, data.len());
    let text = tokio::task::spawn_blocking(move || extract_document_text(&data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(UploadResponse {
        message: format!("File '{file_name}' processed successfully"),
        text,
    }))
}
