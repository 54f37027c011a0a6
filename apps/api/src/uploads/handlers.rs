//! Axum route handlers for the upload API.

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart,
    },
    http::StatusCode,
    Json,
};
use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::uploads::intake::{accept_files, is_allowed_type, FilePayload, UploadedFile, MAX_FILE_SIZE};

/// Whole-request cap for `/upload`. Every byte of the multipart body counts,
/// including parts that are skipped for their type or size. Crossing it fails the
/// whole request with 413. Individual files are still held to `MAX_FILE_SIZE`.
pub const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub files: Vec<UploadedFile>,
}

/// POST /upload
///
/// Accepts a multipart list of files. Files with a disallowed type or over the
/// size limit are omitted from the response without any per-file error.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    let mut payloads = Vec::new();
    let mut received = 0usize;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        received += 1;
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);

        // Skip the body of files we would reject anyway.
        if !content_type.as_deref().is_some_and(is_allowed_type) {
            debug!("Skipping upload '{name}' with type {content_type:?}");
            continue;
        }

        let Some(data) = read_capped(field, MAX_FILE_SIZE)
            .await
            .map_err(multipart_error)?
        else {
            debug!("Skipping upload '{name}': larger than {MAX_FILE_SIZE} bytes");
            continue;
        };

        payloads.push(FilePayload {
            name,
            content_type,
            data,
        });
    }

    let files = accept_files(payloads);
    info!("Upload accepted {} of {} files", files.len(), received);

    Ok(Json(UploadResponse { files }))
}

/// Reads a field into memory, giving up with `None` as soon as it exceeds `limit`.
/// The unread remainder is discarded when the field is dropped.
async fn read_capped(mut field: Field<'_>, limit: usize) -> Result<Option<Bytes>, MultipartError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf.freeze()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the {UPLOAD_BODY_LIMIT} byte request limit"
        ))
    } else {
        AppError::Validation(format!("Invalid multipart upload: {}", e.body_text()))
    }
}
