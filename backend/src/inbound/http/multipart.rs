//! Multipart extraction of a single image field.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::{self, ContentDisposition};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::domain::{Error, ImageUpload};

/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

fn map_multipart_error(error: MultipartError) -> Error {
    Error::invalid_request(format!("multipart inválido: {error}"))
}

/// Read the `file` field into memory, failing once it exceeds `max_bytes`.
///
/// The declared content type and original filename are passed through as
/// sent; validation happens in the domain. Other fields are skipped.
pub async fn read_image_upload(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<ImageUpload, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        let disposition = field
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| ContentDisposition::from_raw(value).ok());
        let Some(disposition) = disposition.filter(|cd| cd.get_name() == Some(FILE_FIELD)) else {
            while field.try_next().await.map_err(map_multipart_error)?.is_some() {}
            continue;
        };

        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let content = read_limited(&mut field, max_bytes).await?;
        return Ok(ImageUpload {
            content,
            content_type,
            original_filename: disposition.get_filename().map(str::to_owned),
        });
    }

    Err(Error::invalid_request("campo 'file' ausente")
        .with_details(json!({ "field": FILE_FIELD, "code": "missing_file" })))
}

async fn read_limited(field: &mut Field, max_bytes: usize) -> Result<Vec<u8>, Error> {
    let mut content = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
        if content.len() + chunk.len() > max_bytes {
            return Err(
                Error::payload_too_large(format!("arquivo excede {max_bytes} bytes"))
                    .with_details(json!({ "limit": max_bytes })),
            );
        }
        content.extend_from_slice(&chunk);
    }
    Ok(content)
}
