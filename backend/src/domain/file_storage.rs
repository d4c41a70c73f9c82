//! Package image storage use-case.
//!
//! Validation and naming happen here so every [`ImageStorage`] adapter sees
//! the same guarantees: non-empty `image/*` content and a generated name that
//! never contains caller input beyond a sanitised extension.

use std::sync::Arc;

use tracing::{error, info};

use super::ports::{ImageStorage, ImageStorageError};
use super::{Error, ImageUpload, public_image_url};

/// Validates uploads and writes them through an [`ImageStorage`] adapter.
pub struct FileStorage<S> {
    storage: Arc<S>,
}

impl<S> Clone for FileStorage<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: ImageStorage> FileStorage<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Persist `upload` and return its public URL,
    /// `/files/pacotes/<generated><ext>`.
    ///
    /// # Errors
    /// [`ErrorCode::InvalidRequest`](super::ErrorCode::InvalidRequest) for an
    /// empty file, [`ErrorCode::UnsupportedMediaType`](super::ErrorCode::UnsupportedMediaType)
    /// for a non-image type, and an internal error when the write fails.
    pub async fn store_image(&self, upload: ImageUpload) -> Result<String, Error> {
        upload.validate()?;
        let file_name = upload.stored_file_name();
        let size = upload.content.len();
        self.storage
            .write_image(&file_name, upload.content)
            .await
            .map_err(map_storage_error)?;
        info!(file = %file_name, bytes = size, "package image stored");
        Ok(public_image_url(&file_name))
    }
}

fn map_storage_error(err: ImageStorageError) -> Error {
    error!(error = %err, "image write failed");
    match err {
        ImageStorageError::Write { .. } => Error::internal("falha ao gravar imagem"),
    }
}
