//! Package image uploads: validation and stored-name generation.
//!
//! Stored names never echo the caller's filename. Only a lowercased
//! alphanumeric extension taken from the final path component survives.

use uuid::Uuid;

use super::Error;

/// Subdirectory of the upload root holding package images.
pub const PACOTES_DIR: &str = "pacotes";
/// URL prefix under which the upload root is served.
pub const FILES_URL_PREFIX: &str = "/files";

/// Uploaded file as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub content: Vec<u8>,
    pub content_type: Option<String>,
    pub original_filename: Option<String>,
}

/// Reasons an upload is refused before touching the file system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Arquivo vazio")]
    EmptyFile,
    #[error("Apenas imagem")]
    UnsupportedType { content_type: String },
}

impl From<UploadRejection> for Error {
    fn from(value: UploadRejection) -> Self {
        match value {
            UploadRejection::EmptyFile => Self::invalid_request(value.to_string()),
            UploadRejection::UnsupportedType { ref content_type } => {
                let details = serde_json::json!({ "contentType": content_type });
                Self::unsupported_media_type(value.to_string()).with_details(details)
            }
        }
    }
}

impl ImageUpload {
    /// Reject empty content and content types outside `image/*`
    /// (case-insensitive).
    pub fn validate(&self) -> Result<(), UploadRejection> {
        if self.content.is_empty() {
            return Err(UploadRejection::EmptyFile);
        }
        let content_type = self.content_type.as_deref().unwrap_or_default();
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(UploadRejection::UnsupportedType {
                content_type: content_type.to_owned(),
            });
        }
        Ok(())
    }

    /// Lowercased extension including the dot, or an empty string.
    ///
    /// # Examples
    /// ```
    /// use agencia::domain::ImageUpload;
    ///
    /// let upload = ImageUpload {
    ///     original_filename: Some("Praia.JPG".into()),
    ///     ..ImageUpload::default()
    /// };
    /// assert_eq!(upload.extension(), ".jpg");
    /// ```
    #[must_use]
    pub fn extension(&self) -> String {
        let original = self.original_filename.as_deref().unwrap_or_default();
        let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
        match base.rfind('.') {
            Some(dot) if dot > 0 => {
                let ext = base.get(dot + 1..).unwrap_or_default();
                if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                    format!(".{}", ext.to_ascii_lowercase())
                } else {
                    String::new()
                }
            }
            _ => String::new(),
        }
    }

    /// Random collision-resistant file name carrying this upload's extension.
    #[must_use]
    pub fn stored_file_name(&self) -> String {
        format!("{}{}", Uuid::new_v4().simple(), self.extension())
    }
}

/// Public URL for a stored package image.
#[must_use]
pub fn public_image_url(file_name: &str) -> String {
    format!("{FILES_URL_PREFIX}/{PACOTES_DIR}/{file_name}")
}
