//! Port for writing package images to durable storage.
//!
//! Adapters receive an already validated, generated file name; they only need
//! to place the bytes under the package image directory, replacing any file
//! with the same name.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image storage adapters.
    pub enum ImageStorageError {
        /// The file could not be written.
        Write { name: String, message: String } => "failed to write image {name}: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Write `content` as `file_name` inside the package image directory.
    async fn write_image(&self, file_name: &str, content: Vec<u8>)
    -> Result<(), ImageStorageError>;
}
