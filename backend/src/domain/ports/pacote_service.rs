//! Driving port for package management.

use async_trait::async_trait;

use crate::domain::{Error, ImageUpload, Pacote, PacoteId, PacoteInput};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PacoteService: Send + Sync {
    async fn list(&self) -> Result<Vec<Pacote>, Error>;

    async fn get(&self, id: PacoteId) -> Result<Pacote, Error>;

    /// Persist a new package; the image URL on the input is kept.
    async fn create(&self, input: PacoteInput) -> Result<Pacote, Error>;

    /// Merge `input` into the stored package (see [`PacoteInput::merge_into`]).
    async fn update(&self, id: PacoteId, input: PacoteInput) -> Result<Pacote, Error>;

    /// Best-effort delete.
    async fn delete(&self, id: PacoteId) -> Result<(), Error>;

    /// Store `upload` and point the package's image URL at it.
    async fn attach_image(&self, id: PacoteId, upload: ImageUpload) -> Result<Pacote, Error>;
}
