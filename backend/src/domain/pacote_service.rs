//! Package management backed by the package repository and image storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::file_storage::FileStorage;
use super::ports::{ImageStorage, PacoteRepository, PacoteRepositoryError, PacoteService};
use super::{Error, ImageUpload, Pacote, PacoteId, PacoteInput};

fn map_pacote_repository_error(err: PacoteRepositoryError) -> Error {
    match err {
        PacoteRepositoryError::Connection { message } => {
            error!(%message, "pacote repository unavailable");
            Error::service_unavailable("repositório de pacotes indisponível")
        }
        PacoteRepositoryError::Query { message } => {
            error!(%message, "pacote repository query failed");
            Error::internal(format!("pacote repository error: {message}"))
        }
    }
}

fn not_found(id: PacoteId) -> Error {
    Error::not_found(format!("pacote {id} não encontrado"))
}

/// [`PacoteService`] over a [`PacoteRepository`] and an [`ImageStorage`].
pub struct RepositoryPacoteService<P, S> {
    pacotes: Arc<P>,
    images: FileStorage<S>,
}

impl<P, S: ImageStorage> RepositoryPacoteService<P, S> {
    pub fn new(pacotes: Arc<P>, images: Arc<S>) -> Self {
        Self {
            pacotes,
            images: FileStorage::new(images),
        }
    }
}

#[async_trait]
impl<P, S> PacoteService for RepositoryPacoteService<P, S>
where
    P: PacoteRepository,
    S: ImageStorage,
{
    async fn list(&self) -> Result<Vec<Pacote>, Error> {
        self.pacotes
            .list()
            .await
            .map_err(map_pacote_repository_error)
    }

    async fn get(&self, id: PacoteId) -> Result<Pacote, Error> {
        self.pacotes
            .find_by_id(id)
            .await
            .map_err(map_pacote_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, input: PacoteInput) -> Result<Pacote, Error> {
        let created = self
            .pacotes
            .insert(input)
            .await
            .map_err(map_pacote_repository_error)?;
        info!(id = %created.id, "pacote created");
        Ok(created)
    }

    async fn update(&self, id: PacoteId, input: PacoteInput) -> Result<Pacote, Error> {
        let mut pacote = self.get(id).await?;
        input.merge_into(&mut pacote);
        self.pacotes
            .update(&pacote)
            .await
            .map_err(map_pacote_repository_error)?;
        info!(%id, "pacote updated");
        Ok(pacote)
    }

    async fn delete(&self, id: PacoteId) -> Result<(), Error> {
        self.pacotes
            .delete(id)
            .await
            .map_err(map_pacote_repository_error)?;
        info!(%id, "pacote deleted");
        Ok(())
    }

    async fn attach_image(&self, id: PacoteId, upload: ImageUpload) -> Result<Pacote, Error> {
        let mut pacote = self.get(id).await?;
        let url = self.images.store_image(upload).await?;
        pacote.imagem_url = Some(url);
        self.pacotes
            .update(&pacote)
            .await
            .map_err(map_pacote_repository_error)?;
        Ok(pacote)
    }
}
