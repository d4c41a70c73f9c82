//! In-process [`PacoteRepository`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{PacoteRepository, PacoteRepositoryError};
use crate::domain::{Pacote, PacoteId, PacoteInput};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<PacoteId, Pacote>,
}

#[derive(Debug, Default)]
pub struct InMemoryPacoteRepository {
    table: RwLock<Table>,
}

impl InMemoryPacoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PacoteRepository for InMemoryPacoteRepository {
    async fn list(&self) -> Result<Vec<Pacote>, PacoteRepositoryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PacoteId) -> Result<Option<Pacote>, PacoteRepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, input: PacoteInput) -> Result<Pacote, PacoteRepositoryError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let pacote = input.into_pacote(PacoteId::new(table.last_id));
        table.rows.insert(pacote.id, pacote.clone());
        Ok(pacote)
    }

    async fn update(&self, pacote: &Pacote) -> Result<(), PacoteRepositoryError> {
        if let Some(row) = self.table.write().await.rows.get_mut(&pacote.id) {
            row.clone_from(pacote);
        }
        Ok(())
    }

    async fn delete(&self, id: PacoteId) -> Result<(), PacoteRepositoryError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_ids_and_list_is_ordered() {
        let repo = InMemoryPacoteRepository::new();
        for titulo in ["Rio", "Salvador", "Gramado"] {
            repo.insert(PacoteInput {
                titulo: Some(titulo.to_owned()),
                ..PacoteInput::default()
            })
            .await
            .expect("insert");
        }

        let titulos: Vec<_> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|p| (p.id.get(), p.titulo.unwrap_or_default()))
            .collect();
        assert_eq!(
            titulos,
            vec![
                (1, "Rio".to_owned()),
                (2, "Salvador".to_owned()),
                (3, "Gramado".to_owned())
            ]
        );
    }

    #[tokio::test]
    async fn update_replaces_stored_package() {
        let repo = InMemoryPacoteRepository::new();
        let mut pacote = repo.insert(PacoteInput::default()).await.expect("insert");
        pacote.imagem_url = Some("/files/pacotes/x.png".to_owned());
        repo.update(&pacote).await.expect("update");

        let stored = repo.find_by_id(pacote.id).await.expect("query");
        assert_eq!(stored, Some(pacote));
    }

    #[tokio::test]
    async fn delete_is_best_effort() {
        let repo = InMemoryPacoteRepository::new();
        let pacote = repo.insert(PacoteInput::default()).await.expect("insert");
        repo.delete(pacote.id).await.expect("delete");
        repo.delete(pacote.id).await.expect("second delete");
        assert!(repo.find_by_id(pacote.id).await.expect("query").is_none());
    }
}
