//! In-process [`VendedorRepository`] used without a database and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{VendedorRepository, VendedorRepositoryError};
use crate::domain::{NewVendedor, Vendedor, VendedorId};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<VendedorId, Vendedor>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<VendedorId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != except)
    }
}

/// Sellers kept in a map keyed by id; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryVendedorRepository {
    table: RwLock<Table>,
}

impl InMemoryVendedorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VendedorRepository for InMemoryVendedorRepository {
    async fn list(&self) -> Result<Vec<Vendedor>, VendedorRepositoryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: VendedorId,
    ) -> Result<Option<Vendedor>, VendedorRepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Vendedor>, VendedorRepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|row| row.email == email).cloned())
    }

    async fn insert(&self, vendedor: NewVendedor) -> Result<Vendedor, VendedorRepositoryError> {
        let mut table = self.table.write().await;
        if table.email_taken(&vendedor.email, None) {
            return Err(VendedorRepositoryError::duplicate_email(vendedor.email));
        }
        table.last_id += 1;
        let stored = vendedor.with_id(VendedorId::new(table.last_id));
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, vendedor: &Vendedor) -> Result<(), VendedorRepositoryError> {
        let mut table = self.table.write().await;
        if table.email_taken(&vendedor.email, Some(vendedor.id)) {
            return Err(VendedorRepositoryError::duplicate_email(
                vendedor.email.as_str(),
            ));
        }
        if let Some(row) = table.rows.get_mut(&vendedor.id) {
            row.clone_from(vendedor);
        }
        Ok(())
    }

    async fn delete(&self, id: VendedorId) -> Result<(), VendedorRepositoryError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use rstest::{fixture, rstest};

    fn new_vendedor(email: &str) -> NewVendedor {
        NewVendedor::try_from_parts(Some("Ana"), Some(email), Some("123"), None).expect("valid")
    }

    #[fixture]
    fn repo() -> InMemoryVendedorRepository {
        InMemoryVendedorRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_and_not_reused(repo: InMemoryVendedorRepository) {
        let first = repo.insert(new_vendedor("a@x.com")).await.expect("insert");
        repo.delete(first.id).await.expect("delete");
        let second = repo.insert(new_vendedor("b@x.com")).await.expect("insert");
        assert_eq!(first.id, VendedorId::new(1));
        assert_eq!(second.id, VendedorId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookup_is_exact(repo: InMemoryVendedorRepository) {
        repo.insert(new_vendedor("ana@x.com")).await.expect("insert");
        assert!(repo.find_by_email("ana@x.com").await.expect("query").is_some());
        assert!(repo.find_by_email("ANA@x.com").await.expect("query").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected(repo: InMemoryVendedorRepository) {
        repo.insert(new_vendedor("ana@x.com")).await.expect("insert");
        let mut bia = repo.insert(new_vendedor("bia@x.com")).await.expect("insert");

        let dup = repo.insert(new_vendedor("ana@x.com")).await.expect_err("dup insert");
        assert_eq!(dup, VendedorRepositoryError::duplicate_email("ana@x.com"));

        bia.email = "ana@x.com".to_owned();
        assert!(repo.update(&bia).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn update_overwrites_and_keeps_own_email(repo: InMemoryVendedorRepository) {
        let mut ana = repo.insert(new_vendedor("ana@x.com")).await.expect("insert");
        ana.role = Role::Admin;
        repo.update(&ana).await.expect("update");
        let stored = repo.find_by_id(ana.id).await.expect("query").expect("row");
        assert_eq!(stored.role, Role::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_missing_ids_is_silent(repo: InMemoryVendedorRepository) {
        assert!(repo.delete(VendedorId::new(42)).await.is_ok());
    }
}
