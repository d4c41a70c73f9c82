//! PostgreSQL-backed [`PacoteRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PacoteRepository, PacoteRepositoryError};
use crate::domain::{Pacote, PacoteId, PacoteInput};

use super::diesel_error_mapping::PersistenceErrorKinds;
use super::models::{PacoteRow, PacoteValues};
use super::pool::DbPool;
use super::schema::pacotes;

impl PersistenceErrorKinds for PacoteRepositoryError {
    fn connection(message: String) -> Self {
        Self::Connection { message }
    }

    fn query(message: String) -> Self {
        Self::Query { message }
    }
}

fn decode(row: PacoteRow) -> Result<Pacote, PacoteRepositoryError> {
    Pacote::try_from(row).map_err(PacoteRepositoryError::from_decode)
}

#[derive(Clone)]
pub struct DieselPacoteRepository {
    pool: DbPool,
}

impl DieselPacoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PacoteRepository for DieselPacoteRepository {
    async fn list(&self) -> Result<Vec<Pacote>, PacoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(PacoteRepositoryError::from_pool)?;
        let rows: Vec<PacoteRow> = pacotes::table
            .order(pacotes::id.asc())
            .select(PacoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(PacoteRepositoryError::from_diesel)?;
        rows.into_iter().map(decode).collect()
    }

    async fn find_by_id(&self, id: PacoteId) -> Result<Option<Pacote>, PacoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(PacoteRepositoryError::from_pool)?;
        let row: Option<PacoteRow> = pacotes::table
            .find(id.get())
            .select(PacoteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PacoteRepositoryError::from_diesel)?;
        row.map(decode).transpose()
    }

    async fn insert(&self, input: PacoteInput) -> Result<Pacote, PacoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(PacoteRepositoryError::from_pool)?;
        let row: PacoteRow = diesel::insert_into(pacotes::table)
            .values(PacoteValues::from(&input))
            .returning(PacoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PacoteRepositoryError::from_diesel)?;
        decode(row)
    }

    async fn update(&self, pacote: &Pacote) -> Result<(), PacoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(PacoteRepositoryError::from_pool)?;
        diesel::update(pacotes::table.find(pacote.id.get()))
            .set(PacoteValues::from(pacote))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(PacoteRepositoryError::from_diesel)
    }

    async fn delete(&self, id: PacoteId) -> Result<(), PacoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(PacoteRepositoryError::from_pool)?;
        diesel::delete(pacotes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(PacoteRepositoryError::from_diesel)
    }
}
