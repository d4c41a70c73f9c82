//! PostgreSQL-backed [`VendedorRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VendedorRepository, VendedorRepositoryError};
use crate::domain::{NewVendedor, Vendedor, VendedorId};

use super::diesel_error_mapping::{PersistenceErrorKinds, is_unique_violation};
use super::models::{VendedorRow, VendedorValues};
use super::pool::DbPool;
use super::schema::vendedores;

impl PersistenceErrorKinds for VendedorRepositoryError {
    fn connection(message: String) -> Self {
        Self::Connection { message }
    }

    fn query(message: String) -> Self {
        Self::Query { message }
    }
}

fn map_write_error(error: diesel::result::Error, email: &str) -> VendedorRepositoryError {
    if is_unique_violation(&error) {
        VendedorRepositoryError::duplicate_email(email)
    } else {
        VendedorRepositoryError::from_diesel(error)
    }
}

fn decode(row: VendedorRow) -> Result<Vendedor, VendedorRepositoryError> {
    Vendedor::try_from(row).map_err(VendedorRepositoryError::from_decode)
}

#[derive(Clone)]
pub struct DieselVendedorRepository {
    pool: DbPool,
}

impl DieselVendedorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendedorRepository for DieselVendedorRepository {
    async fn list(&self) -> Result<Vec<Vendedor>, VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        let rows: Vec<VendedorRow> = vendedores::table
            .order(vendedores::id.asc())
            .select(VendedorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(VendedorRepositoryError::from_diesel)?;
        rows.into_iter().map(decode).collect()
    }

    async fn find_by_id(
        &self,
        id: VendedorId,
    ) -> Result<Option<Vendedor>, VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        let row: Option<VendedorRow> = vendedores::table
            .find(id.get())
            .select(VendedorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(VendedorRepositoryError::from_diesel)?;
        row.map(decode).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Vendedor>, VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        let row: Option<VendedorRow> = vendedores::table
            .filter(vendedores::email.eq(email))
            .select(VendedorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(VendedorRepositoryError::from_diesel)?;
        row.map(decode).transpose()
    }

    async fn insert(&self, vendedor: NewVendedor) -> Result<Vendedor, VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        let values = VendedorValues::new(
            &vendedor.nome,
            &vendedor.email,
            &vendedor.senha,
            vendedor.role,
        );
        let row: VendedorRow = diesel::insert_into(vendedores::table)
            .values(&values)
            .returning(VendedorRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &vendedor.email))?;
        decode(row)
    }

    async fn update(&self, vendedor: &Vendedor) -> Result<(), VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        let values = VendedorValues::new(
            &vendedor.nome,
            &vendedor.email,
            &vendedor.senha,
            vendedor.role,
        );
        diesel::update(vendedores::table.find(vendedor.id.get()))
            .set(&values)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &vendedor.email))
    }

    async fn delete(&self, id: VendedorId) -> Result<(), VendedorRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(VendedorRepositoryError::from_pool)?;
        diesel::delete(vendedores::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(VendedorRepositoryError::from_diesel)
    }
}
