//! Shared translation of pool and Diesel failures into port errors.
//!
//! Driver messages are logged at debug level and replaced by fixed strings so
//! SQL details never reach callers.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::RowDecodeError;
use super::pool::PoolError;

/// Constructors a repository error type offers for the shared mapping.
pub(crate) trait PersistenceErrorKinds: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;

    fn from_pool(error: PoolError) -> Self {
        Self::connection(error.message().to_owned())
    }

    fn from_decode(error: RowDecodeError) -> Self {
        debug!(%error, "stored row could not be decoded");
        Self::query(error.to_string())
    }

    fn from_diesel(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::query("database query error".to_owned()),
            _ => Self::query("database error".to_owned()),
        }
    }
}

/// Whether `error` is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
