//! Store errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use tessera::records::InvalidEntity;
use thiserror::Error;

/// Failures from a [`TenantScopedStore`](super::TenantScopedStore).
///
/// Not-found is never an error here; it is reported through return values.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same identifier already exists.
    #[error("record already exists")]
    AlreadyExists,

    /// The owning tenant does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// The database refused the change (constraint or immutability trigger).
    #[error("invalid data")]
    InvalidData,

    /// The entity payload failed validation.
    #[error(transparent)]
    Invalid(#[from] InvalidEntity),

    /// The payload could not be encoded or decoded.
    #[error("record payload encoding error")]
    Encoding(#[source] serde_json::Error),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Encoding(error)
    }
}
