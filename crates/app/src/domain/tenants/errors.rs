//! Tenants service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Failures from tenant administration and lookup.
///
/// An unknown slug during lookup is not one of these; lookups report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TenantsServiceError {
    /// The slug or uuid is already taken.
    #[error("tenant already exists")]
    AlreadyExists,

    /// No tenant has the given slug.
    #[error("tenant not found")]
    NotFound,

    /// A required value was missing: a blank name, or a `NOT NULL` column left empty.
    #[error("missing required data")]
    MissingRequiredData,

    /// The database refused the row, e.g. a slug that fails the format check.
    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TenantsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
