//! Widgets service errors.

use tessera::records::InvalidEntity;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum WidgetsServiceError {
    /// Missing, soft deleted, or owned by another tenant.
    #[error("widget not found")]
    NotFound,

    #[error("widget already exists")]
    AlreadyExists,

    #[error("invalid widget: {0}")]
    InvalidData(#[source] InvalidEntity),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for WidgetsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::Invalid(invalid) => Self::InvalidData(invalid),
            other => Self::Store(other),
        }
    }
}

impl From<InvalidEntity> for WidgetsServiceError {
    fn from(error: InvalidEntity) -> Self {
        Self::InvalidData(error)
    }
}
