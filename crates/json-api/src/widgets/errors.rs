//! Widget Errors

use salvo::http::StatusError;
use tracing::error;

use tessera_app::{domain::widgets::WidgetsServiceError, store::StoreError};

pub(crate) fn into_status_error(error: WidgetsServiceError) -> StatusError {
    match error {
        WidgetsServiceError::NotFound => StatusError::not_found().brief("Widget not found"),
        WidgetsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Widget already exists")
        }
        WidgetsServiceError::InvalidData(invalid) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        WidgetsServiceError::Store(StoreError::InvalidData | StoreError::InvalidReference) => {
            StatusError::bad_request().brief("Invalid widget payload")
        }
        WidgetsServiceError::Store(source) => {
            error!("widget storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
