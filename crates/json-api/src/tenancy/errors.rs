//! Tenancy Errors

use salvo::http::StatusError;
use tracing::error;

use tessera_app::tenancy::TenantValidationError;

/// Unknown and inactive tenants get the same response, so a caller cannot tell which
/// slugs exist.
pub(super) fn into_status_error(error: &TenantValidationError) -> StatusError {
    match error {
        TenantValidationError::Required => StatusError::forbidden().brief("Tenant required"),
        TenantValidationError::Denied => StatusError::forbidden().brief("Tenant access denied"),
        TenantValidationError::Lookup(source) => {
            error!("failed to look up tenant: {source}");

            StatusError::internal_server_error()
        }
    }
}
