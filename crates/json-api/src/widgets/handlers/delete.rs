//! Delete Widget Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, widgets::errors::into_status_error};

/// Delete Widget Handler
///
/// Soft delete. Deleting an already deleted widget succeeds again.
#[endpoint(
    tags("widgets"),
    summary = "Delete Widget",
    responses(
        (status_code = StatusCode::OK, description = "Widget deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Tenant required or denied"),
        (status_code = StatusCode::NOT_FOUND, description = "Widget not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    widget: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.tenant_context_or_403()?;

    state
        .app
        .widgets
        .delete_widget(ctx, widget.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
