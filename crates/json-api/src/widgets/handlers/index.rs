//! Widget Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tessera_app::store::Page;

use crate::{
    extensions::*,
    state::State,
    widgets::{errors::into_status_error, models::WidgetResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WidgetsResponse {
    /// The tenant's live widgets, oldest first
    pub widgets: Vec<WidgetResponse>,
}

/// Widget Index Handler
///
/// Returns one page of the tenant's widgets.
#[endpoint(
    tags("widgets"),
    summary = "List Widgets",
    responses(
        (status_code = StatusCode::OK, description = "Widgets listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Tenant required or denied"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<Json<WidgetsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.tenant_context_or_403()?;
    let page = Page::new(limit.into_inner(), offset.into_inner());

    let widgets = state
        .app
        .widgets
        .list_widgets(ctx, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WidgetsResponse {
        widgets: widgets.into_iter().map(Into::into).collect(),
    }))
}
