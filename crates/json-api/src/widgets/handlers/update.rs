//! Update Widget Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use tessera_app::domain::widgets::data::WidgetUpdate;

use crate::{
    extensions::*,
    state::State,
    widgets::{errors::into_status_error, models::WidgetResponse},
};

/// Update Widget Request
///
/// Omitted fields keep their stored value, and `"description": null` clears the description.
/// Identity and ownership fields are unknown here and rejected.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateWidgetRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// Wraps any value that is present, `null` included, so absence stays distinguishable.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<UpdateWidgetRequest> for WidgetUpdate {
    fn from(request: UpdateWidgetRequest) -> Self {
        WidgetUpdate {
            name: request.name,
            description: request.description,
        }
    }
}

/// Widget Update Handler
#[endpoint(
    tags("widgets"),
    summary = "Update Widget",
    responses(
        (status_code = StatusCode::OK, description = "Widget updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Tenant required or denied"),
        (status_code = StatusCode::NOT_FOUND, description = "Widget not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "widgets.update",
    skip(widget, json, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        widget_uuid = tracing::field::Empty,
    ),
    err
)]
pub(crate) async fn handler(
    widget: PathParam<Uuid>,
    json: JsonBody<UpdateWidgetRequest>,
    depot: &mut Depot,
) -> Result<Json<WidgetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.tenant_context_or_403()?;
    let widget = widget.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(ctx.tenant()));
    span.record("widget_uuid", tracing::field::display(widget));

    let updated = state
        .app
        .widgets
        .update_widget(ctx, widget.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(widget_uuid = %widget, "updated widget");

    Ok(Json(updated.into()))
}
