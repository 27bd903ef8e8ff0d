//! Create Widget Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tessera_app::domain::widgets::data::NewWidget;

use crate::{
    extensions::*,
    state::State,
    widgets::{errors::into_status_error, models::WidgetResponse},
};

/// Create Widget Request
///
/// Identity and ownership are assigned by the server, so they are not accepted here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateWidgetRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateWidgetRequest> for NewWidget {
    fn from(request: CreateWidgetRequest) -> Self {
        NewWidget {
            name: request.name,
            description: request.description,
        }
    }
}

/// Create Widget Handler
#[endpoint(
    tags("widgets"),
    summary = "Create Widget",
    responses(
        (status_code = 201, description = "Widget created"),
        (status_code = 400, description = "Bad Request"),
        (status_code = 403, description = "Tenant required or denied"),
        (status_code = 409, description = "Widget already exists"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateWidgetRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WidgetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.tenant_context_or_403()?;

    let widget = state
        .app
        .widgets
        .create_widget(ctx, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let location = format!(
        "{}/{}",
        req.uri().path().trim_end_matches('/'),
        widget.meta.uuid
    );

    res.add_header(LOCATION, location, true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(widget.into()))
}
