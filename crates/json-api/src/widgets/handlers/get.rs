//! Get Widget Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    widgets::{errors::into_status_error, models::WidgetResponse},
};

/// Get Widget Handler
///
/// Widgets owned by other tenants are reported exactly like missing ones.
#[endpoint(
    tags("widgets"),
    summary = "Get Widget",
    responses(
        (status_code = StatusCode::OK, description = "Widget found"),
        (status_code = StatusCode::FORBIDDEN, description = "Tenant required or denied"),
        (status_code = StatusCode::NOT_FOUND, description = "Widget not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    widget: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WidgetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.tenant_context_or_403()?;

    let widget = state
        .app
        .widgets
        .get_widget(ctx, widget.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(widget.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tessera_app::domain::widgets::{
        MockWidgetsService, WidgetsServiceError, records::WidgetUuid,
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_widget, widgets_service};

    use super::*;

    fn make_service(widgets: MockWidgetsService) -> Service {
        widgets_service(widgets, Router::with_path("widgets/{widget}").get(handler))
    }

    #[tokio::test]
    async fn test_get_widget_returns_widget() -> TestResult {
        let uuid = WidgetUuid::new();

        let mut widgets = MockWidgetsService::new();

        widgets
            .expect_get_widget()
            .once()
            .withf(move |ctx, requested| ctx.tenant() == TEST_TENANT_UUID && *requested == uuid)
            .return_once(move |_, _| Ok(make_widget(uuid, "Sprocket")));

        let mut res = TestClient::get(format!("http://example.com/widgets/{uuid}"))
            .send(&make_service(widgets))
            .await;

        let body: WidgetResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Sprocket");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_widget_not_found_returns_404() -> TestResult {
        let mut widgets = MockWidgetsService::new();

        widgets
            .expect_get_widget()
            .once()
            .return_once(|_, _| Err(WidgetsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/widgets/{}", WidgetUuid::new()))
            .send(&make_service(widgets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_widget_invalid_uuid_returns_400() -> TestResult {
        let mut widgets = MockWidgetsService::new();

        widgets.expect_get_widget().never();

        let res = TestClient::get("http://example.com/widgets/not-a-uuid")
            .send(&make_service(widgets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
