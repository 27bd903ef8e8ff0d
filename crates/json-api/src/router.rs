//! Routes

use std::time::Duration;

use salvo::{Router, catch_panic::CatchPanic, timeout::Timeout, trailing_slash::remove_slash};

use crate::{observability, tenancy, widgets};

/// Root router carrying the per-request hoops every route shares.
///
/// Requests running past `request_timeout` are cut off with `503 Service Unavailable`.
pub(crate) fn root(request_timeout: Duration) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(Timeout::new(request_timeout))
}

fn widget_routes() -> Router {
    Router::with_path("widgets")
        .get(widgets::index::handler)
        .post(widgets::create::handler)
        .push(
            Router::with_path("{widget}")
                .get(widgets::get::handler)
                .put(widgets::update::handler)
                .delete(widgets::delete::handler),
        )
}

/// Tenant-scoped API routes.
///
/// Each resource is mounted twice: bare, where the tenant comes from the header or query,
/// and under `tenants/{tenant_slug}`.
pub(crate) fn tenant_scoped_routes() -> Router {
    Router::new()
        .hoop(tenancy::resolve)
        .hoop(tenancy::require)
        .push(widget_routes())
        .push(Router::with_path("tenants/{tenant_slug}").push(widget_routes()))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use tessera::tenancy::TenantContext;
    use tessera_app::{
        context::AppContext,
        domain::widgets::{StoreWidgetsService, WidgetsService, data::NewWidget, records::Widget},
        store::MemoryStore,
    };

    use crate::{
        state::State,
        test_helpers::{lookup_only_tenants_mock, make_tenant},
        widgets::index::WidgetsResponse,
    };

    use super::*;

    struct Fixture {
        service: Service,
        widgets: Arc<StoreWidgetsService>,
        acme: TenantContext,
    }

    /// `acme` and `globex` are active, `other` is not. Widgets live in memory.
    fn fixture() -> TestResult<Fixture> {
        let acme_record = make_tenant(&"acme".parse()?, true);
        let globex_record = make_tenant(&"globex".parse()?, true);
        let other_record = make_tenant(&"other".parse()?, false);

        let acme = acme_record.status();
        let acme = TenantContext::new(acme.uuid, acme.slug);

        let records = [acme_record, globex_record, other_record];

        let mut tenants = lookup_only_tenants_mock();

        tenants.expect_find_tenant_by_slug().returning(move |slug| {
            Ok(records.iter().find(|record| record.slug == *slug).cloned())
        });

        let widgets = Arc::new(StoreWidgetsService::new(Arc::new(MemoryStore::<Widget>::new())));

        let state = State::from_app_context(AppContext::new(
            Arc::new(tenants),
            widgets.clone(),
            Duration::ZERO,
        ));

        let service = Service::new(Router::new().hoop(inject(state)).push(tenant_scoped_routes()));

        Ok(Fixture {
            service,
            widgets,
            acme,
        })
    }

    #[tokio::test]
    async fn widget_created_by_one_tenant_is_invisible_to_another() -> TestResult {
        let fixture = fixture()?;

        let widget = fixture
            .widgets
            .create_widget(
                &fixture.acme,
                NewWidget {
                    name: "Sprocket".to_string(),
                    description: None,
                },
            )
            .await?;

        let own = TestClient::get(format!(
            "http://example.com/tenants/acme/widgets/{}",
            widget.meta.uuid
        ))
        .send(&fixture.service)
        .await;

        let foreign = TestClient::get(format!("http://example.com/widgets/{}", widget.meta.uuid))
            .add_header("x-tenant-slug", "globex", true)
            .send(&fixture.service)
            .await;

        let mut foreign_list = TestClient::get("http://example.com/widgets?tenantSlug=globex")
            .send(&fixture.service)
            .await;

        let listed: WidgetsResponse = foreign_list.take_json().await?;

        assert_eq!(own.status_code, Some(StatusCode::OK));
        assert_eq!(foreign.status_code, Some(StatusCode::NOT_FOUND));
        assert!(listed.widgets.is_empty(), "globex must not see acme widgets");

        Ok(())
    }

    #[tokio::test]
    async fn inactive_and_missing_tenants_are_refused() -> TestResult {
        let fixture = fixture()?;

        let inactive = TestClient::get("http://example.com/tenants/other/widgets")
            .send(&fixture.service)
            .await;

        let missing = TestClient::get("http://example.com/widgets")
            .send(&fixture.service)
            .await;

        assert_eq!(inactive.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(missing.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn deleted_widget_disappears_and_delete_repeats_cleanly() -> TestResult {
        let fixture = fixture()?;

        let widget = fixture
            .widgets
            .create_widget(
                &fixture.acme,
                NewWidget {
                    name: "Doomed".to_string(),
                    description: None,
                },
            )
            .await?;

        let url = format!("http://example.com/widgets/{}", widget.meta.uuid);

        let first = TestClient::delete(&url)
            .add_header("x-tenant-slug", "acme", true)
            .send(&fixture.service)
            .await;

        let second = TestClient::delete(&url)
            .add_header("x-tenant-slug", "acme", true)
            .send(&fixture.service)
            .await;

        let fetched = TestClient::get(&url)
            .add_header("x-tenant-slug", "acme", true)
            .send(&fixture.service)
            .await;

        assert_eq!(first.status_code, Some(StatusCode::OK));
        assert_eq!(second.status_code, Some(StatusCode::OK));
        assert_eq!(fetched.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn foreign_tenant_cannot_delete() -> TestResult {
        let fixture = fixture()?;

        let widget = fixture
            .widgets
            .create_widget(
                &fixture.acme,
                NewWidget {
                    name: "Guarded".to_string(),
                    description: None,
                },
            )
            .await?;

        let res = TestClient::delete(format!("http://example.com/widgets/{}", widget.meta.uuid))
            .add_header("x-tenant-slug", "globex", true)
            .send(&fixture.service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(
            fixture
                .widgets
                .get_widget(&fixture.acme, widget.meta.uuid)
                .await?
                .data
                .name,
            "Guarded"
        );

        Ok(())
    }

    #[handler]
    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;

        "too late"
    }

    #[handler]
    async fn quick() -> &'static str {
        "on time"
    }

    fn bounded_service() -> Service {
        Service::new(
            root(Duration::from_millis(50))
                .push(Router::with_path("slow").get(slow))
                .push(Router::with_path("quick").get(quick)),
        )
    }

    #[tokio::test]
    async fn request_past_the_timeout_is_unavailable() -> TestResult {
        let res = TestClient::get("http://example.com/slow")
            .send(&bounded_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }

    #[tokio::test]
    async fn request_within_the_timeout_completes() -> TestResult {
        let mut res = TestClient::get("http://example.com/quick")
            .send(&bounded_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "on time");

        Ok(())
    }
}
