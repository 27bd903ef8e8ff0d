//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use tessera::{
    records::{Ownership, RecordMeta},
    tenancy::{TenantContext, TenantSlug, TenantUuid},
};
use tessera_app::{
    context::AppContext,
    domain::{
        tenants::{MockTenantsService, records::TenantRecord},
        widgets::{
            MockWidgetsService, WidgetsServiceError,
            records::{Widget, WidgetRecord, WidgetUuid},
        },
    },
    store::StoreError,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_TENANT_SLUG: &str = "test-tenant";

/// Stands in for the tenancy hoops: admits the fixed test tenant.
#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Ok(slug) = TenantSlug::parse(TEST_TENANT_SLUG) {
        depot.insert_tenant_context(TenantContext::new(TEST_TENANT_UUID, slug));
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_widget(uuid: WidgetUuid, name: &str) -> WidgetRecord {
    WidgetRecord {
        meta: RecordMeta::new(uuid, Timestamp::UNIX_EPOCH),
        ownership: Ownership {
            tenant: TEST_TENANT_UUID,
            tenant_slug: TenantSlug::parse(TEST_TENANT_SLUG).ok(),
        },
        data: Widget {
            name: name.to_string(),
            description: None,
        },
    }
}

pub(crate) fn make_tenant(slug: &TenantSlug, is_active: bool) -> TenantRecord {
    TenantRecord {
        meta: RecordMeta::new(TenantUuid::new(), Timestamp::UNIX_EPOCH),
        slug: slug.clone(),
        name: slug.to_string(),
        is_active,
    }
}

/// A storage failure that must surface as a 500.
pub(crate) fn storage_failure() -> WidgetsServiceError {
    WidgetsServiceError::Store(StoreError::Encoding(serde::de::Error::custom(
        "storage offline",
    )))
}

/// Tenants mock that only allows lookups. Callers add the lookup expectations.
pub(crate) fn lookup_only_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_create_tenant().never();
    tenants.expect_list_tenants().never();
    tenants.expect_set_tenant_active().never();

    tenants
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = lookup_only_tenants_mock();

    tenants.expect_find_tenant_by_slug().never();

    tenants
}

pub(crate) fn state_with_tenants(tenants: MockTenantsService) -> Arc<State> {
    State::from_app_context(AppContext::new(
        Arc::new(tenants),
        Arc::new(MockWidgetsService::new()),
        Duration::ZERO,
    ))
}

pub(crate) fn state_with_widgets(widgets: MockWidgetsService) -> Arc<State> {
    State::from_app_context(AppContext::new(
        Arc::new(strict_tenants_mock()),
        Arc::new(widgets),
        Duration::ZERO,
    ))
}

pub(crate) fn widgets_service(widgets: MockWidgetsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_widgets(widgets)))
            .hoop(inject_tenant)
            .push(route),
    )
}
