//! Tenancy middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tessera::tenancy::resolve_tenant;
use tessera_app::tenancy::TenantValidationError;

use crate::{
    extensions::*,
    observability::{TenantAdmission, observe_tenant_admission, record_tenant},
    state::State,
    tenancy::{errors::into_status_error, source::RequestSource},
};

/// Pick the tenant slug out of the request. Never rejects.
#[salvo::handler]
pub(crate) async fn resolve(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(candidate) = resolve_tenant(&RequestSource(req)) {
        depot.insert_tenant_candidate(candidate);
    }

    ctrl.call_next(req, depot, res).await;
}

/// Refuse the request unless the resolved tenant exists and is active.
#[salvo::handler]
pub(crate) async fn require(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let candidate = depot.tenant_candidate().cloned();
    let source = candidate.as_ref().map(|candidate| candidate.source.as_str());

    match state.app.tenancy.validate(candidate.as_ref()).await {
        Ok(ctx) => {
            observe_tenant_admission(TenantAdmission::Admitted, source);
            record_tenant(ctx.slug().as_str());

            depot.insert_tenant_context(ctx);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            let outcome = match error {
                TenantValidationError::Required => TenantAdmission::Required,
                TenantValidationError::Denied => TenantAdmission::Denied,
                TenantValidationError::Lookup(_) => TenantAdmission::LookupFailed,
            };

            observe_tenant_admission(outcome, source);

            res.render(into_status_error(&error));
            ctrl.skip_rest();
        }
    }
}
