//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tessera::tenancy::{TenantCandidate, TenantContext};

/// Typed access to what middleware leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_tenant_candidate(&mut self, candidate: TenantCandidate);

    fn tenant_candidate(&self) -> Option<&TenantCandidate>;

    fn insert_tenant_context(&mut self, ctx: TenantContext);

    /// The validated tenant. Handlers behind the tenancy hoops always have one, so a
    /// missing context is refused rather than treated as "no tenant".
    fn tenant_context_or_403(&self) -> Result<&TenantContext, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_tenant_candidate(&mut self, candidate: TenantCandidate) {
        self.inject(candidate);
    }

    fn tenant_candidate(&self) -> Option<&TenantCandidate> {
        self.obtain::<TenantCandidate>().ok()
    }

    fn insert_tenant_context(&mut self, ctx: TenantContext) {
        self.inject(ctx);
    }

    fn tenant_context_or_403(&self) -> Result<&TenantContext, StatusError> {
        self.obtain::<TenantContext>()
            .map_err(|_ignored| StatusError::forbidden().brief("Tenant required"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use tessera::tenancy::{SlugSource, TenantSlug, TenantUuid};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_tenant_context_is_forbidden() {
        let depot = Depot::new();

        let result = depot.tenant_context_or_403();

        assert_eq!(
            result.map_err(|error| error.code).err(),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn stored_tenant_context_is_returned() -> TestResult {
        let mut depot = Depot::new();
        let ctx = TenantContext::new(TenantUuid::new(), TenantSlug::parse("acme")?);

        depot.insert_tenant_context(ctx.clone());

        assert_eq!(depot.tenant_context_or_403()?, &ctx);

        Ok(())
    }

    #[test]
    fn tenant_candidate_round_trips_through_depot() {
        let mut depot = Depot::new();

        assert!(depot.tenant_candidate().is_none());

        depot.insert_tenant_candidate(TenantCandidate {
            source: SlugSource::Query,
            slug: "acme".to_string(),
        });

        assert_eq!(
            depot.tenant_candidate().map(|candidate| candidate.source),
            Some(SlugSource::Query)
        );
    }
}
