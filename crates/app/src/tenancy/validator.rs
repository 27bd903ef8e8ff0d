//! Tenant Validator
//!
//! Turns a resolved [`TenantCandidate`] into a [`TenantContext`], or refuses it. Unknown,
//! malformed and inactive tenants are all refused the same way.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use moka::future::Cache;
use tessera::tenancy::{
    TenantCandidate, TenantContext, TenantRejection, TenantSlug, TenantStatus, admit,
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::tenants::{TenantsService, TenantsServiceError};

/// How long a looked-up tenant is reused before it is read again.
pub const DEFAULT_TENANT_CACHE_TTL: Duration = Duration::from_secs(5);

const TENANT_CACHE_CAPACITY: u64 = 10_000;

/// Why a request was not given a tenant context.
#[derive(Debug, Error)]
pub enum TenantValidationError {
    /// No tenant slug anywhere in the request.
    #[error("tenant required")]
    Required,

    /// Unknown, malformed or inactive tenant.
    #[error("tenant access denied")]
    Denied,

    /// The tenant could not be looked up.
    #[error("tenant lookup failed")]
    Lookup(#[source] TenantsServiceError),
}

impl From<TenantRejection> for TenantValidationError {
    fn from(rejection: TenantRejection) -> Self {
        match rejection {
            TenantRejection::Required => Self::Required,
            TenantRejection::Denied => Self::Denied,
        }
    }
}

/// Checks that a requested tenant exists and is active.
#[derive(Clone)]
pub struct TenantValidator {
    tenants: Arc<dyn TenantsService>,
    cache: Option<Cache<TenantSlug, TenantStatus>>,
}

impl TenantValidator {
    /// A validator that reuses lookups for `cache_ttl`. A zero TTL disables caching.
    #[must_use]
    pub fn new(tenants: Arc<dyn TenantsService>, cache_ttl: Duration) -> Self {
        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(TENANT_CACHE_CAPACITY)
                .time_to_live(cache_ttl)
                .build()
        });

        Self { tenants, cache }
    }

    /// A validator that reads the tenant on every call.
    #[must_use]
    pub fn uncached(tenants: Arc<dyn TenantsService>) -> Self {
        Self::new(tenants, Duration::ZERO)
    }

    /// Validate the tenant a request asked for.
    ///
    /// # Errors
    ///
    /// - [`TenantValidationError::Required`] when there is no candidate.
    /// - [`TenantValidationError::Denied`] when the slug is malformed, unknown or inactive.
    /// - [`TenantValidationError::Lookup`] when the tenant store fails.
    pub async fn validate(
        &self,
        candidate: Option<&TenantCandidate>,
    ) -> Result<TenantContext, TenantValidationError> {
        let Some(candidate) = candidate else {
            warn!("tenant required but none supplied");

            return Err(TenantValidationError::Required);
        };

        let slug = match TenantSlug::parse(&candidate.slug) {
            Ok(slug) => slug,
            Err(reason) => {
                warn!(
                    tenant_slug = %candidate.slug,
                    slug_source = %candidate.source,
                    %reason,
                    "tenant denied: malformed slug"
                );

                return Err(TenantValidationError::Denied);
            }
        };

        let status = self.lookup(&slug).await.map_err(|source| {
            error!(
                tenant_slug = %slug,
                slug_source = %candidate.source,
                error = %source,
                "tenant lookup failed"
            );

            TenantValidationError::Lookup(source)
        })?;

        let found = status.is_some();

        admit(status).map_err(|rejection| {
            warn!(
                tenant_slug = %slug,
                slug_source = %candidate.source,
                found,
                "tenant denied: {rejection}"
            );

            rejection.into()
        })
    }

    async fn lookup(&self, slug: &TenantSlug) -> Result<Option<TenantStatus>, TenantsServiceError> {
        if let Some(status) = self.cached(slug).await {
            debug!(tenant_slug = %slug, "tenant cache hit");

            return Ok(Some(status));
        }

        let status = self
            .tenants
            .find_tenant_by_slug(slug)
            .await?
            .map(|tenant| tenant.status());

        if let (Some(cache), Some(status)) = (&self.cache, &status) {
            cache.insert(slug.clone(), status.clone()).await;
        }

        Ok(status)
    }

    async fn cached(&self, slug: &TenantSlug) -> Option<TenantStatus> {
        match &self.cache {
            Some(cache) => cache.get(slug).await,
            None => None,
        }
    }
}

impl Debug for TenantValidator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TenantValidator")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
