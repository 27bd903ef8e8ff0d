//! Tenant Context

use crate::{tenancy::TenantSlug, uuids::TypedUuid};

/// Marker for tenant identifiers.
#[derive(Debug)]
pub struct Tenant;

/// Tenant UUID
pub type TenantUuid = TypedUuid<Tenant>;

/// A validated tenant scope.
///
/// Produced once per request by tenant validation and then passed explicitly to every
/// tenant-scoped operation. It is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantContext {
    tenant: TenantUuid,
    slug: TenantSlug,
}

impl TenantContext {
    /// Build a context for an already validated tenant.
    #[must_use]
    pub fn new(tenant: TenantUuid, slug: TenantSlug) -> Self {
        Self { tenant, slug }
    }

    /// Canonical tenant identifier, the only value used for authorization.
    #[must_use]
    pub fn tenant(&self) -> TenantUuid {
        self.tenant
    }

    /// Slug the tenant was addressed by.
    #[must_use]
    pub fn slug(&self) -> &TenantSlug {
        &self.slug
    }
}
