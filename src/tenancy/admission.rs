//! Tenant Admission

use thiserror::Error;

use crate::tenancy::{TenantContext, TenantSlug, TenantUuid};

/// What a tenant lookup found, reduced to what admission needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantStatus {
    /// Canonical tenant identifier.
    pub uuid: TenantUuid,

    /// Tenant slug as stored.
    pub slug: TenantSlug,

    /// Whether the tenant may currently be accessed.
    pub is_active: bool,
}

/// Why a tenant was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TenantRejection {
    /// The route needs a tenant and none was supplied.
    #[error("tenant required")]
    Required,

    /// The tenant is unknown, malformed or inactive. Deliberately one variant so callers
    /// cannot tell which.
    #[error("tenant access denied")]
    Denied,
}

/// Decide whether a looked-up tenant may be used.
///
/// # Errors
///
/// Returns [`TenantRejection::Denied`] when nothing was found or the tenant is inactive.
pub fn admit(status: Option<TenantStatus>) -> Result<TenantContext, TenantRejection> {
    match status {
        Some(TenantStatus {
            uuid,
            slug,
            is_active: true,
        }) => Ok(TenantContext::new(uuid, slug)),
        Some(_) | None => Err(TenantRejection::Denied),
    }
}
