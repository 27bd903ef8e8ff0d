//! Tenant Data

use tessera::tenancy::{TenantSlug, TenantUuid};

/// New Tenant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    /// UUID to assign to the tenant row.
    pub uuid: TenantUuid,

    /// Unique slug to register.
    pub slug: TenantSlug,

    /// Tenant name to persist.
    pub name: String,
}
