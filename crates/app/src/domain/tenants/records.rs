//! Tenant Records

use tessera::{
    records::{Record, RecordMeta},
    tenancy::{Tenant, TenantSlug, TenantStatus, TenantUuid},
};

/// Tenant Record
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRecord {
    /// Identity and audit fields.
    pub meta: RecordMeta<Tenant>,

    /// Unique URL-safe alias.
    pub slug: TenantSlug,

    /// Human-readable tenant name.
    pub name: String,

    /// Inactive tenants are refused by tenant validation.
    pub is_active: bool,
}

impl TenantRecord {
    /// Unique tenant identifier.
    #[must_use]
    pub fn uuid(&self) -> TenantUuid {
        self.meta.uuid
    }

    /// What tenant admission needs to know about this tenant.
    #[must_use]
    pub fn status(&self) -> TenantStatus {
        TenantStatus {
            uuid: self.meta.uuid,
            slug: self.slug.clone(),
            is_active: self.is_active && !self.meta.is_deleted(),
        }
    }
}

impl Record for TenantRecord {
    type Kind = Tenant;

    fn meta(&self) -> &RecordMeta<Tenant> {
        &self.meta
    }
}
