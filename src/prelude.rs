//! Tessera prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    records::{
        Entity, InvalidEntity, Lifecycle, Ownership, Record, RecordMeta, ScopedRecord,
        TenantScoped,
    },
    tenancy::{
        SlugError, SlugSource, TenantCandidate, TenantContext, TenantRejection, TenantSlug,
        TenantSource, TenantStatus, TenantUuid, admit, resolve_tenant,
    },
    uuids::TypedUuid,
};
