//! Tenant-Scoped Store
//!
//! Generic create/read/update/delete for tenant-owned entities. Every operation takes the
//! validated [`TenantContext`] and only ever sees records owned by that tenant. Records that
//! are missing and records owned by someone else look exactly the same: `None` or
//! [`DeleteOutcome::NotFound`].

mod errors;
mod memory;
mod page;
mod postgres;

use async_trait::async_trait;
use tessera::{
    records::{Entity, ScopedRecord},
    tenancy::TenantContext,
    uuids::TypedUuid,
};

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use page::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page};
pub use postgres::PgStore;

/// Result of a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was live and is now deleted.
    Deleted,

    /// The record was already deleted; nothing changed.
    AlreadyDeleted,

    /// No record with that id is owned by the tenant.
    NotFound,
}

impl DeleteOutcome {
    /// Whether the tenant owns the record, deleted or not.
    #[must_use]
    pub const fn is_found(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Persistence for one entity type, always conditioned on the tenant.
#[async_trait]
pub trait TenantScopedStore<T: Entity>: Send + Sync {
    /// Fetch a live record owned by the tenant.
    async fn find_by_id(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<Option<ScopedRecord<T>>, StoreError>;

    /// Live records owned by the tenant, oldest first.
    async fn find_all_for_tenant(
        &self,
        ctx: &TenantContext,
        page: Page,
    ) -> Result<Vec<ScopedRecord<T>>, StoreError>;

    /// Store a new record. Ownership always comes from `ctx`.
    async fn create(&self, ctx: &TenantContext, data: T) -> Result<ScopedRecord<T>, StoreError>;

    /// Apply a patch to a live record owned by the tenant.
    async fn update(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
        patch: T::Patch,
    ) -> Result<Option<ScopedRecord<T>>, StoreError>;

    /// Soft delete a record owned by the tenant. Repeating the call is harmless.
    async fn soft_delete(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<DeleteOutcome, StoreError>;
}
