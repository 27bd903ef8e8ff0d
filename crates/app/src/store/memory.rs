//! In-memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::RwLock;
use tessera::{
    records::{Entity, ScopedRecord, TenantScoped},
    tenancy::TenantContext,
    uuids::TypedUuid,
};
use uuid::Uuid;

use crate::store::{DeleteOutcome, Page, StoreError, TenantScopedStore};

/// Process-local store backed by an ordered map.
///
/// Keys are v7 UUIDs, so iteration order is creation order.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<BTreeMap<Uuid, ScopedRecord<T>>>,
}

impl<T> MemoryStore<T> {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored records, deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn visible<T>(record: &ScopedRecord<T>, ctx: &TenantContext) -> bool {
    record.is_owned_by(ctx) && !record.meta.is_deleted()
}

#[async_trait]
impl<T: Entity> TenantScopedStore<T> for MemoryStore<T> {
    async fn find_by_id(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<Option<ScopedRecord<T>>, StoreError> {
        Ok(self
            .records
            .read()
            .get(&uuid.into_uuid())
            .filter(|record| visible(record, ctx))
            .cloned())
    }

    async fn find_all_for_tenant(
        &self,
        ctx: &TenantContext,
        page: Page,
    ) -> Result<Vec<ScopedRecord<T>>, StoreError> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(self
            .records
            .read()
            .values()
            .filter(|record| visible(record, ctx))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn create(&self, ctx: &TenantContext, data: T) -> Result<ScopedRecord<T>, StoreError> {
        let record = ScopedRecord::create(ctx, data, Timestamp::now())?;
        let mut records = self.records.write();
        let key = record.meta.uuid.into_uuid();

        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }

        records.insert(key, record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
        patch: T::Patch,
    ) -> Result<Option<ScopedRecord<T>>, StoreError> {
        let mut records = self.records.write();

        let Some(record) = records
            .get_mut(&uuid.into_uuid())
            .filter(|record| visible(record, ctx))
        else {
            return Ok(None);
        };

        record.apply_patch(patch, Timestamp::now())?;

        Ok(Some(record.clone()))
    }

    async fn soft_delete(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut records = self.records.write();

        let Some(record) = records
            .get_mut(&uuid.into_uuid())
            .filter(|record| record.is_owned_by(ctx))
        else {
            return Ok(DeleteOutcome::NotFound);
        };

        if record.meta.mark_deleted(Timestamp::now()) {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::AlreadyDeleted)
        }
    }
}
