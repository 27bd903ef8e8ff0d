//! Records
//!
//! Every persisted object embeds a [`RecordMeta`] for identity, audit timestamps and the
//! soft-delete marker. Objects owned by a tenant are stored as [`ScopedRecord`], which adds
//! an [`Ownership`] that is fixed when the record is created.
//!
//! Lifecycle: a record is created, is immediately [`Lifecycle::Active`], may be updated any
//! number of times, and ends [`Lifecycle::Deleted`]. Deletion is soft and there is no way
//! back.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    tenancy::{TenantContext, TenantSlug, TenantUuid},
    uuids::TypedUuid,
};

/// A payload rejected by [`Entity::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct InvalidEntity {
    /// Offending field.
    pub field: &'static str,

    /// Human-readable reason, safe to return to clients.
    pub reason: String,
}

impl InvalidEntity {
    /// Create a validation failure for `field`.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A concrete tenant-owned payload.
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Storage partition for this entity type.
    const KIND: &'static str;

    /// The mutable subset of the entity. Identity and ownership are not part of it.
    type Patch: Debug + Send + Sync + 'static;

    /// Merge a patch into the payload.
    fn apply(&mut self, patch: Self::Patch);

    /// Check payload invariants before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntity`] naming the first field that is not acceptable.
    fn validate(&self) -> Result<(), InvalidEntity> {
        Ok(())
    }
}

/// Visible state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Readable and writable.
    Active,

    /// Soft deleted; hidden from reads, still stored.
    Deleted,
}

/// Identity and audit fields shared by all records.
pub struct RecordMeta<T> {
    /// Identifier, assigned once.
    pub uuid: TypedUuid<T>,

    /// Creation time, never changed.
    pub created_at: Timestamp,

    /// Last mutation time, never earlier than `created_at`.
    pub updated_at: Timestamp,

    /// Soft-delete time.
    pub deleted_at: Option<Timestamp>,
}

impl<T> RecordMeta<T> {
    /// Metadata for a record created at `now`.
    #[must_use]
    pub fn new(uuid: TypedUuid<T>, now: Timestamp) -> Self {
        Self {
            uuid,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        if self.deleted_at.is_some() {
            Lifecycle::Deleted
        } else {
            Lifecycle::Active
        }
    }

    /// Whether the record has been soft deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.lifecycle() == Lifecycle::Deleted
    }

    /// Record a mutation at `now`. Clock skew never moves `updated_at` backwards.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }

    /// Soft delete at `now`. Returns `false` when already deleted, leaving it untouched.
    pub fn mark_deleted(&mut self, now: Timestamp) -> bool {
        if self.is_deleted() {
            return false;
        }

        self.touch(now);
        self.deleted_at = Some(self.updated_at);

        true
    }
}

impl<T> Clone for RecordMeta<T> {
    fn clone(&self) -> Self {
        Self {
            uuid: self.uuid,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

impl<T> Debug for RecordMeta<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RecordMeta")
            .field("uuid", &self.uuid)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

impl<T> PartialEq for RecordMeta<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
            && self.deleted_at == other.deleted_at
    }
}

impl<T> Eq for RecordMeta<T> {}

/// Which tenant owns a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    /// Owning tenant. Fixed for the lifetime of the record.
    pub tenant: TenantUuid,

    /// Slug the record was created under. Informational only.
    pub tenant_slug: Option<TenantSlug>,
}

impl Ownership {
    /// Ownership taken from a validated context.
    #[must_use]
    pub fn from_context(ctx: &TenantContext) -> Self {
        Self {
            tenant: ctx.tenant(),
            tenant_slug: Some(ctx.slug().clone()),
        }
    }
}

/// Anything carrying [`RecordMeta`].
pub trait Record {
    /// Type the record identifier is tagged with.
    type Kind;

    /// Identity and audit fields.
    fn meta(&self) -> &RecordMeta<Self::Kind>;

    /// Current lifecycle state.
    fn lifecycle(&self) -> Lifecycle {
        self.meta().lifecycle()
    }
}

/// A record that belongs to exactly one tenant.
pub trait TenantScoped: Record {
    /// Ownership fields.
    fn ownership(&self) -> &Ownership;

    /// Whether the record belongs to the context tenant.
    fn is_owned_by(&self, ctx: &TenantContext) -> bool {
        self.ownership().tenant == ctx.tenant()
    }
}

/// A stored tenant-owned entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedRecord<T> {
    /// Identity and audit fields.
    pub meta: RecordMeta<T>,

    /// Owning tenant.
    pub ownership: Ownership,

    /// Entity payload.
    pub data: T,
}

impl<T: Entity> ScopedRecord<T> {
    /// Build a new record owned by the context tenant.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntity`] when the payload fails validation.
    pub fn create(ctx: &TenantContext, data: T, now: Timestamp) -> Result<Self, InvalidEntity> {
        data.validate()?;

        Ok(Self {
            meta: RecordMeta::new(TypedUuid::new(), now),
            ownership: Ownership::from_context(ctx),
            data,
        })
    }

    /// Apply a patch and refresh `updated_at`. The record is unchanged if the patched
    /// payload is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntity`] when the patched payload fails validation.
    pub fn apply_patch(&mut self, patch: T::Patch, now: Timestamp) -> Result<(), InvalidEntity> {
        let mut data = self.data.clone();

        data.apply(patch);
        data.validate()?;

        self.data = data;
        self.meta.touch(now);

        Ok(())
    }
}

impl<T> Record for ScopedRecord<T> {
    type Kind = T;

    fn meta(&self) -> &RecordMeta<T> {
        &self.meta
    }
}

impl<T> TenantScoped for ScopedRecord<T> {
    fn ownership(&self) -> &Ownership {
        &self.ownership
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use serde::{Deserialize, Serialize};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        body: String,
    }

    impl Entity for Note {
        const KIND: &'static str = "note";

        type Patch = String;

        fn apply(&mut self, patch: String) {
            self.body = patch;
        }

        fn validate(&self) -> Result<(), InvalidEntity> {
            if self.body.is_empty() {
                return Err(InvalidEntity::new("body", "cannot be empty"));
            }

            Ok(())
        }
    }

    fn ctx() -> Result<TenantContext, crate::tenancy::SlugError> {
        Ok(TenantContext::new(
            TenantUuid::new(),
            TenantSlug::parse("acme")?,
        ))
    }

    fn note(body: &str) -> Note {
        Note {
            body: body.to_owned(),
        }
    }

    #[test]
    fn create_sets_ownership_and_equal_timestamps() -> TestResult {
        let ctx = ctx()?;
        let now = Timestamp::now();
        let record = ScopedRecord::create(&ctx, note("hi"), now)?;

        assert_eq!(record.ownership.tenant, ctx.tenant());
        assert_eq!(record.ownership.tenant_slug.as_ref(), Some(ctx.slug()));
        assert_eq!(record.meta.created_at, now);
        assert_eq!(record.meta.updated_at, now);
        assert_eq!(record.lifecycle(), Lifecycle::Active);
        assert!(record.is_owned_by(&ctx), "creator should own the record");

        Ok(())
    }

    #[test]
    fn create_rejects_invalid_payload() -> TestResult {
        let result = ScopedRecord::create(&ctx()?, note(""), Timestamp::now());

        assert_eq!(
            result.map(|_| ()),
            Err(InvalidEntity::new("body", "cannot be empty"))
        );

        Ok(())
    }

    #[test]
    fn patch_refreshes_updated_at_but_never_goes_backwards() -> TestResult {
        let now = Timestamp::now();
        let mut record = ScopedRecord::create(&ctx()?, note("a"), now)?;

        record.apply_patch("b".to_owned(), now - SignedDuration::from_secs(60))?;

        assert_eq!(record.data.body, "b");
        assert_eq!(record.meta.updated_at, now);

        let later = now + SignedDuration::from_secs(5);

        record.apply_patch("c".to_owned(), later)?;

        assert_eq!(record.meta.updated_at, later);
        assert_eq!(record.meta.created_at, now);

        Ok(())
    }

    #[test]
    fn invalid_patch_leaves_record_untouched() -> TestResult {
        let now = Timestamp::now();
        let mut record = ScopedRecord::create(&ctx()?, note("a"), now)?;
        let before = record.clone();

        let result = record.apply_patch(String::new(), now + SignedDuration::from_secs(1));

        assert!(result.is_err(), "empty body should be rejected");
        assert_eq!(record, before);

        Ok(())
    }

    #[test]
    fn mark_deleted_is_idempotent() -> TestResult {
        let now = Timestamp::now();
        let mut record = ScopedRecord::create(&ctx()?, note("a"), now)?;

        assert!(record.meta.mark_deleted(now + SignedDuration::from_secs(1)));

        let deleted_at = record.meta.deleted_at;

        assert!(!record.meta.mark_deleted(now + SignedDuration::from_secs(2)));
        assert_eq!(record.meta.deleted_at, deleted_at);
        assert_eq!(record.lifecycle(), Lifecycle::Deleted);

        Ok(())
    }

    #[test]
    fn other_tenant_does_not_own_record() -> TestResult {
        let record = ScopedRecord::create(&ctx()?, note("a"), Timestamp::now())?;

        assert!(!record.is_owned_by(&ctx()?), "fresh tenant uuid should not match");

        Ok(())
    }
}
