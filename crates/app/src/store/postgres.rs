//! PostgreSQL store.
//!
//! All entity types share the `tenant_records` table, partitioned by [`Entity::KIND`], with
//! the payload in a JSONB column. Statements run inside a tenant transaction so row-level
//! security applies, and they also filter on `tenant_uuid` themselves.

use std::marker::PhantomData;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use tessera::{
    records::{Entity, Ownership, RecordMeta, ScopedRecord},
    tenancy::{TenantContext, TenantSlug, TenantUuid},
    uuids::TypedUuid,
};
use uuid::Uuid;

use crate::{
    database::Db,
    store::{DeleteOutcome, Page, StoreError, TenantScopedStore},
};

const INSERT_RECORD_SQL: &str = include_str!("sql/insert_record.sql");
const FIND_RECORD_SQL: &str = include_str!("sql/find_record.sql");
const LOCK_RECORD_SQL: &str = include_str!("sql/lock_record.sql");
const LIST_RECORDS_SQL: &str = include_str!("sql/list_records.sql");
const UPDATE_RECORD_SQL: &str = include_str!("sql/update_record.sql");
const SOFT_DELETE_RECORD_SQL: &str = include_str!("sql/soft_delete_record.sql");
const RECORD_EXISTS_SQL: &str = include_str!("sql/record_exists.sql");

/// PostgreSQL-backed store for one entity type.
#[derive(Debug, Clone)]
pub struct PgStore<T> {
    db: Db,
    entity: PhantomData<fn() -> T>,
}

impl<T: Entity> PgStore<T> {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    async fn fetch_one_owned(
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<Option<ScopedRecord<T>>, StoreError> {
        query_as::<Postgres, RecordRow>(sql)
            .bind(uuid.into_uuid())
            .bind(ctx.tenant().into_uuid())
            .bind(T::KIND)
            .fetch_optional(&mut **tx)
            .await?
            .map(RecordRow::into_record)
            .transpose()
    }
}

#[async_trait]
impl<T: Entity> TenantScopedStore<T> for PgStore<T> {
    async fn find_by_id(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<Option<ScopedRecord<T>>, StoreError> {
        let mut tx = self.db.begin_tenant_transaction(ctx.tenant()).await?;

        let record = Self::fetch_one_owned(&mut tx, FIND_RECORD_SQL, ctx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn find_all_for_tenant(
        &self,
        ctx: &TenantContext,
        page: Page,
    ) -> Result<Vec<ScopedRecord<T>>, StoreError> {
        let mut tx = self.db.begin_tenant_transaction(ctx.tenant()).await?;

        let rows = query_as::<Postgres, RecordRow>(LIST_RECORDS_SQL)
            .bind(ctx.tenant().into_uuid())
            .bind(T::KIND)
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        rows.into_iter().map(RecordRow::into_record).collect()
    }

    async fn create(&self, ctx: &TenantContext, data: T) -> Result<ScopedRecord<T>, StoreError> {
        data.validate()?;

        let mut tx = self.db.begin_tenant_transaction(ctx.tenant()).await?;

        let row = query_as::<Postgres, RecordRow>(INSERT_RECORD_SQL)
            .bind(TypedUuid::<T>::new().into_uuid())
            .bind(ctx.tenant().into_uuid())
            .bind(ctx.slug().as_str())
            .bind(T::KIND)
            .bind(Json(&data))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        row.into_record()
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
        patch: T::Patch,
    ) -> Result<Option<ScopedRecord<T>>, StoreError> {
        let mut tx = self.db.begin_tenant_transaction(ctx.tenant()).await?;

        let Some(mut record) = Self::fetch_one_owned(&mut tx, LOCK_RECORD_SQL, ctx, uuid).await?
        else {
            return Ok(None);
        };

        record.data.apply(patch);
        record.data.validate()?;

        let row = query_as::<Postgres, RecordRow>(UPDATE_RECORD_SQL)
            .bind(uuid.into_uuid())
            .bind(ctx.tenant().into_uuid())
            .bind(T::KIND)
            .bind(Json(&record.data))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        row.map(RecordRow::into_record).transpose()
    }

    async fn soft_delete(
        &self,
        ctx: &TenantContext,
        uuid: TypedUuid<T>,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut tx = self.db.begin_tenant_transaction(ctx.tenant()).await?;

        let deleted = query(SOFT_DELETE_RECORD_SQL)
            .bind(uuid.into_uuid())
            .bind(ctx.tenant().into_uuid())
            .bind(T::KIND)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let outcome = if deleted > 0 {
            DeleteOutcome::Deleted
        } else {
            let exists: bool = query_scalar(RECORD_EXISTS_SQL)
                .bind(uuid.into_uuid())
                .bind(ctx.tenant().into_uuid())
                .bind(T::KIND)
                .fetch_one(&mut *tx)
                .await?;

            if exists {
                DeleteOutcome::AlreadyDeleted
            } else {
                DeleteOutcome::NotFound
            }
        };

        tx.commit().await?;

        Ok(outcome)
    }
}

#[derive(Debug)]
struct RecordRow {
    uuid: Uuid,
    tenant_uuid: Uuid,
    tenant_slug: Option<String>,
    data: Value,
    created_at: SqlxTimestamp,
    updated_at: SqlxTimestamp,
    deleted_at: Option<SqlxTimestamp>,
}

impl RecordRow {
    fn into_record<T: Entity>(self) -> Result<ScopedRecord<T>, StoreError> {
        Ok(ScopedRecord {
            meta: RecordMeta {
                uuid: TypedUuid::from_uuid(self.uuid),
                created_at: self.created_at.to_jiff(),
                updated_at: self.updated_at.to_jiff(),
                deleted_at: self.deleted_at.map(SqlxTimestamp::to_jiff),
            },
            ownership: Ownership {
                tenant: TenantUuid::from_uuid(self.tenant_uuid),
                tenant_slug: self
                    .tenant_slug
                    .and_then(|slug| TenantSlug::parse(&slug).ok()),
            },
            data: serde_json::from_value(self.data)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for RecordRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            tenant_uuid: row.try_get("tenant_uuid")?,
            tenant_slug: row.try_get("tenant_slug")?,
            data: row.try_get::<Json<Value>, _>("data")?.0,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::widgets::records::{Widget, WidgetPatch, WidgetUuid},
        test::TestContext,
    };

    use super::*;

    fn widget(name: &str) -> Widget {
        Widget {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();

        let created = store.create(&ctx.tenant, widget("Widget")).await?;
        let found = store.find_by_id(&ctx.tenant, created.meta.uuid).await?;

        assert_eq!(found, Some(created.clone()));
        assert_eq!(created.ownership.tenant, ctx.tenant.tenant());
        assert_eq!(created.ownership.tenant_slug.as_ref(), Some(ctx.tenant.slug()));
        assert_eq!(created.meta.created_at, created.meta.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn record_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();
        let other = ctx.create_tenant("other").await;

        let created = store.create(&ctx.tenant, widget("Widget")).await?;

        assert_eq!(store.find_by_id(&other, created.meta.uuid).await?, None);
        assert!(store.find_all_for_tenant(&other, Page::default()).await?.is_empty());
        assert_eq!(
            store.soft_delete(&other, created.meta.uuid).await?,
            DeleteOutcome::NotFound
        );

        let patch = WidgetPatch {
            name: Some("Hijacked".to_string()),
            description: None,
        };

        assert_eq!(store.update(&other, created.meta.uuid, patch).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();

        let created = store.create(&ctx.tenant, widget("Widget")).await?;

        let updated = store
            .update(
                &ctx.tenant,
                created.meta.uuid,
                WidgetPatch {
                    name: Some("Gadget".to_string()),
                    description: None,
                },
            )
            .await?
            .ok_or("widget should exist")?;

        assert_eq!(updated.data.name, "Gadget");
        assert_eq!(updated.meta.uuid, created.meta.uuid);
        assert_eq!(updated.meta.created_at, created.meta.created_at);
        assert_eq!(updated.ownership.tenant, created.ownership.tenant);
        assert!(updated.meta.updated_at >= created.meta.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_is_idempotent_and_hides_record() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();

        let kept = store.create(&ctx.tenant, widget("Kept")).await?;
        let doomed = store.create(&ctx.tenant, widget("Doomed")).await?;

        assert_eq!(
            store.soft_delete(&ctx.tenant, doomed.meta.uuid).await?,
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.soft_delete(&ctx.tenant, doomed.meta.uuid).await?,
            DeleteOutcome::AlreadyDeleted
        );

        let listed: Vec<WidgetUuid> = store
            .find_all_for_tenant(&ctx.tenant, Page::default())
            .await?
            .into_iter()
            .map(|record| record.meta.uuid)
            .collect();

        assert_eq!(listed, vec![kept.meta.uuid]);

        let stored: i64 = query_scalar("SELECT count(*) FROM tenant_records WHERE uuid = $1")
            .bind(doomed.meta.uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(stored, 1, "soft deleted rows stay in storage");

        Ok(())
    }

    #[tokio::test]
    async fn tenant_uuid_cannot_be_rewritten() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();
        let other = ctx.create_tenant("other").await;

        let created = store.create(&ctx.tenant, widget("Widget")).await?;

        let result = query("UPDATE tenant_records SET tenant_uuid = $1 WHERE uuid = $2")
            .bind(other.tenant().into_uuid())
            .bind(created.meta.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await;

        let error = StoreError::from(result.err().ok_or("update should fail")?);

        assert!(
            matches!(error, StoreError::InvalidData),
            "identity trigger should reject the change, got {error:?}"
        );

        assert_eq!(
            store.find_by_id(&ctx.tenant, created.meta.uuid).await?,
            Some(created)
        );

        Ok(())
    }

    #[tokio::test]
    async fn row_level_security_hides_other_tenants_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();
        let other = ctx.create_tenant("other").await;

        store.create(&ctx.tenant, widget("Widget")).await?;

        let mut tx = ctx.app_db.begin_tenant_transaction(other.tenant()).await?;

        let visible: i64 = query_scalar("SELECT count(*) FROM tenant_records")
            .fetch_one(&mut *tx)
            .await?;

        assert_eq!(visible, 0, "RLS should hide rows owned by another tenant");

        Ok(())
    }

    #[tokio::test]
    async fn find_all_is_paginated_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.widget_store();

        for name in ["one", "two", "three"] {
            store.create(&ctx.tenant, widget(name)).await?;
        }

        let names: Vec<String> = store
            .find_all_for_tenant(&ctx.tenant, Page::new(Some(2), Some(1)))
            .await?
            .into_iter()
            .map(|record| record.data.name)
            .collect();

        assert_eq!(names, vec!["two".to_string(), "three".to_string()]);

        Ok(())
    }
}
