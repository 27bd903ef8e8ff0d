//! Tenants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use tessera::{
    records::RecordMeta,
    tenancy::{TenantSlug, TenantUuid},
};

use crate::domain::tenants::{data::NewTenant, records::TenantRecord};

const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const FIND_TENANT_BY_SLUG_SQL: &str = include_str!("sql/find_tenant_by_slug.sql");
const LIST_TENANTS_SQL: &str = include_str!("sql/list_tenants.sql");
const SET_TENANT_ACTIVE_SQL: &str = include_str!("sql/set_tenant_active.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed tenants repository.
pub(crate) struct PgTenantsRepository {
    pool: PgPool,
}

impl PgTenantsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_tenant(
        &self,
        tenant: NewTenant,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.uuid.into_uuid())
            .bind(tenant.slug.as_str())
            .bind(tenant.name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_tenant_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> Result<Option<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(FIND_TENANT_BY_SLUG_SQL)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_tenants(&self) -> Result<Vec<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LIST_TENANTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn set_tenant_active(
        &self,
        slug: &TenantSlug,
        is_active: bool,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(SET_TENANT_ACTIVE_SQL)
            .bind(slug.as_str())
            .bind(is_active)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let slug: String = row.try_get("slug")?;

        let slug = TenantSlug::parse(&slug).map_err(|e| sqlx::Error::ColumnDecode {
            index: "slug".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            meta: RecordMeta {
                uuid: TenantUuid::from_uuid(row.try_get("uuid")?),
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
                deleted_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                    .map(SqlxTimestamp::to_jiff),
            },
            slug,
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
