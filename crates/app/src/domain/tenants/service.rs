//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tessera::tenancy::TenantSlug;

use crate::domain::tenants::{
    data::NewTenant, errors::TenantsServiceError, records::TenantRecord,
    repository::PgTenantsRepository,
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgTenantsRepository::new(pool),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        if tenant.name.trim().is_empty() {
            return Err(TenantsServiceError::MissingRequiredData);
        }

        self.repository
            .create_tenant(tenant)
            .await
            .map_err(Into::into)
    }

    async fn find_tenant_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> Result<Option<TenantRecord>, TenantsServiceError> {
        self.repository
            .find_tenant_by_slug(slug)
            .await
            .map_err(Into::into)
    }

    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError> {
        self.repository.list_tenants().await.map_err(Into::into)
    }

    async fn set_tenant_active(
        &self,
        slug: &TenantSlug,
        is_active: bool,
    ) -> Result<TenantRecord, TenantsServiceError> {
        self.repository
            .set_tenant_active(slug, is_active)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Tenant administration and lookup.
pub trait TenantsService: Send + Sync {
    /// Creates a new, active tenant.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Looks a tenant up by slug. Unknown slugs are `Ok(None)`.
    async fn find_tenant_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> Result<Option<TenantRecord>, TenantsServiceError>;

    /// Lists all tenants, oldest first.
    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError>;

    /// Activates or deactivates a tenant.
    async fn set_tenant_active(
        &self,
        slug: &TenantSlug,
        is_active: bool,
    ) -> Result<TenantRecord, TenantsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;
    use tessera::tenancy::TenantUuid;

    use crate::test::TestContext;

    use super::*;

    fn new_tenant(slug: &str, name: &str) -> Result<NewTenant, tessera::tenancy::SlugError> {
        Ok(NewTenant {
            uuid: TenantUuid::new(),
            slug: TenantSlug::parse(slug)?,
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn create_tenant_returns_active_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let new = new_tenant("acme", "Acme Corp")?;
        let uuid = new.uuid;

        let tenant = svc.create_tenant(new).await?;

        assert_eq!(tenant.uuid(), uuid);
        assert_eq!(tenant.slug.as_str(), "acme");
        assert_eq!(tenant.name, "Acme Corp");
        assert!(tenant.is_active, "tenants start active");
        assert!(tenant.meta.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_tenant_timestamps_are_set() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let before = Timestamp::now();
        let tenant = svc
            .create_tenant(new_tenant("timestamps", "Timestamp Test")?)
            .await?;
        let after = Timestamp::now();

        assert!(tenant.meta.created_at >= before);
        assert!(tenant.meta.created_at <= after);
        assert_eq!(tenant.meta.created_at, tenant.meta.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_tenant_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        svc.create_tenant(new_tenant("dupe", "First")?).await?;

        let result = svc.create_tenant(new_tenant("dupe", "Second")?).await;

        assert!(
            matches!(result, Err(TenantsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_tenant_blank_name_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let result = svc.create_tenant(new_tenant("blank", "   ")?).await;

        assert!(
            matches!(result, Err(TenantsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_tenant_by_slug_returns_created_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let created = svc.create_tenant(new_tenant("findme", "Find Me")?).await?;
        let found = svc.find_tenant_by_slug(&created.slug).await?;

        assert_eq!(found, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn find_tenant_by_unknown_slug_returns_none() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let found = svc
            .find_tenant_by_slug(&TenantSlug::parse("nobody")?)
            .await?;

        assert!(found.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_tenant_reports_inactive_status() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let created = svc.create_tenant(new_tenant("sleepy", "Sleepy")?).await?;
        let updated = svc.set_tenant_active(&created.slug, false).await?;

        assert!(!updated.is_active);
        assert!(updated.meta.updated_at >= created.meta.updated_at);

        let found = svc.find_tenant_by_slug(&created.slug).await?;

        assert_eq!(found.map(|tenant| tenant.status().is_active), Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn set_tenant_active_unknown_slug_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let result = svc
            .set_tenant_active(&TenantSlug::parse("ghost")?, false)
            .await;

        assert!(
            matches!(result, Err(TenantsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_tenants_includes_every_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgTenantsService::new(ctx.db.pool().clone());

        let a = svc.create_tenant(new_tenant("tenant-a", "Tenant A")?).await?;
        let b = svc.create_tenant(new_tenant("tenant-b", "Tenant B")?).await?;

        let slugs: Vec<TenantSlug> = svc
            .list_tenants()
            .await?
            .into_iter()
            .map(|tenant| tenant.slug)
            .collect();

        assert!(slugs.contains(&a.slug), "tenant A should be listed");
        assert!(slugs.contains(&b.slug), "tenant B should be listed");

        Ok(())
    }
}
