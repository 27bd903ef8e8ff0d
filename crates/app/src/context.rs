//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database::{self, Db, PoolSettings, RlsRoleError},
    domain::{
        tenants::{PgTenantsService, TenantsService},
        widgets::{StoreWidgetsService, WidgetsService},
    },
    store::PgStore,
    tenancy::{DEFAULT_TENANT_CACHE_TTL, TenantValidator},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role is not safe for tenant-scoped access")]
    UnsafeRole(#[source] RlsRoleError),
}

/// Tunables for [`AppContext::from_database_url`].
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub pool: PoolSettings,

    /// Zero disables the tenant lookup cache.
    pub tenant_cache_ttl: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            pool: PoolSettings::default(),
            tenant_cache_ttl: DEFAULT_TENANT_CACHE_TTL,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub tenancy: TenantValidator,
    pub widgets: Arc<dyn WidgetsService>,
}

impl AppContext {
    /// Wire services around an existing tenant service and widget service.
    #[must_use]
    pub fn new(
        tenants: Arc<dyn TenantsService>,
        widgets: Arc<dyn WidgetsService>,
        tenant_cache_ttl: Duration,
    ) -> Self {
        Self {
            tenancy: TenantValidator::new(tenants.clone(), tenant_cache_ttl),
            tenants,
            widgets,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when the
    /// connected role would bypass row-level security.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::UnsafeRole)?;

        let db = Db::new(pool.clone());

        Ok(Self::new(
            Arc::new(PgTenantsService::new(pool)),
            Arc::new(StoreWidgetsService::new(Arc::new(PgStore::new(db)))),
            settings.tenant_cache_ttl,
        ))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("tenancy", &self.tenancy)
            .finish_non_exhaustive()
    }
}
