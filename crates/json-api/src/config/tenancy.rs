//! Tenancy Config

use std::time::Duration;

use clap::Args;

/// Tenant resolution settings.
#[derive(Debug, Args)]
pub struct TenancyConfig {
    /// Seconds a tenant lookup is reused; 0 disables caching
    #[arg(long, env = "TENANT_CACHE_TTL_SECONDS", default_value_t = 5_u64)]
    pub tenant_cache_ttl_seconds: u64,
}

impl TenancyConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tenant_cache_ttl_seconds)
    }
}
