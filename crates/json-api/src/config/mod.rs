//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    tenancy::TenancyConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod tenancy;

/// Tessera JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tessera-json", about = "Tessera JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Tenant resolution settings.
    #[command(flatten)]
    pub tenancy: TenancyConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_settings(&self) -> tessera_app::context::AppSettings {
        tessera_app::context::AppSettings {
            pool: self.database.pool_settings(),
            tenant_cache_ttl: self.tenancy.cache_ttl(),
        }
    }
}
