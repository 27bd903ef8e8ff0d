//! Tenancy

mod validator;

pub use validator::{DEFAULT_TENANT_CACHE_TTL, TenantValidationError, TenantValidator};
