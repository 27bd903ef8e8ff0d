//! Tenancy
//!
//! The request side of tenant isolation: slugs, resolving a slug from a request, and
//! turning a looked-up tenant into a [`TenantContext`].

mod admission;
mod context;
mod resolver;
mod slug;

pub use admission::{TenantRejection, TenantStatus, admit};
pub use context::{Tenant, TenantContext, TenantUuid};
pub use resolver::{
    SlugSource, TENANT_SLUG_HEADER, TENANT_SLUG_PATH_PARAM, TENANT_SLUG_QUERY_PARAM,
    TenantCandidate, TenantSource, resolve_tenant,
};
pub use slug::{MAX_SLUG_LEN, SlugError, TenantSlug};
