//! Tenancy
//!
//! Two hoops run in front of every tenant-scoped route: [`resolve`] picks the candidate
//! slug out of the request, and [`require`] validates it and stores the resulting
//! [`TenantContext`](tessera::tenancy::TenantContext) in the depot.

mod errors;
mod middleware;
mod source;

pub(crate) use middleware::{require, resolve};
