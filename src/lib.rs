//! Tessera
//!
//! Tessera is the tenant isolation core of a multi-tenant service: typed identifiers, the
//! record model shared by every persisted object, and the request-side rules for deciding
//! which tenant a request belongs to.

pub mod prelude;
pub mod records;
pub mod tenancy;
pub mod uuids;
