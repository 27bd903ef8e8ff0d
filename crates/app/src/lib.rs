//! Persistence, tenant administration and request tenancy for Tessera.
//!
//! Requests flow resolver → [`tenancy::TenantValidator`] → service → [`store`]. Every store
//! call carries the validated [`tessera::tenancy::TenantContext`].

pub mod context;
pub mod database;
pub mod domain;
pub mod store;
pub mod tenancy;

#[cfg(test)]
mod test;
