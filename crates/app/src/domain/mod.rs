//! Tessera Domain Concerns

pub mod tenants;
pub mod widgets;
