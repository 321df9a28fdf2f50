// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and read-only access to the two collections.

pub mod auth;
pub mod getters;
