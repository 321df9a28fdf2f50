// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token, resolved to a directory user)
// Admin-only mutations live under protected and check `is_admin` per handler.
pub mod protected;
pub mod public;
