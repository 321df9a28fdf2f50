// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `require_auth`, which injects `AuthUser`.
// Admin handlers additionally call `AuthUser::require_admin` before touching
// the store; friend handlers need the caller's electricity service credential.

pub mod admin;
pub mod auth;
pub mod friend;
