use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /auth/me - the authenticated caller, without the secondary credential
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "username": user.username,
        "is_admin": user.is_admin,
        "has_listrik_credential": user.token_teman.is_some(),
    }))
}
