use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::middleware::ApiResult;
use crate::state::AppState;

/// OAuth2 password-grant style form
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /auth/token - exchange username and password for a bearer token
pub async fn token_post(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .users
        .authenticate(&form.username, &form.password)
        .ok_or_else(|| {
            tracing::warn!("Failed login for '{}'", form.username);
            ApiError::unauthorized("Incorrect username or password")
        })?;

    let claims = Claims::new(user, state.config.security.jwt_expiry_hours);
    let access_token = generate_jwt(&claims, &state.config.security)?;
    tracing::info!("Issued token for '{}'", user.username);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
