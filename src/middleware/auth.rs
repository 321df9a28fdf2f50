use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::validate_jwt;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller resolved from the bearer token and the user directory
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
    pub token_teman: Option<String>,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            is_admin: user.is_admin,
            token_teman: user.token_teman.clone(),
        }
    }
}

impl AuthUser {
    /// Fail with 403 and `message` unless the caller is an admin
    pub fn require_admin(&self, message: &str) -> Result<(), ApiError> {
        if self.is_admin {
            return Ok(());
        }
        tracing::warn!("User '{}' denied admin operation: {}", self.username, message);
        Err(ApiError::forbidden(message))
    }

    /// Credential for the electricity service
    pub fn secondary_credential(&self) -> Result<&str, ApiError> {
        self.token_teman
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::forbidden("No electricity service credential for this account"))
    }
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(|msg| ApiError::unauthorized(msg))?;
    let claims = validate_jwt(&token, &state.config.security)?;

    // Role and secondary credential come from the directory, not the token
    let user = state.users.get(&claims.sub).ok_or_else(|| {
        tracing::warn!("Token subject '{}' is not in the user directory", claims.sub);
        ApiError::unauthorized("Could not validate credentials")
    })?;

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
