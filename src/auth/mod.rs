use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::models::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user.username.clone(),
            is_admin: user.is_admin,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Failed to read user directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed user directory: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Accounts loaded once from the user directory file
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.username.clone(), u)).collect(),
        }
    }

    /// A missing file yields an empty directory, so every login fails
    pub async fn load(path: &Path) -> Result<Self, AuthError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let users: Vec<User> = serde_json::from_slice(&bytes)?;
                tracing::info!("Loaded {} users from {}", users.len(), path.display());
                Ok(Self::new(users))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("User directory {} not found, no accounts available", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(AuthError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.get(username)
            .filter(|user| user.password_hash.eq_ignore_ascii_case(&hash_password(password)))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn user(name: &str, password: &str, is_admin: bool) -> User {
        User {
            username: name.to_string(),
            password_hash: hash_password(password),
            is_admin,
            token_teman: Some(format!("{name}-teman")),
        }
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn authenticate_checks_password() {
        let directory = UserDirectory::new(vec![user("admin", "pw", true)]);
        assert!(directory.authenticate("admin", "pw").is_some());
        assert!(directory.authenticate("admin", "wrong").is_none());
        assert!(directory.authenticate("nobody", "pw").is_none());
    }

    #[test]
    fn token_round_trip() {
        let security = AppConfig::for_paths("d.json", "u.json").security;
        let admin = user("admin", "pw", true);

        let token = generate_jwt(&Claims::new(&admin, 1), &security).unwrap();
        let claims = validate_jwt(&token, &security).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let mut security = AppConfig::for_paths("d.json", "u.json").security;
        let token = generate_jwt(&Claims::new(&user("a", "pw", false), 1), &security).unwrap();

        security.jwt_secret = "another-secret".to_string();
        assert!(matches!(validate_jwt(&token, &security), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let mut security = AppConfig::for_paths("d.json", "u.json").security;
        security.jwt_secret.clear();
        let result = generate_jwt(&Claims::new(&user("a", "pw", false), 1), &security);
        assert!(matches!(result, Err(AuthError::InvalidSecret)));
    }
}
