use serde::{Deserialize, Serialize};

/// Account entry from the user directory file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Lowercase hex SHA-256 of the password
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Bearer credential presented to the electricity usage service
    #[serde(default)]
    pub token_teman: Option<String>,
}
