use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub upstream: UpstreamConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding `realEstate` and `demographicData`
    pub data_path: PathBuf,
    /// JSON array of user accounts
    pub users_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the electricity usage service
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8001";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Development defaults pointed at explicit files, used by tests and tooling
    pub fn for_paths(data_path: impl Into<PathBuf>, users_path: impl Into<PathBuf>) -> Self {
        let mut config = Self::development();
        config.storage.data_path = data_path.into();
        config.storage.users_path = users_path.into();
        config
    }

    pub fn with_upstream(mut self, base_url: impl Into<String>) -> Self {
        self.upstream.base_url = base_url.into();
        self
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("REALESTATE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Storage overrides
        if let Ok(v) = env::var("DATA_PATH") {
            self.storage.data_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("USERS_PATH") {
            self.storage.users_path = PathBuf::from(v);
        }

        // Upstream overrides
        if let Ok(v) = env::var("LISTRIK_BASE_URL") {
            self.upstream.base_url = v;
        }
        if let Ok(v) = env::var("LISTRIK_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    /// Upstream base URL, checked for a usable scheme and host
    pub fn upstream_url(&self) -> Result<url::Url, url::ParseError> {
        let parsed = url::Url::parse(&self.upstream.base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(parsed)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 8000 },
            storage: StorageConfig {
                data_path: PathBuf::from("data/requirement.json"),
                users_path: PathBuf::from("data/users.json"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_UPSTREAM_URL.to_string(),
                timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 8000 },
            storage: StorageConfig {
                data_path: PathBuf::from("data/requirement.json"),
                users_path: PathBuf::from("data/users.json"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_UPSTREAM_URL.to_string(),
                timeout_secs: 15,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET; token issuance fails while empty
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 8000 },
            storage: StorageConfig {
                data_path: PathBuf::from("data/requirement.json"),
                users_path: PathBuf::from("data/users.json"),
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_UPSTREAM_URL.to_string(),
                timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_cors: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
