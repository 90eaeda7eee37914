//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at process
//! start and passed explicitly to the components that need it.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the authentication API (no trailing slash)
    pub api_url: String,

    /// Deployment environment; `production` enables secure cookies
    pub environment: String,

    /// Transport timeout applied to every backend call
    pub backend_timeout_secs: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,

    /// Comma-separated CORS origins (Lambda deployments)
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("API_URL must not be empty"));
        }

        let config = Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "castrelay=debug".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok(),
        };

        Ok(config)
    }

    /// Whether the relay runs in production (controls the cookie `Secure` flag)
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            environment: "development".to_string(),
            backend_timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
            rust_log: "castrelay=debug".to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
        }
    }
}
