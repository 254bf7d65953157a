//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOSANOGA_API_URL` - Base URL of the shop API (e.g., <https://shop.example>)
//!
//! ## Optional
//! - `BOSANOGA_CART_PATH` - Path of the persisted cart file
//!   (default: `.bosanoga-cart.json`)
//! - `BOSANOGA_HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds
//!   (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_CART_PATH: &str = ".bosanoga-cart.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the shop API.
    pub api_url: String,
    /// Where the cart collection is persisted between runs.
    pub cart_path: PathBuf,
    /// Timeout applied to every HTTP request.
    pub http_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("BOSANOGA_API_URL")?;
        let cart_path = PathBuf::from(get_env_or_default("BOSANOGA_CART_PATH", DEFAULT_CART_PATH));
        let http_timeout = Duration::from_secs(
            get_env_or_default(
                "BOSANOGA_HTTP_TIMEOUT_SECS",
                &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
            )
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BOSANOGA_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
        );

        Ok(Self {
            api_url,
            cart_path,
            http_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
