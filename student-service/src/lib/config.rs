use std::env;
use std::fmt;

use auth::TokenConfig;
use auth::TokenConfigError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for student-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// JWT signing configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_seconds: i64,
}

impl JwtConfig {
    /// Validated token settings for the authenticator.
    ///
    /// # Errors
    /// * `EmptySigningKey` - Secret is empty
    /// * `NonPositiveTtl` - Expiration is zero or negative
    pub fn token_config(&self) -> Result<TokenConfig, TokenConfigError> {
        TokenConfig::new(
            self.secret.as_bytes().to_vec(),
            chrono::Duration::seconds(self.expiration_seconds),
        )
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

/// Admin account created or refreshed at startup.
///
/// A blank password disables the bootstrap.
#[derive(Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "AdminConfig::default_username")]
    pub username: String,
    #[serde(default = "AdminConfig::default_password")]
    pub password: String,
}

impl AdminConfig {
    fn default_username() -> String {
        "admin".to_string()
    }

    fn default_password() -> String {
        "admin123".to_string()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: Self::default_username(),
            password: Self::default_password(),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns `ConfigError` if a required value is missing or malformed
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
