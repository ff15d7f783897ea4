use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use rrbusiness_notification::EmailConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built front-end bundle served on every path the relay does not handle
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Let requests without an `Origin` header through (curl, health checks, server-to-server)
    #[serde(default = "default_allow_missing_origin")]
    pub allow_missing_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_missing_origin: default_allow_missing_origin(),
        }
    }
}

impl CorsConfig {
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed.trim_end_matches('/') == origin)
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://34.100.243.199".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_allow_missing_origin() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (RRBUSINESS__EMAIL__SMTP_HOST, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignore if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("RRBUSINESS")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        // Also support the variables the site has always been deployed with
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(user) = env::var("EMAIL_USER") {
            builder = builder.set_override("email.smtp_username", user)?;
        }
        if let Ok(pass) = env::var("EMAIL_PASS") {
            builder = builder.set_override("email.smtp_password", pass)?;
        }
        if let Ok(to) = env::var("TO_EMAIL") {
            builder = builder.set_override("email.contact_address", to)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.contact_address.trim().is_empty() {
            return Err("Email contact_address (TO_EMAIL) must be set".to_string());
        }
        if self.email.sender_address().trim().is_empty() {
            return Err("Email from_address or smtp_username (EMAIL_USER) must be set".to_string());
        }
        if self.email.send_timeout_secs == 0 {
            return Err("Email send_timeout_secs must be greater than 0".to_string());
        }
        if self.cors.allowed_origins.iter().any(|o| o == "*") {
            return Err(
                "CORS allowed_origins cannot contain '*', list the front-end origins explicitly"
                    .to_string(),
            );
        }
        Ok(())
    }
}
