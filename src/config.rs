//! Configuration module
//!
//! Settings load from a TOML file (default `~/.config/agp-reserve/
//! config.toml`); every section falls back to defaults so the service
//! starts with an empty file. Secrets (database URL, gateway credentials)
//! may be overridden via environment variables so they stay out of the
//! config file on shared hosts.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub gateway: GatewayConfig,
    pub notifications: NotificationsConfig,
    pub cleanup: CleanupConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./reservations.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// Effective connection URL; `DATABASE_URL` wins over the file.
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// ToyyibPay-compatible payment gateway settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub secret_key: String,
    pub category_code: String,
    /// Customer-facing site, used for return/mock URLs
    pub frontend_url: String,
    /// This service's public base URL, used for the callback URL
    pub backend_url: String,
    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dev.toyyibpay.com".to_string(),
            secret_key: String::new(),
            category_code: String::new(),
            frontend_url: "http://localhost:3000".to_string(),
            backend_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
        }
    }
}

impl GatewayConfig {
    /// Apply environment overrides (`TOYYIBPAY_URL`, `TOYYIBPAY_SECRET_KEY`,
    /// `TOYYIBPAY_CATEGORY_CODE`, `FRONTEND_URL`, `BACKEND_URL`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("TOYYIBPAY_URL") {
            self.base_url = v;
        }
        if let Ok(v) = std::env::var("TOYYIBPAY_SECRET_KEY") {
            self.secret_key = v;
        }
        if let Ok(v) = std::env::var("TOYYIBPAY_CATEGORY_CODE") {
            self.category_code = v;
        }
        if let Ok(v) = std::env::var("FRONTEND_URL") {
            self.frontend_url = v;
        }
        if let Ok(v) = std::env::var("BACKEND_URL") {
            self.backend_url = v;
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Mail-relay webhook endpoint; unset disables dispatch
    pub webhook_url: Option<String>,
    /// Local hour (0-23) at which booking-day reminders fire
    pub reminder_hour: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            reminder_hour: 9,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Sweep interval in seconds
    pub interval_secs: u64,
    /// Age after which an unpaid PENDING order is deleted
    pub pending_ttl_minutes: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            pending_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }
}

/// Default config file location: `~/.config/agp-reserve/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agp-reserve")
        .join("config.toml")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.cleanup.pending_ttl_minutes, 60);
        assert_eq!(cfg.gateway.timeout_secs, 10);
        assert!(cfg.notifications.webhook_url.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [cleanup]
            pending_ttl_minutes = 30
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.cleanup.pending_ttl_minutes, 30);
        assert_eq!(cfg.cleanup.interval_secs, 3600);
    }
}
