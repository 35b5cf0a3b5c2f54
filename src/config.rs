//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/transit-service/config.toml`).
//! Missing sections and keys fall back to defaults; a missing file is
//! created with the default configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config value {key} = {value}")]
    Invalid { key: &'static str, value: i64 },
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub mail: MailConfig,
    pub prediction: PredictionConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Full connection URL. Takes precedence over `DATABASE_URL`.
    pub url: Option<String>,
    /// SQLite file used when no URL is configured
    pub sqlite_path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            sqlite_path: "./transit.db".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_ref().filter(|u| !u.is_empty()) {
            return url.clone();
        }
        std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite://{}?mode=rwc", self.sqlite_path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub otp_ttl_minutes: i64,
    pub reset_token_ttl_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
            otp_ttl_minutes: 5,
            reset_token_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `imas_transit=debug,tower_http=info`
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

/// Bootstrap administrator created on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@imas.local".to_string(),
            password: "admin12345".to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub enabled: bool,
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from: "no-reply@imas.local".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000/predict".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub traffic_cleanup_interval_secs: u64,
    pub traffic_retention_days: i64,
    pub cache_cleanup_interval_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            traffic_cleanup_interval_secs: 86_400,
            traffic_retention_days: 30,
            cache_cleanup_interval_secs: 900,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, writing defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Every lifetime and retention setting must be positive and fit a
    /// `chrono::Duration`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (
                "security.jwt_expiration_hours",
                self.security.jwt_expiration_hours,
                Duration::try_hours(self.security.jwt_expiration_hours),
            ),
            (
                "security.otp_ttl_minutes",
                self.security.otp_ttl_minutes,
                Duration::try_minutes(self.security.otp_ttl_minutes),
            ),
            (
                "security.reset_token_ttl_minutes",
                self.security.reset_token_ttl_minutes,
                Duration::try_minutes(self.security.reset_token_ttl_minutes),
            ),
            (
                "jobs.traffic_retention_days",
                self.jobs.traffic_retention_days,
                Duration::try_days(self.jobs.traffic_retention_days),
            ),
        ];
        for (key, value, duration) in checks {
            if value <= 0 || duration.is_none() {
                return Err(ConfigError::Invalid { key, value });
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// `~/.config/transit-service/config.toml`, or `./config.toml` when no
/// config directory is available.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("transit-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let raw = r#"
            [server]
            api_port = 9090

            [logging]
            format = "json"
        "#;
        let cfg: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.security.otp_ttl_minutes, 5);
        assert_eq!(cfg.prediction.url, "http://localhost:5000/predict");
    }

    #[test]
    fn oversized_lifetimes_are_rejected() {
        assert!(AppConfig::default().validate().is_ok());

        let raw = r#"
            [security]
            jwt_expiration_hours = 9223372036854775807
        "#;
        let cfg: AppConfig = toml::from_str(raw).unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "security.jwt_expiration_hours", .. }
        ));

        let mut cfg = AppConfig::default();
        cfg.jobs.traffic_retention_days = 0;
        assert!(cfg.validate().is_err());
        cfg.jobs.traffic_retention_days = 30;
        cfg.security.otp_ttl_minutes = i64::MAX;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn explicit_database_url_wins() {
        let settings = DatabaseSettings {
            url: Some("sqlite::memory:".into()),
            ..Default::default()
        };
        assert_eq!(settings.connection_url(), "sqlite::memory:");
    }

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = std::env::temp_dir().join(format!("transit-cfg-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let cfg = AppConfig::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.server.api_port, 8080);

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded.admin.email, cfg.admin.email);

        let _ = std::fs::remove_dir_all(dir);
    }
}
