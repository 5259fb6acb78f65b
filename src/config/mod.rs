use std::env;
use std::fmt;

use crate::console::jobs::refresh::RefreshInterval;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the engine host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub console: ConsoleConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let refresh = match env::var("APP_REFRESH_SECS") {
            Err(_) => RefreshInterval::Manual,
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidRefreshInterval { value: raw.clone() })?;
                RefreshInterval::from_secs(secs)
                    .ok_or(ConfigError::InvalidRefreshInterval { value: raw })?
            }
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            console: ConsoleConfig { refresh },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings consumed by the job console itself.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub refresh: RefreshInterval,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRefreshInterval { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRefreshInterval { value } => {
                write!(
                    f,
                    "APP_REFRESH_SECS must be one of 0, 30, 60, or 300 (got '{}')",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
