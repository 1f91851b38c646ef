use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::narration::ControllerOptions;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// When absent the service keeps stories in memory
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub story_cache_enabled: bool,
    pub narration: NarrationConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Narration tuning shared by every narration host
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NarrationConfig {
    pub max_chunk_len: usize,
    pub fallback_excerpt_len: usize,
    pub rate_change_delay_ms: u64,
    pub fallback_delay_ms: u64,
    pub espeak_binary: PathBuf,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        let options = ControllerOptions::default();
        Self {
            max_chunk_len: options.max_chunk_len,
            fallback_excerpt_len: options.fallback_excerpt_len,
            rate_change_delay_ms: options.rate_change_delay.as_millis() as u64,
            fallback_delay_ms: options.fallback_delay.as_millis() as u64,
            espeak_binary: PathBuf::from("espeak-ng"),
        }
    }
}

impl NarrationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            max_chunk_len: parse_var("NARRATION_MAX_CHUNK_LEN", defaults.max_chunk_len)?,
            fallback_excerpt_len: parse_var(
                "NARRATION_FALLBACK_EXCERPT_LEN",
                defaults.fallback_excerpt_len,
            )?,
            rate_change_delay_ms: parse_var(
                "NARRATION_RATE_CHANGE_DELAY_MS",
                defaults.rate_change_delay_ms,
            )?,
            fallback_delay_ms: parse_var("NARRATION_FALLBACK_DELAY_MS", defaults.fallback_delay_ms)?,
            espeak_binary: env::var("ESPEAK_BINARY")
                .map(PathBuf::from)
                .unwrap_or(defaults.espeak_binary),
        })
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            max_chunk_len: self.max_chunk_len,
            fallback_excerpt_len: self.fallback_excerpt_len,
            rate_change_delay: Duration::from_millis(self.rate_change_delay_ms),
            fallback_delay: Duration::from_millis(self.fallback_delay_ms),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            story_cache_enabled: env::var("STORY_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            narration: NarrationConfig::from_env()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
