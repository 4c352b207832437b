//! Configuration management for MiniMate
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `MINIMATE__SECTION__KEY` environment variables. The merged result is
//! validated before use.

use crate::MiniMateError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiniMateConfig {
    /// Weather and geocoding API settings
    pub weather: WeatherConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Weather and geocoding API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the Open-Meteo forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Base URL of the Open-Meteo geocoding API
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Base URL of the Nominatim reverse geocoding API
    #[serde(default = "default_reverse_geocoding_url")]
    pub reverse_geocoding_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures, 0 leaves retrying to the user
    #[serde(default)]
    pub max_retries: u32,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request budget for the reverse geocoding API
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of cached weather responses in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
    /// Directory holding the cache and profile database
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Language used when no profile exists yet
    #[serde(default = "default_language")]
    pub language: String,
    /// Maximum number of location search results
    #[serde(default = "default_search_results")]
    pub search_results: u32,
    /// Number of hours shown by the hourly forecast
    #[serde(default = "default_hourly_hours")]
    pub hourly_hours: u32,
    /// Quiet period before an interactive search is sent
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_reverse_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    "MiniMate/1.0".to_string()
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_cache_ttl() -> u32 {
    15
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("minimate").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.cache/minimate".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_language() -> String {
    "de".to_string()
}

fn default_search_results() -> u32 {
    10
}

fn default_hourly_hours() -> u32 {
    24
}

fn default_search_debounce() -> u64 {
    300
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            reverse_geocoding_url: default_reverse_geocoding_url(),
            timeout_seconds: default_timeout(),
            max_retries: 0,
            user_agent: default_user_agent(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            search_results: default_search_results(),
            hourly_hours: default_hourly_hours(),
            search_debounce_ms: default_search_debounce(),
        }
    }
}

impl CacheConfig {
    /// Cache directory with a leading `~/` expanded to the home directory
    #[must_use]
    pub fn path(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.location)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl MiniMateConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given file, or the default location
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            tracing::debug!("Loading configuration from {}", config_file.display());
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("MINIMATE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: MiniMateConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("minimate").join("config.toml"))
    }

    /// Replace empty or zero values with their defaults
    pub fn apply_defaults(&mut self) {
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.reverse_geocoding_url.is_empty() {
            self.weather.reverse_geocoding_url = default_reverse_geocoding_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.weather.user_agent.is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.weather.requests_per_minute == 0 {
            self.weather.requests_per_minute = default_requests_per_minute();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.language.is_empty() {
            self.defaults.language = default_language();
        }
        if self.defaults.search_results == 0 {
            self.defaults.search_results = default_search_results();
        }
        if self.defaults.hourly_hours == 0 {
            self.defaults.hourly_hours = default_hourly_hours();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(MiniMateError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        if self.weather.max_retries > 10 {
            return Err(MiniMateError::config("Weather API max retries cannot exceed 10").into());
        }

        // Nominatim usage policy allows one request per second
        if self.weather.requests_per_minute > 60 {
            return Err(MiniMateError::config(
                "Reverse geocoding cannot exceed 60 requests per minute",
            )
            .into());
        }

        if self.cache.ttl_minutes > 1440 {
            return Err(MiniMateError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into());
        }

        if self.defaults.search_results > 100 {
            return Err(MiniMateError::config("Search results cannot exceed 100").into());
        }

        if self.defaults.hourly_hours > 48 {
            return Err(MiniMateError::config(
                "Hourly forecast cannot exceed 48 hours",
            )
            .into());
        }

        if self.defaults.search_debounce_ms > 5000 {
            return Err(MiniMateError::config("Search debounce cannot exceed 5000 ms").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MiniMateError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MiniMateError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("forecast", &self.weather.forecast_url),
            ("geocoding", &self.weather.geocoding_url),
            ("reverse geocoding", &self.weather.reverse_geocoding_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MiniMateError::config(format!(
                    "The {name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if !self
            .defaults
            .language
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '_')
        {
            return Err(MiniMateError::config(format!(
                "Invalid default language '{}'",
                self.defaults.language
            ))
            .into());
        }

        Ok(())
    }

    /// Create the cache directory if it doesn't exist
    pub fn ensure_cache_dir(&self) -> Result<PathBuf> {
        let dir = self.cache.path();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory: {}", dir.display()))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MiniMateConfig::default();
        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.weather.max_retries, 0);
        assert_eq!(config.cache.ttl_minutes, 15);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.language, "de");
        assert_eq!(config.defaults.search_debounce_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = MiniMateConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = MiniMateConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = MiniMateConfig::default();
        config.weather.requests_per_minute = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = MiniMateConfig::default();
        config.weather.geocoding_url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("geocoding"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = MiniMateConfig::default();
        config.weather.forecast_url.clear();
        config.weather.timeout_seconds = 0;
        config.defaults.language.clear();
        config.apply_defaults();
        assert_eq!(config.weather.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.defaults.language, "de");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[weather]\nmax_retries = 2\n\n[cache]\nttl_minutes = 30\n\n[defaults]\nlanguage = \"en\""
        )
        .unwrap();

        let config = MiniMateConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.max_retries, 2);
        assert_eq!(config.cache.ttl_minutes, 30);
        assert_eq!(config.defaults.language, "en");
        // Untouched sections keep their defaults
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.weather.user_agent, "MiniMate/1.0");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();
        let result = MiniMateConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_cache_path_expands_home() {
        let cache = CacheConfig {
            ttl_minutes: 15,
            location: "~/.cache/minimate".to_string(),
        };
        let path = cache.path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".cache/minimate"));

        let cache = CacheConfig {
            ttl_minutes: 15,
            location: "/tmp/minimate".to_string(),
        };
        assert_eq!(cache.path(), PathBuf::from("/tmp/minimate"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = MiniMateConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("minimate"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
