//! Configuration management for the `TravelGuide` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelGuideError;
use crate::models::CurrencyRateTable;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "TRAVELGUIDE_CONFIG";

/// Root configuration structure for the `TravelGuide` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelGuideConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Exchange rate table
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Static map previews
    #[serde(default)]
    pub maps: MapsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; without it every fetch falls back
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// PEM certificate chain; TLS is enabled when both paths are set
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint for traces and logs
    pub otlp_endpoint: Option<String>,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Number of destinations on the featured list
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    /// IANA timezone used for "now" in the heuristics
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Static exchange rates quoted against `base`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_base")]
    pub base: String,
    #[serde(default = "default_currency_rates")]
    pub rates: BTreeMap<String, f64>,
    /// When the table was last refreshed; load time if unset
    pub last_updated: Option<DateTime<Utc>>,
}

/// Static map image settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Maps Static API key; previews are omitted without it
    pub api_key: Option<String>,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_featured_count() -> usize {
    4
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_currency_base() -> String {
    "USD".to_string()
}

fn default_currency_rates() -> BTreeMap<String, f64> {
    [
        ("USD", 1.0),
        ("INR", 75.42),
        ("EUR", 0.85),
        ("GBP", 0.73),
        ("JPY", 110.21),
        ("AUD", 1.36),
        ("CAD", 1.25),
        ("SGD", 1.35),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_cert_path: None,
            tls_key_path: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
            timezone: default_timezone(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base: default_currency_base(),
            rates: default_currency_rates(),
            last_updated: None,
        }
    }
}

impl TravelGuideConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELGUIDE__WEATHER__API_KEY and friends
        builder = builder.add_source(
            Environment::with_prefix("TRAVELGUIDE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let mut config: TravelGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelguide").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.api_key.as_deref().is_some_and(str::is_empty) {
            self.weather.api_key = None;
        }
        if self.maps.api_key.as_deref().is_some_and(str::is_empty) {
            self.maps.api_key = None;
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.featured_count == 0 {
            self.defaults.featured_count = default_featured_count();
        }
        if self.defaults.timezone.is_empty() {
            self.defaults.timezone = default_timezone();
        }
        if self.currency.rates.is_empty() {
            self.currency.rates = default_currency_rates();
        }

        // Keys may arrive lowercased from the environment source
        self.currency.base = self.currency.base.trim().to_ascii_uppercase();
        self.currency.rates = std::mem::take(&mut self.currency.rates)
            .into_iter()
            .map(|(code, rate)| (code.trim().to_ascii_uppercase(), rate))
            .collect();
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_currency()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.len() < 8 {
                return Err(TravelGuideError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(TravelGuideError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                TravelGuideError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                TravelGuideError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.defaults.featured_count > 50 {
            return Err(TravelGuideError::config("Featured count cannot exceed 50").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(TravelGuideError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        self.timezone()?;

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(TravelGuideError::config(
                "TLS needs both tls_cert_path and tls_key_path",
            )
            .into());
        }

        Ok(())
    }

    fn validate_currency(&self) -> Result<()> {
        if let Some((code, rate)) = self
            .currency
            .rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(TravelGuideError::config(format!(
                "Exchange rate for {code} must be positive, got {rate}"
            ))
            .into());
        }

        if let Some(rate) = self.currency.rates.get(&self.currency.base) {
            if (*rate - 1.0).abs() > f64::EPSILON {
                return Err(TravelGuideError::config(format!(
                    "Base currency {} must have rate 1.0, got {rate}",
                    self.currency.base
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Configured timezone for local "now"
    pub fn timezone(&self) -> Result<Tz> {
        self.defaults
            .timezone
            .parse::<Tz>()
            .map_err(|_| {
                TravelGuideError::config(format!("Unknown timezone '{}'", self.defaults.timezone))
            })
            .context("Invalid defaults.timezone")
    }

    /// Rate table served by the currency endpoints
    #[must_use]
    pub fn rate_table(&self) -> CurrencyRateTable {
        CurrencyRateTable {
            base: self.currency.base.clone(),
            rates: self.currency.rates.clone(),
            last_updated: self.currency.last_updated.unwrap_or_else(Utc::now),
        }
    }
}
