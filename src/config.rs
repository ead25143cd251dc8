use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    /// Postgres schema to put on the search path
    pub schema: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

/// Which product rows make up the shoe catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_partner_id")]
    pub partner_id: i64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: i64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            partner_id: default_partner_id(),
            category: default_category(),
            min_quantity: default_min_quantity(),
        }
    }
}

fn default_partner_id() -> i64 { 306 }
fn default_category() -> String { "Apparel & Accessories > Shoes".to_string() }
fn default_min_quantity() -> i64 { 1 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl ScoringSettings {
    /// Validate the configured weights and rescale brand/color to sum to 1
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let WeightsConfig { brand, color, brand_only } = self.weights;

        if [brand, color, brand_only].iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Message(
                "scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if brand + color <= 0.0 {
            return Err(ConfigError::Message(
                "scoring.weights.brand and scoring.weights.color must not both be zero".to_string(),
            ));
        }
        if brand_only > 1.0 {
            return Err(ConfigError::Message(
                "scoring.weights.brand_only must be within 0.0..=1.0".to_string(),
            ));
        }

        let total = brand + color;
        Ok(ScoringWeights {
            brand: brand / total,
            color: color / total,
            brand_only,
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_brand_weight")]
    pub brand: f64,
    #[serde(default = "default_color_weight")]
    pub color: f64,
    #[serde(default = "default_brand_only_affinity")]
    pub brand_only: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            brand: default_brand_weight(),
            color: default_color_weight(),
            brand_only: default_brand_only_affinity(),
        }
    }
}

fn default_brand_weight() -> f64 { 0.6 }
fn default_color_weight() -> f64 { 0.4 }
fn default_brand_only_affinity() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 10 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` style overrides on top of the configured values
    pub fn with_env_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.filter(|f| !f.trim().is_empty()) {
            self.format = format;
        }
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SHOEMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SHOEMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SHOEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_database_url(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SHOEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// A plain DATABASE_URL takes precedence over the configured URL
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
