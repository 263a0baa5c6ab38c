//! Configuration System
//!
//! File-plus-environment configuration for the easel CLI. An optional
//! `easel.toml` is merged with `EASEL__`-prefixed environment overrides and
//! validated before any generation work starts.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "easel.toml";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EaselConfig {
    /// Root directory for generated assets, one subdirectory per zone
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// Optional catalog file replacing the built-in zone catalog
    #[serde(default)]
    pub catalog_file: Option<PathBuf>,

    /// Generation service settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("public/assets")
}

impl Default for EaselConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            catalog_file: None,
            generation: GenerationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of generation requests in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Generation service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model selection per asset kind
    #[serde(default)]
    pub models: ModelsConfig,
}

fn default_concurrency() -> usize {
    crate::runner::TaskRunner::DEFAULT_CONCURRENCY
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            models: ModelsConfig::default(),
        }
    }
}

/// Model names per asset kind. Scene and background panels go through the
/// Imagen predict API; style transfer needs a Gemini model that accepts an
/// inline reference image, tried in order until one returns an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_scene_model")]
    pub scene: String,

    #[serde(default = "default_background_model")]
    pub background: String,

    #[serde(default = "default_scene_model")]
    pub sprite: String,

    #[serde(default = "default_style_transfer_models")]
    pub style_transfer: Vec<String>,
}

fn default_scene_model() -> String {
    "imagen-4.0-ultra-generate-001".to_string()
}

fn default_background_model() -> String {
    "imagen-4.0-generate-001".to_string()
}

fn default_style_transfer_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash-image".to_string(),
        "gemini-2.0-flash-preview-image-generation".to_string(),
        "gemini-2.0-flash-exp".to_string(),
    ]
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            scene: default_scene_model(),
            background: default_background_model(),
            sprite: default_scene_model(),
            style_transfer: default_style_transfer_models(),
        }
    }
}

impl EaselConfig {
    /// Validate configuration values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "generation.concurrency must be at least 1".to_string(),
            ));
        }
        if self.generation.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "generation.api_key_env must not be empty".to_string(),
            ));
        }
        if self.generation.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "generation.endpoint must not be empty".to_string(),
            ));
        }
        if self.generation.models.style_transfer.is_empty() {
            return Err(ConfigError::InvalidValue(
                "generation.models.style_transfer must list at least one model".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the API key from the configured environment variable.
    /// Absence is a pre-flight failure, reported before any task runs.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.generation.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey(
                self.generation.api_key_env.clone(),
            )),
        }
    }
}

/// Configuration loader: optional TOML file plus environment overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the default `easel.toml` in `dir` when present, otherwise
    /// defaults. Environment overrides apply either way.
    pub fn load(dir: &Path) -> Result<EaselConfig, ConfigError> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        let mut builder = config::Config::builder();
        if candidate.is_file() {
            builder = builder.add_source(config::File::from(candidate));
        }
        Self::finish(builder)
    }

    /// Load from an explicit config file path. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<EaselConfig, ConfigError> {
        let builder =
            config::Config::builder().add_source(config::File::from(path.to_path_buf()));
        Self::finish(builder)
    }

    fn finish(builder: config::builder::ConfigBuilder<config::builder::DefaultState>) -> Result<EaselConfig, ConfigError> {
        let merged = builder
            .add_source(
                config::Environment::with_prefix("EASEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let cfg: EaselConfig = merged.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
