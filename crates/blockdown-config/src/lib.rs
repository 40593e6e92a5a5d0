use blockdown_engine::{ParseOptions, Pipeline, PipelineBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "BLOCKDOWN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

/// Persistent parser settings.
///
/// ```toml
/// max_container_depth = 32
///
/// [parse]
/// github_extensions = true
/// streaming_threshold = 1048576
/// ```
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_container_depth: usize,
    pub parse: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_container_depth: Pipeline::DEFAULT_MAX_CONTAINER_DEPTH,
            parse: ParseOptions::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// `$BLOCKDOWN_CONFIG` if set, else `~/.config/blockdown/config.toml`.
    pub fn config_path() -> PathBuf {
        Self::resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    fn resolve_config_path(override_path: Option<&str>) -> PathBuf {
        if let Some(path) = override_path.filter(|p| !p.trim().is_empty()) {
            return Self::expand_path(Path::new(path)).unwrap_or_else(|| PathBuf::from(path));
        }
        let config_dir = shellexpand::tilde("~/.config/blockdown");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_container_depth == 0 {
            return Err(ConfigError::InvalidOption {
                field: "max_container_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.parse.streaming_threshold == 0 {
            return Err(ConfigError::InvalidOption {
                field: "parse.streaming_threshold",
                reason: "must be at least 1 byte".to_string(),
            });
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        self.parse
    }

    /// A pipeline builder preloaded with these settings.
    pub fn pipeline_builder(&self) -> PipelineBuilder {
        Pipeline::builder()
            .options(self.parse)
            .max_container_depth(self.max_container_depth)
    }
}
