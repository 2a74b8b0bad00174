//! Configuration loading and typed config structures for Partyline.
//!
//! The configuration lives in `partyline-config.yaml` at the project root
//! (or wherever `PARTYLINE_CONFIG` points). Every section is optional and
//! falls back to the defaults below, so a missing file is not an error.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, warn};

use partyline_director::{ConflictEdge, ConflictGraph, DEFAULT_CONFLICT_WEIGHT};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PARTYLINE_CONFIG";

/// Config file used when `PARTYLINE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "partyline-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartylineConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level and turn log location.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Delivery cadence handed to the director.
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Seeding for jitter and profanity flavour.
    #[serde(default)]
    pub randomness: RandomnessConfig,

    /// Directory whose templates override the built-in ones.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Replacement conflict graph.
    #[serde(default)]
    pub conflict: Option<ConflictConfig>,
}

impl PartylineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `PORT` overrides `server.port`
    /// - `TURN_LOG_PATH` overrides `logging.turn_log_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the path in `PARTYLINE_CONFIG`, or `partyline-config.yaml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        Self::load_or_default(&path)
    }

    /// Load `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            info!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        info!(path = %path.display(), "config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!(value = %val, error = %e, "ignoring invalid PORT"),
            }
        }
        if let Some(val) = lookup("TURN_LOG_PATH") {
            self.logging.turn_log_path = PathBuf::from(val);
        }
    }

    /// The conflict graph to plan with.
    pub fn conflict_graph(&self) -> ConflictGraph {
        self.conflict.as_ref().map_or_else(ConflictGraph::default, |c| {
            ConflictGraph::from_edges(c.default_weight, &c.edges)
        })
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSONL file every applied turn is appended to.
    #[serde(default = "default_turn_log_path")]
    pub turn_log_path: PathBuf,

    /// Emit log lines as JSON instead of plain text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            turn_log_path: default_turn_log_path(),
            json: false,
        }
    }
}

/// Delivery cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PacingConfig {
    /// Lower bound of the gap between lines, in milliseconds.
    #[serde(default = "default_micro_delay_ms_min")]
    pub micro_delay_ms_min: u64,

    /// Upper bound of the gap between lines, in milliseconds.
    #[serde(default = "default_micro_delay_ms_max")]
    pub micro_delay_ms_max: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            micro_delay_ms_min: default_micro_delay_ms_min(),
            micro_delay_ms_max: default_micro_delay_ms_max(),
        }
    }
}

/// Randomness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RandomnessConfig {
    /// Fixed seed; OS entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RandomnessConfig {
    /// An RNG honouring the configured seed.
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }
}

/// Conflict graph configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConflictConfig {
    /// Weight of pairs without an edge.
    #[serde(default = "default_conflict_weight")]
    pub default_weight: f64,

    /// Explicit edges.
    #[serde(default)]
    pub edges: Vec<ConflictEdge>,
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_turn_log_path() -> PathBuf {
    PathBuf::from("logs/room_events.jsonl")
}

const fn default_micro_delay_ms_min() -> u64 {
    90
}

const fn default_micro_delay_ms_max() -> u64 {
    320
}

const fn default_conflict_weight() -> f64 {
    DEFAULT_CONFLICT_WEIGHT
}
