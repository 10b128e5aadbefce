//! Runtime configuration.
//!
//! Layered: built-in defaults -> optional config file -> `VOICEVAULT_*`
//! environment variables. Nested keys use a double underscore, e.g.
//! `VOICEVAULT_LANE_WEIGHTS__TARGET=70`.

use crate::domain::error::DomainError;
use crate::domain::values::lane_mix::LaneWeights;
use crate::infrastructure::encoding::cache::DEFAULT_CACHE_CAPACITY;
use crate::infrastructure::encoding::trigram::{DEFAULT_DIMENSIONS, DEFAULT_NGRAM_WIDTH};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Which text encoder to wire in at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    #[default]
    Trigram,
    /// Zero vectors only; retrieval falls back to insertion order.
    Noop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Characters per n-gram
    #[serde(default = "default_ngram_width")]
    pub ngram_width: usize,

    /// Hash buckets per vector
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Maximum cached vectors before LRU eviction
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Longest accepted sample, in characters after trimming
    #[serde(default = "default_max_sample_chars")]
    pub max_sample_chars: usize,

    #[serde(default)]
    pub lane_weights: LaneWeights,

    #[serde(default)]
    pub encoder: EncoderKind,

    /// Retrievals slower than this are logged as warnings
    #[serde(default = "default_slow_retrieval_ms")]
    pub slow_retrieval_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ngram_width() -> usize {
    DEFAULT_NGRAM_WIDTH
}
fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_max_sample_chars() -> usize {
    10_000
}
fn default_slow_retrieval_ms() -> u64 {
    250
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            ngram_width: default_ngram_width(),
            dimensions: default_dimensions(),
            cache_capacity: default_cache_capacity(),
            max_sample_chars: default_max_sample_chars(),
            lane_weights: LaneWeights::default(),
            encoder: EncoderKind::default(),
            slow_retrieval_ms: default_slow_retrieval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl VaultConfig {
    /// Load defaults, then `path` if given (format from its extension),
    /// then environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, DomainError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("VOICEVAULT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: VaultConfig = builder
            .build()
            .map_err(|e| DomainError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DomainError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.ngram_width == 0 {
            return Err(DomainError::Config("ngram_width must be > 0".into()));
        }
        if self.dimensions == 0 {
            return Err(DomainError::Config("dimensions must be > 0".into()));
        }
        if self.dimensions > u32::MAX as usize {
            return Err(DomainError::Config(format!(
                "dimensions must be <= {}, got {}",
                u32::MAX,
                self.dimensions
            )));
        }
        if self.cache_capacity == 0 {
            return Err(DomainError::Config("cache_capacity must be > 0".into()));
        }
        if self.max_sample_chars == 0 {
            return Err(DomainError::Config("max_sample_chars must be > 0".into()));
        }
        if self.lane_weights.target == 0 {
            return Err(DomainError::Config("lane_weights.target must be > 0".into()));
        }
        Ok(())
    }
}
