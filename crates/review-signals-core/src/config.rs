//! Run configuration.
//!
//! One YAML file per run: dataset location, cohort allow-lists, the marker
//! dictionary and the fuzzy-match threshold. Configuration problems are
//! fatal and surface before any row is processed; row-level data problems
//! never do.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_fuzzy_threshold() -> u32 {
    80
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Path to the reviews CSV
    pub input_path: PathBuf,

    /// Where to write the output tables; unset paths are skipped
    #[serde(default)]
    pub output: OutputPaths,

    /// Disease allow-list; empty means no constraint
    #[serde(default)]
    pub diseases: Vec<String>,

    /// Antibody allow-list; empty means no constraint
    #[serde(default)]
    pub antibodies: Vec<String>,

    /// Treatment allow-list; empty means no constraint
    #[serde(default)]
    pub treatments: Vec<String>,

    /// Fixed terms excluded from every comment's tokens, on top of the
    /// row's own disease/treatment/antibody names (e.g. a disease
    /// abbreviation like "uc")
    #[serde(default)]
    pub excluded_terms: Vec<String>,

    /// Minimum similarity percentage for a fuzzy treatment mention
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u32,

    /// Marker dictionary: topic name → disease binding and markers
    #[serde(default)]
    pub topics: BTreeMap<String, TopicConfig>,
}

/// Output table locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Field-annotated reviews table
    #[serde(default)]
    pub annotated_reviews: Option<PathBuf>,

    /// Directory for the per-topic marker event tables
    #[serde(default)]
    pub marker_events_dir: Option<PathBuf>,

    /// Treatment-change event table
    #[serde(default)]
    pub treatment_changes: Option<PathBuf>,
}

/// One topic of the marker dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Disease this topic applies to
    pub disease: String,

    /// Marker label → keyword phrases
    pub markers: BTreeMap<String, Vec<String>>,
}

impl RunConfig {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants no default can repair.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fuzzy_threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "fuzzy_threshold must be a percentage, got {}",
                self.fuzzy_threshold
            )));
        }

        for (topic, topic_config) in &self.topics {
            if topic_config.disease.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "topic \"{topic}\" has no disease binding"
                )));
            }
            if topic_config.markers.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "topic \"{topic}\" has no markers"
                )));
            }
            for (marker, phrases) in &topic_config.markers {
                if phrases.is_empty() || phrases.iter().any(|p| p.trim().is_empty()) {
                    return Err(ConfigError::Invalid(format!(
                        "marker \"{marker}\" in topic \"{topic}\" has an empty phrase list or phrase"
                    )));
                }
            }
        }

        Ok(())
    }
}
