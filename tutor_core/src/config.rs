//! Tutor configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use lesson_model::{DEFAULT_LOAD_BUDGET, DEFAULT_PREFERRED_MODE};

use crate::concept_resolver::AliasCollisionPolicy;

/// Location of the bundled ontology, relative to the working directory.
pub const DEFAULT_ONTOLOGY_PATH: &str = "data/ontology/concepts.json";

/// Failures while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for building a [`crate::pipeline::TutorPipeline`].
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Ontology JSON file.
    pub ontology_path: PathBuf,

    /// Presentation mode written into every CRI.
    pub preferred_mode: String,

    /// Scenes per teaching turn written into every CRI.
    pub load_budget: u32,

    /// What to do when two concepts register the same alias.
    pub alias_collisions: AliasCollisionPolicy,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            ontology_path: PathBuf::from(DEFAULT_ONTOLOGY_PATH),
            preferred_mode: DEFAULT_PREFERRED_MODE.to_string(),
            load_budget: DEFAULT_LOAD_BUDGET,
            alias_collisions: AliasCollisionPolicy::default(),
        }
    }
}

impl TutorConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Override the ontology location.
    pub fn with_ontology_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ontology_path = path.into();
        self
    }
}
