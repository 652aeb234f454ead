//! Ontology store - the read-only list of teachable concepts.

mod concept;

pub use concept::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while loading an ontology file. These are startup errors.
#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("failed to read ontology file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ontology: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The concept ontology, in load order.
///
/// On disk this is a JSON object with a top-level `concepts` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ontology {
    #[serde(default)]
    concepts: Vec<Concept>,
}

impl Ontology {
    /// Create an empty ontology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ontology from concepts in the given order.
    pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
        Self {
            concepts: concepts.into_iter().collect(),
        }
    }

    /// Parse an ontology document.
    pub fn from_json_str(json: &str) -> Result<Self, OntologyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an ontology file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// All concepts in load order.
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Get the first concept registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    /// Number of loaded concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Check whether the ontology has no concepts.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
