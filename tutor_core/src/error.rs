//! Top-level error type for the tutor.

use thiserror::Error;

use crate::concept_resolver::ResolverError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TutorError {
    /// Whether this is the one failure a learner should see: no concept
    /// matched their query.
    pub fn is_concept_not_found(&self) -> bool {
        matches!(
            self,
            TutorError::Resolver(ResolverError::ConceptNotFound { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
