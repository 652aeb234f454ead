//! Concept Resolver - maps a free-text query to one ontology concept.
//!
//! Resolution works as follows:
//! 1. **Normalize**: lower-case the query and collapse whitespace
//! 2. **Candidates**: collect every indexed alias that occurs in the query
//! 3. **Tie-break**: the longest matching alias wins
//! 4. **Lookup**: fetch the concept record the winning alias points to

mod alias_index;

pub use alias_index::*;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use lesson_model::{Concept, Ontology, OntologyError};

/// Failures raised by the resolver.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// No alias occurs anywhere in the query.
    #[error("No matching concept found for query: '{query}'")]
    ConceptNotFound { query: String },

    /// The index points at an id the ontology does not contain.
    #[error("concept {0} is indexed but missing from the ontology")]
    MissingConcept(String),

    #[error("alias '{alias}' is claimed by both {existing} and {incoming}")]
    AliasCollision {
        alias: String,
        existing: String,
        incoming: String,
    },

    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

impl From<AliasCollision> for ResolverError {
    fn from(collision: AliasCollision) -> Self {
        ResolverError::AliasCollision {
            alias: collision.alias,
            existing: collision.existing,
            incoming: collision.incoming,
        }
    }
}

/// The concept a query resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub concept_id: String,
    pub concept: Concept,
    /// The normalized alias that won.
    pub matched_alias: String,
}

/// Resolves queries against a fixed ontology.
///
/// Immutable after construction, so one resolver can serve any number of
/// readers.
#[derive(Debug, Clone)]
pub struct ConceptResolver {
    ontology: Ontology,
    index: AliasIndex,
}

impl ConceptResolver {
    /// Build a resolver, logging and overwriting on alias collisions.
    pub fn new(ontology: Ontology) -> Self {
        let (index, collisions) = AliasIndex::build(ontology.concepts());
        for collision in &collisions {
            tracing::warn!(
                alias = %collision.alias,
                existing = %collision.existing,
                incoming = %collision.incoming,
                "alias registered by more than one concept; keeping the later one"
            );
        }
        Self::assemble(ontology, index)
    }

    /// Build a resolver with an explicit collision policy.
    pub fn with_policy(ontology: Ontology, policy: AliasCollisionPolicy) -> Result<Self, ResolverError> {
        match policy {
            AliasCollisionPolicy::Warn => Ok(Self::new(ontology)),
            AliasCollisionPolicy::Reject => {
                let (index, collisions) = AliasIndex::build(ontology.concepts());
                if let Some(collision) = collisions.into_iter().next() {
                    return Err(collision.into());
                }
                Ok(Self::assemble(ontology, index))
            }
        }
    }

    /// Load an ontology file and build a resolver over it.
    pub fn from_path(path: impl AsRef<Path>, policy: AliasCollisionPolicy) -> Result<Self, ResolverError> {
        let path = path.as_ref();
        let ontology = Ontology::load(path)?;
        tracing::info!(
            path = %path.display(),
            concepts = ontology.len(),
            "ontology loaded"
        );
        Self::with_policy(ontology, policy)
    }

    fn assemble(ontology: Ontology, index: AliasIndex) -> Self {
        Self { ontology, index }
    }

    /// Every alias occurring in `query`, longest first.
    pub fn extract_candidates(&self, query: &str) -> Vec<String> {
        let normalized = normalize(query);
        self.index
            .matches_in(&normalized)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Resolve a query to the concept behind its longest matching alias.
    pub fn resolve(&self, query: &str) -> Result<Resolution, ResolverError> {
        let normalized = normalize(query);
        let candidates = self.index.matches_in(&normalized);

        let Some(&matched_alias) = candidates.first() else {
            return Err(ResolverError::ConceptNotFound {
                query: query.to_string(),
            });
        };

        let concept_id = self
            .index
            .concept_for(matched_alias)
            .ok_or_else(|| ResolverError::MissingConcept(matched_alias.to_string()))?;
        let concept = self
            .concept(concept_id)
            .ok_or_else(|| ResolverError::MissingConcept(concept_id.to_string()))?;

        tracing::debug!(
            query,
            concept_id,
            matched_alias,
            candidates = candidates.len(),
            "concept resolved"
        );

        Ok(Resolution {
            concept_id: concept_id.to_string(),
            concept: concept.clone(),
            matched_alias: matched_alias.to_string(),
        })
    }

    /// Get a concept by id.
    pub fn concept(&self, concept_id: &str) -> Option<&Concept> {
        self.ontology.get(concept_id)
    }

    /// All concepts in load order.
    pub fn all_concepts(&self) -> &[Concept] {
        self.ontology.concepts()
    }
}

/// Load an ontology and resolve a single query against it.
pub fn resolve_concept(query: &str, ontology_path: impl AsRef<Path>) -> Result<Resolution, ResolverError> {
    ConceptResolver::from_path(ontology_path, AliasCollisionPolicy::Warn)?.resolve(query)
}
