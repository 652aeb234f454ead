//! Alias index: normalized surface form -> concept id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lesson_model::Concept;

/// Lower-case, collapse whitespace runs to a single space, and trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// How index construction treats two concepts claiming the same alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasCollisionPolicy {
    /// Log the collision; the later concept takes the alias.
    #[default]
    Warn,
    /// Refuse to build the index.
    Reject,
}

/// An alias registered by more than one concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub alias: String,
    /// Concept that held the alias before.
    pub existing: String,
    /// Concept that now holds it.
    pub incoming: String,
}

/// Mapping from normalized alias to concept id.
///
/// Keys keep the position at which they were first inserted, even when a
/// later concept takes them over. That position is the tie-break for
/// equal-length matches.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    /// (alias, concept id) in encounter order.
    entries: Vec<(String, String)>,

    /// Alias -> slot in `entries`.
    positions: HashMap<String, usize>,
}

impl AliasIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the name and aliases of every concept, in order.
    ///
    /// Returns the index together with every cross-concept collision seen.
    pub fn build(concepts: &[Concept]) -> (Self, Vec<AliasCollision>) {
        let mut index = Self::new();
        let mut collisions = Vec::new();

        for concept in concepts {
            for form in concept.surface_forms() {
                if let Some(collision) = index.insert(form, &concept.id) {
                    collisions.push(collision);
                }
            }
        }

        (index, collisions)
    }

    /// Register `alias` for `concept_id`, overwriting any previous owner.
    ///
    /// Aliases that normalize to the empty string are skipped, since they
    /// would match every query.
    pub fn insert(&mut self, alias: &str, concept_id: &str) -> Option<AliasCollision> {
        let key = normalize(alias);
        if key.is_empty() {
            tracing::debug!(concept_id, "skipping blank alias");
            return None;
        }

        match self.positions.get(&key) {
            Some(&slot) => {
                let owner = &mut self.entries[slot].1;
                if owner.as_str() == concept_id {
                    return None;
                }
                let existing = std::mem::replace(owner, concept_id.to_string());
                Some(AliasCollision {
                    alias: key,
                    existing,
                    incoming: concept_id.to_string(),
                })
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, concept_id.to_string()));
                None
            }
        }
    }

    /// Concept id registered under an already-normalized alias.
    pub fn concept_for(&self, alias: &str) -> Option<&str> {
        self.positions
            .get(alias)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Aliases occurring anywhere in `normalized_query`, longest first.
    ///
    /// Matching is plain substring containment. Equal-length aliases keep
    /// encounter order; callers should not rely on that.
    pub fn matches_in(&self, normalized_query: &str) -> Vec<&str> {
        let mut matches: Vec<&str> = self
            .entries
            .iter()
            .map(|(alias, _)| alias.as_str())
            .filter(|alias| normalized_query.contains(alias))
            .collect();

        matches.sort_by_key(|alias| std::cmp::Reverse(alias.chars().count()));
        matches
    }

    /// Iterate over (alias, concept id) pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, id)| (alias.as_str(), id.as_str()))
    }

    /// Number of distinct aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
