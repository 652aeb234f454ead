//! Concept definitions.

use serde::{Deserialize, Serialize};

/// A single entry of the domain ontology.
///
/// Concepts are immutable once loaded; `id` is their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,

    /// Canonical display name. Also registered as an alias.
    pub name: String,

    /// Alternative spellings, abbreviations, and nicknames.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Subject area (e.g. "Electrical Circuits").
    pub domain: String,

    /// Concept ids the learner should know first, in teaching order.
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Known misunderstandings, most common first.
    #[serde(default)]
    pub common_misconceptions: Vec<String>,
}

impl Concept {
    /// Create a concept with no aliases, prerequisites, or misconceptions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            domain: domain.into(),
            prerequisites: Vec::new(),
            common_misconceptions: Vec::new(),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add multiple aliases.
    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Add a prerequisite concept id.
    pub fn with_prerequisite(mut self, concept_id: impl Into<String>) -> Self {
        self.prerequisites.push(concept_id.into());
        self
    }

    /// Add a common misconception.
    pub fn with_misconception(mut self, misconception: impl Into<String>) -> Self {
        self.common_misconceptions.push(misconception.into());
        self
    }

    /// The canonical name followed by every alias, in registration order.
    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
