//! CRI emission: bundles intent, concept, and level into one record.

use lesson_model::{Concept, Cri, Intent, Level, DEFAULT_LOAD_BUDGET, DEFAULT_PREFERRED_MODE};

use crate::config::TutorConfig;

/// Emits CRIs stamped with the configured presentation mode and load budget.
#[derive(Debug, Clone)]
pub struct CriEmitter {
    preferred_mode: String,
    load_budget: u32,
}

impl Default for CriEmitter {
    fn default() -> Self {
        Self {
            preferred_mode: DEFAULT_PREFERRED_MODE.to_string(),
            load_budget: DEFAULT_LOAD_BUDGET,
        }
    }
}

impl CriEmitter {
    /// Create an emitter with explicit defaults.
    pub fn new(preferred_mode: impl Into<String>, load_budget: u32) -> Self {
        Self {
            preferred_mode: preferred_mode.into(),
            load_budget,
        }
    }

    /// Create an emitter from configuration.
    pub fn from_config(config: &TutorConfig) -> Self {
        Self::new(config.preferred_mode.clone(), config.load_budget)
    }

    /// Build the CRI for a resolved concept.
    pub fn emit(&self, intent: Intent, concept: &Concept, level: Level) -> Cri {
        Cri::for_concept(intent, concept, level)
            .with_preferred_mode(self.preferred_mode.clone())
            .with_load_budget(self.load_budget)
    }
}
