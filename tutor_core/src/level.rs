//! Skill level estimation from query wording.

use serde::{Deserialize, Serialize};

use lesson_model::Level;

use crate::intent::count_matches;

const BEGINNER_INDICATORS: &[&str] = &[
    "what is",
    "explain",
    "basics",
    "introduction",
    "simple",
    "eli5",
    "for dummies",
    "beginner",
    "start",
    "first",
];

const ADVANCED_INDICATORS: &[&str] = &[
    "derive",
    "proof",
    "mathematical",
    "rigorous",
    "formal",
    "theoretical",
    "advanced",
    "complex",
    "in-depth",
    "detailed analysis",
];

const TECHNICAL_TERMS: &[&str] = &[
    "impedance",
    "phasor",
    "laplace",
    "fourier",
    "topology",
    "transient",
    "steady-state",
    "frequency response",
];

/// Estimated level plus why it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEstimate {
    pub level: Level,
    pub confidence: f64,
    pub reasoning: String,
}

impl LevelEstimate {
    fn new(level: Level, confidence: f64, reasoning: &str) -> Self {
        Self {
            level,
            confidence,
            reasoning: reasoning.to_string(),
        }
    }
}

/// Guesses the learner's level from indicator words.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelEstimator;

impl LevelEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate the level of a query. Advanced wording beats technical
    /// vocabulary, which beats beginner wording.
    pub fn estimate(&self, query: &str) -> LevelEstimate {
        let text = query.trim().to_lowercase();

        if count_matches(&text, ADVANCED_INDICATORS) > 0 {
            return LevelEstimate::new(
                Level::Advanced,
                0.8,
                "Query contains advanced terminology or requests rigorous treatment",
            );
        }

        if count_matches(&text, TECHNICAL_TERMS) > 0 {
            return LevelEstimate::new(
                Level::Intermediate,
                0.7,
                "Query uses technical terminology",
            );
        }

        if count_matches(&text, BEGINNER_INDICATORS) > 0 {
            return LevelEstimate::new(Level::Beginner, 0.75, "Simple explanation request");
        }

        if query.split_whitespace().count() <= 4 {
            return LevelEstimate::new(
                Level::Beginner,
                0.65,
                "Short, direct query suggests introductory level",
            );
        }

        LevelEstimate::new(
            Level::Beginner,
            0.5,
            "Default to beginner level (no clear indicators)",
        )
    }
}
