//! Intent detection by keyword scoring.

use serde::{Deserialize, Serialize};

use lesson_model::Intent;

const TEACH_KEYWORDS: &[&str] = &[
    "explain",
    "what is",
    "how does",
    "tell me about",
    "teach me",
    "learn",
    "understand",
    "show me",
    "describe",
];

const REVISE_KEYWORDS: &[&str] = &[
    "revise",
    "review",
    "refresh",
    "recap",
    "summarize",
    "remind me",
    "go over",
    "revisit",
];

const TEST_KEYWORDS: &[&str] = &[
    "test",
    "quiz",
    "assess",
    "evaluate",
    "check my",
    "how well do i",
    "practice",
    "exercise",
    "problem",
];

/// Detected intent with a confidence in `[0.6, 0.95]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentDetection {
    pub intent: Intent,
    pub confidence: f64,
}

/// Count how many keywords occur in `text`.
pub(crate) fn count_matches(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|keyword| text.contains(*keyword)).count()
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores a query against teach/revise/test keyword lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentDetector;

impl IntentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect what the learner wants to do.
    ///
    /// Ties go to teach, then revise, then test.
    pub fn detect(&self, query: &str) -> IntentDetection {
        let text = query.trim().to_lowercase();

        let teach = count_matches(&text, TEACH_KEYWORDS);
        let revise = count_matches(&text, REVISE_KEYWORDS);
        let test = count_matches(&text, TEST_KEYWORDS);
        let best = teach.max(revise).max(test);

        if best == 0 {
            let confidence = if query.contains('?') { 0.7 } else { 0.6 };
            return IntentDetection {
                intent: Intent::TeachConcept,
                confidence,
            };
        }

        let total = teach + revise + test;
        let confidence = (0.7 + (best as f64 / (total + 1) as f64) * 0.25).min(0.95);

        let intent = if teach == best {
            Intent::TeachConcept
        } else if revise == best {
            Intent::ReviseConcept
        } else {
            Intent::TestUnderstanding
        };

        IntentDetection {
            intent,
            confidence: round2(confidence),
        }
    }
}
