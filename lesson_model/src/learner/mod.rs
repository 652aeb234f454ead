//! Learner signals: skill level, quiz outcomes, and mastery records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Apparent skill level of the learner for the current query.
///
/// Unrecognised level text is preserved in [`Level::Other`] so it can be
/// echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Other(s) => s,
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        match s.as_str() {
            "beginner" => Level::Beginner,
            "intermediate" => Level::Intermediate,
            "advanced" => Level::Advanced,
            _ => Level::Other(s),
        }
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::from(s.to_string())
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the learner's most recent quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuizResult {
    Correct,
    Incorrect,
    /// Any other reported outcome. Never treated as a failure.
    Other(String),
}

impl QuizResult {
    pub fn as_str(&self) -> &str {
        match self {
            QuizResult::Correct => "correct",
            QuizResult::Incorrect => "incorrect",
            QuizResult::Other(s) => s,
        }
    }

    pub fn is_incorrect(&self) -> bool {
        matches!(self, QuizResult::Incorrect)
    }
}

impl From<String> for QuizResult {
    fn from(s: String) -> Self {
        match s.as_str() {
            "correct" => QuizResult::Correct,
            "incorrect" => QuizResult::Incorrect,
            _ => QuizResult::Other(s),
        }
    }
}

impl From<&str> for QuizResult {
    fn from(s: &str) -> Self {
        QuizResult::from(s.to_string())
    }
}

impl From<QuizResult> for String {
    fn from(result: QuizResult) -> Self {
        match result {
            QuizResult::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for QuizResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded proficiency for a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mastery {
    Weak,
    Strong,
    /// Also used for any unrecognised mastery text.
    #[default]
    Unknown,
}

impl Mastery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mastery::Weak => "weak",
            Mastery::Strong => "strong",
            Mastery::Unknown => "unknown",
        }
    }
}

impl From<String> for Mastery {
    fn from(s: String) -> Self {
        match s.as_str() {
            "weak" => Mastery::Weak,
            "strong" => Mastery::Strong,
            _ => Mastery::Unknown,
        }
    }
}

impl From<Mastery> for String {
    fn from(mastery: Mastery) -> Self {
        mastery.as_str().to_string()
    }
}

impl std::fmt::Display for Mastery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally supplied learner profile used for personalization.
///
/// Missing, unknown, or wrong-typed keys are simply absent; nothing here is
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_quiz_result"
    )]
    pub recent_quiz_result: Option<QuizResult>,

    /// Concept id -> mastery.
    #[serde(default, deserialize_with = "lenient_mastery")]
    pub concept_mastery: HashMap<String, Mastery>,
}

/// Any non-string quiz result reads as no result.
fn lenient_quiz_result<'de, D>(deserializer: D) -> Result<Option<QuizResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(QuizResult::from))
}

/// Non-object mastery maps read as empty; non-string entries are dropped.
fn lenient_mastery<'de, D>(deserializer: D) -> Result<HashMap<String, Mastery>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|(concept_id, mastery)| {
            mastery
                .as_str()
                .map(|text| (concept_id, Mastery::from(text.to_string())))
        })
        .collect())
}

impl UserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the most recent quiz result.
    pub fn with_recent_quiz_result(mut self, result: impl Into<QuizResult>) -> Self {
        self.recent_quiz_result = Some(result.into());
        self
    }

    /// Record mastery for a concept.
    pub fn with_mastery(mut self, concept_id: impl Into<String>, mastery: Mastery) -> Self {
        self.concept_mastery.insert(concept_id.into(), mastery);
        self
    }

    /// Mastery for a concept, `Unknown` when not recorded.
    pub fn mastery_of(&self, concept_id: &str) -> Mastery {
        self.concept_mastery
            .get(concept_id)
            .copied()
            .unwrap_or_default()
    }

    /// Parse a user state supplied as JSON.
    ///
    /// An empty object means no user state was supplied and yields `None`.
    /// Any other object yields a state, even if none of its keys are known.
    pub fn from_json_str(json: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        if value.as_object().is_some_and(|object| object.is_empty()) {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some)
    }
}
