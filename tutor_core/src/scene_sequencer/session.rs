//! Learner session state carried between sequencing calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use lesson_model::{QuizResult, SceneType};

/// Unique identifier for learner sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress derived from quiz feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Improving,
    NeedsRemediation,
}

impl From<&QuizResult> for FeedbackStatus {
    fn from(result: &QuizResult) -> Self {
        match result {
            QuizResult::Correct => FeedbackStatus::Improving,
            _ => FeedbackStatus::NeedsRemediation,
        }
    }
}

/// What the learner last saw for one concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub last_sequence: Vec<SceneType>,
    pub quiz_result: Option<QuizResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeedbackStatus>,
}

/// Per-concept history for one learner.
///
/// Owned by the caller and lent to the sequencer for each call. Entries are
/// never evicted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerSession {
    entries: HashMap<String, SessionEntry>,
}

impl LearnerSession {
    /// Create a session with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History for a concept.
    pub fn entry(&self, concept_id: &str) -> Option<&SessionEntry> {
        self.entries.get(concept_id)
    }

    /// Check whether the learner has been shown this concept before.
    pub fn has_seen(&self, concept_id: &str) -> bool {
        self.entries.contains_key(concept_id)
    }

    /// Replace the history for a concept.
    pub(crate) fn record(&mut self, concept_id: impl Into<String>, entry: SessionEntry) {
        self.entries.insert(concept_id.into(), entry);
    }

    pub(crate) fn entry_mut(&mut self, concept_id: &str) -> Option<&mut SessionEntry> {
        self.entries.get_mut(concept_id)
    }

    /// Number of concepts with history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sessions for many learners, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, LearnerSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session and return its id.
    pub fn open(&mut self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, LearnerSession::new());
        id
    }

    /// Get a session by id.
    pub fn get(&self, id: SessionId) -> Option<&LearnerSession> {
        self.sessions.get(&id)
    }

    /// Get a session by id, starting an empty one if it does not exist.
    pub fn session_mut(&mut self, id: SessionId) -> &mut LearnerSession {
        self.sessions.entry(id).or_default()
    }

    /// Drop a session and return its history.
    pub fn close(&mut self, id: SessionId) -> Option<LearnerSession> {
        self.sessions.remove(&id)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_status_from_quiz() {
        assert_eq!(
            FeedbackStatus::from(&QuizResult::Correct),
            FeedbackStatus::Improving
        );
        assert_eq!(
            FeedbackStatus::from(&QuizResult::Incorrect),
            FeedbackStatus::NeedsRemediation
        );
        assert_eq!(
            FeedbackStatus::from(&QuizResult::from("skipped")),
            FeedbackStatus::NeedsRemediation
        );
    }

    #[test]
    fn test_record_overwrites() {
        let mut session = LearnerSession::new();
        session.record(
            "KCL-001",
            SessionEntry {
                last_sequence: vec![SceneType::DefineConcept],
                quiz_result: None,
                status: Some(FeedbackStatus::Improving),
            },
        );
        session.record(
            "KCL-001",
            SessionEntry {
                last_sequence: vec![SceneType::MiniQuiz],
                quiz_result: Some(QuizResult::Incorrect),
                status: None,
            },
        );

        let entry = session.entry("KCL-001").unwrap();
        assert_eq!(entry.last_sequence, vec![SceneType::MiniQuiz]);
        assert!(entry.status.is_none());
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_registry_sessions_are_isolated() {
        let mut registry = SessionRegistry::new();
        let alice = registry.open();
        let bob = registry.open();

        registry.session_mut(alice).record(
            "OHM-001",
            SessionEntry {
                last_sequence: vec![],
                quiz_result: None,
                status: None,
            },
        );

        assert!(registry.get(alice).unwrap().has_seen("OHM-001"));
        assert!(!registry.get(bob).unwrap().has_seen("OHM-001"));
        assert_eq!(registry.len(), 2);

        assert!(registry.close(alice).is_some());
        assert!(registry.get(alice).is_none());
    }

    #[test]
    fn test_session_mut_creates_missing() {
        let mut registry = SessionRegistry::new();
        let id = SessionId::new();

        assert!(registry.session_mut(id).is_empty());
        assert_eq!(registry.len(), 1);
    }
}
