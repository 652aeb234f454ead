//! Cognitive Remediation Intent - the record handed from query resolution to
//! scene sequencing.

use serde::{Deserialize, Serialize};

use crate::learner::Level;
use crate::ontology::Concept;

/// Preferred presentation mode when nothing else is configured.
pub const DEFAULT_PREFERRED_MODE: &str = "visual-sequential";

/// Number of scenes the learner can absorb in one turn when nothing else is configured.
pub const DEFAULT_LOAD_BUDGET: u32 = 3;

/// What the learner wants to do with a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    TeachConcept,
    ReviseConcept,
    TestUnderstanding,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TeachConcept => "teach_concept",
            Intent::ReviseConcept => "revise_concept",
            Intent::TestUnderstanding => "test_understanding",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to teach, at what level, and which misconceptions to watch for.
///
/// Built fresh for every query and never mutated after emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cri {
    pub goal: Intent,
    pub concept_id: String,
    pub concept_name: String,
    pub domain: String,
    pub level: Level,
    pub preferred_mode: String,
    pub load_budget: u32,
    pub risk_misconceptions: Vec<String>,

    /// Absent when the concept has no prerequisites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
}

impl Cri {
    /// Create a teaching intent for a bare concept id and name.
    pub fn new(concept_id: impl Into<String>, concept_name: impl Into<String>, level: Level) -> Self {
        Self {
            goal: Intent::TeachConcept,
            concept_id: concept_id.into(),
            concept_name: concept_name.into(),
            domain: String::new(),
            level,
            preferred_mode: DEFAULT_PREFERRED_MODE.to_string(),
            load_budget: DEFAULT_LOAD_BUDGET,
            risk_misconceptions: Vec::new(),
            prerequisites: None,
        }
    }

    /// Create an intent carrying everything the ontology knows about `concept`.
    pub fn for_concept(goal: Intent, concept: &Concept, level: Level) -> Self {
        Self {
            goal,
            domain: concept.domain.clone(),
            risk_misconceptions: concept.common_misconceptions.clone(),
            prerequisites: (!concept.prerequisites.is_empty())
                .then(|| concept.prerequisites.clone()),
            ..Self::new(concept.id.clone(), concept.name.clone(), level)
        }
    }

    /// Set the goal.
    pub fn with_goal(mut self, goal: Intent) -> Self {
        self.goal = goal;
        self
    }

    /// Set the presentation mode.
    pub fn with_preferred_mode(mut self, mode: impl Into<String>) -> Self {
        self.preferred_mode = mode.into();
        self
    }

    /// Set the load budget.
    pub fn with_load_budget(mut self, budget: u32) -> Self {
        self.load_budget = budget;
        self
    }

    /// Add a misconception to watch for.
    pub fn with_risk_misconception(mut self, misconception: impl Into<String>) -> Self {
        self.risk_misconceptions.push(misconception.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cri_from_concept() {
        let concept = Concept::new("KVL-001", "Kirchhoff's Voltage Law", "Electrical Circuits")
            .with_prerequisite("VOL-001")
            .with_misconception("Voltage drops depend on loop direction only");

        let cri = Cri::for_concept(Intent::ReviseConcept, &concept, Level::Intermediate);

        assert_eq!(cri.goal, Intent::ReviseConcept);
        assert_eq!(cri.concept_name, "Kirchhoff's Voltage Law");
        assert_eq!(cri.domain, "Electrical Circuits");
        assert_eq!(cri.prerequisites, Some(vec!["VOL-001".to_string()]));
        assert_eq!(cri.risk_misconceptions.len(), 1);
        assert_eq!(cri.preferred_mode, DEFAULT_PREFERRED_MODE);
        assert_eq!(cri.load_budget, DEFAULT_LOAD_BUDGET);
    }

    #[test]
    fn test_empty_prerequisites_are_omitted() {
        let concept = Concept::new("OHM-001", "Ohm's Law", "Electrical Circuits");
        let cri = Cri::for_concept(Intent::TeachConcept, &concept, Level::Beginner);

        assert!(cri.prerequisites.is_none());

        let json = serde_json::to_value(&cri).unwrap();
        assert!(json.get("prerequisites").is_none());
        assert_eq!(json["goal"], "teach_concept");
        assert_eq!(json["level"], "beginner");
    }
}
