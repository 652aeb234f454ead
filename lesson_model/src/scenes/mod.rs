//! Scene library: the fixed catalog of pedagogical scene archetypes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One pedagogical beat in a teaching sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    /// What is the idea.
    DefineConcept,
    /// Main diagram or visual.
    VisualizeCore,
    /// Step-by-step example.
    WorkedExample,
    /// Show and correct a misconception.
    CommonMistake,
    /// Quick check.
    MiniQuiz,
}

impl SceneType {
    /// Every scene type in catalog order.
    pub const ALL: [SceneType; 5] = [
        SceneType::DefineConcept,
        SceneType::VisualizeCore,
        SceneType::WorkedExample,
        SceneType::CommonMistake,
        SceneType::MiniQuiz,
    ];

    /// The wire token for this scene type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::DefineConcept => "define_concept",
            SceneType::VisualizeCore => "visualize_core",
            SceneType::WorkedExample => "worked_example",
            SceneType::CommonMistake => "common_mistake",
            SceneType::MiniQuiz => "mini_quiz",
        }
    }

    /// The catalog record for this scene type.
    pub fn info(&self) -> SceneInfo {
        let (scene_id, purpose, description) = match self {
            SceneType::DefineConcept => (
                "S1",
                "What is the idea",
                "Introduce the concept with clear definition",
            ),
            SceneType::VisualizeCore => (
                "S2",
                "Main diagram / visual",
                "Show the concept through visual representation",
            ),
            SceneType::WorkedExample => (
                "S3",
                "Step-by-step example",
                "Demonstrate concept application with detailed example",
            ),
            SceneType::CommonMistake => (
                "S4",
                "Show & correct misconception",
                "Address and correct common misunderstandings",
            ),
            SceneType::MiniQuiz => (
                "S5",
                "Quick check",
                "Assess understanding with targeted question",
            ),
        };

        SceneInfo {
            scene_id,
            scene_type: self.as_str(),
            purpose,
            description,
        }
    }
}

impl std::fmt::Display for SceneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised scene token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene type: {0}")]
pub struct UnknownSceneType(pub String);

impl FromStr for SceneType {
    type Err = UnknownSceneType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneType::ALL
            .into_iter()
            .find(|scene| scene.as_str() == s)
            .ok_or_else(|| UnknownSceneType(s.to_string()))
    }
}

/// Catalog record describing a scene archetype.
///
/// The default value is the empty record handed out for unknown types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneInfo {
    pub scene_id: &'static str,
    pub scene_type: &'static str,
    pub purpose: &'static str,
    pub description: &'static str,
}

impl SceneInfo {
    /// Check whether this is the empty record.
    pub fn is_empty(&self) -> bool {
        self.scene_id.is_empty()
    }
}

/// Look up a scene archetype by its wire token.
///
/// Unknown tokens yield an empty record rather than an error.
pub fn scene_info(scene_type: &str) -> SceneInfo {
    scene_type
        .parse::<SceneType>()
        .map(|scene| scene.info())
        .unwrap_or_default()
}

/// All scene wire tokens in catalog order.
pub fn all_scene_types() -> Vec<&'static str> {
    SceneType::ALL.iter().map(SceneType::as_str).collect()
}
