//! Prompt building: one generation instruction per planned scene.

use serde::{Deserialize, Serialize};

use lesson_model::SceneType;

/// Instruction for generating one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePrompt {
    pub scene_type: SceneType,
    pub instruction: String,
}

/// Maps scene types to instruction templates keyed on the concept name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build prompts for every scene in `scene_program`, in order.
    ///
    /// Only the first misconception is used, by `common_mistake` scenes.
    pub fn build_prompts(
        &self,
        concept_name: &str,
        scene_program: &[SceneType],
        misconceptions: &[String],
    ) -> Vec<ScenePrompt> {
        scene_program
            .iter()
            .map(|&scene_type| ScenePrompt {
                scene_type,
                instruction: self.instruction(scene_type, concept_name, misconceptions),
            })
            .collect()
    }

    /// The instruction text for a single scene.
    pub fn instruction(&self, scene_type: SceneType, concept: &str, misconceptions: &[String]) -> String {
        match scene_type {
            SceneType::DefineConcept => format!(
                "Explain what {concept} is. Provide a clear, concise definition that a student can understand."
            ),
            SceneType::VisualizeCore => format!(
                "Create a visual representation of {concept}. Show the main components and how they interact."
            ),
            SceneType::WorkedExample => format!(
                "Solve a step-by-step example problem involving {concept}. Show all work clearly."
            ),
            SceneType::CommonMistake => match misconceptions.first() {
                Some(mistake) => format!(
                    "Address this common misconception about {concept}: '{mistake}'. Explain why it's incorrect and show the right way to think about it."
                ),
                None => format!(
                    "Show a common mistake students make with {concept} and explain the correct approach."
                ),
            },
            SceneType::MiniQuiz => format!(
                "Create a quick quiz question to check understanding of {concept}. Make it practical and relevant."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_follow_program_order() {
        let program = [SceneType::WorkedExample, SceneType::MiniQuiz];

        let prompts = PromptBuilder::new().build_prompts("Ohm's Law", &program, &[]);

        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].scene_type, SceneType::WorkedExample);
        assert!(prompts[0].instruction.contains("example problem involving Ohm's Law"));
        assert_eq!(prompts[1].scene_type, SceneType::MiniQuiz);
    }

    #[test]
    fn test_mistake_prompt_uses_first_misconception() {
        let misconceptions = vec![
            "Current is used up by each resistor".to_string(),
            "Voltage flows through a circuit".to_string(),
        ];

        let instruction = PromptBuilder::new().instruction(
            SceneType::CommonMistake,
            "Series Circuit",
            &misconceptions,
        );

        assert_eq!(
            instruction,
            "Address this common misconception about Series Circuit: 'Current is used up by each resistor'. Explain why it's incorrect and show the right way to think about it."
        );
    }

    #[test]
    fn test_mistake_prompt_without_misconceptions() {
        let instruction = PromptBuilder::new().instruction(SceneType::CommonMistake, "Capacitor", &[]);
        assert_eq!(
            instruction,
            "Show a common mistake students make with Capacitor and explain the correct approach."
        );
    }

    #[test]
    fn test_define_prompt() {
        let instruction = PromptBuilder::new().instruction(SceneType::DefineConcept, "KCL", &[]);
        assert!(instruction.starts_with("Explain what KCL is."));
    }
}
