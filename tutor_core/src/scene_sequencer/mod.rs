//! Scene Sequencer - turns a CRI into an ordered scene program.
//!
//! Exactly one branch runs per call, first match wins:
//! 1. **Personalized**: a user state was supplied, whatever it contains
//! 2. **Feedback remediation**: the last quiz was failed on a concept the
//!    learner has already been shown
//! 3. **Standard**: the level template
//!
//! Whatever branch runs, the chosen program is recorded in the learner's
//! session, which is what lets branch 2 see a prior encounter next time.

mod session;

pub use session::*;

use serde::{Deserialize, Serialize};

use lesson_model::{Cri, Level, Mastery, QuizResult, SceneType, UserState};

/// The ordered scene program chosen for one teaching turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub concept_id: String,
    pub concept_name: String,
    pub level: Level,
    pub scene_program: Vec<SceneType>,
    pub load_budget: u32,
    pub personalization_reason: String,
}

/// Canonical program for a level. Unknown levels get the beginner program.
pub fn standard_sequence(level: &Level) -> Vec<SceneType> {
    use lesson_model::SceneType::*;

    match level {
        Level::Intermediate => vec![DefineConcept, WorkedExample, CommonMistake, MiniQuiz],
        Level::Advanced => vec![WorkedExample, CommonMistake, MiniQuiz],
        Level::Beginner | Level::Other(_) => {
            vec![DefineConcept, VisualizeCore, WorkedExample, MiniQuiz]
        }
    }
}

/// Program used after a failed quiz on a concept already taught.
pub fn remediation_sequence() -> Vec<SceneType> {
    vec![
        SceneType::VisualizeCore,
        SceneType::WorkedExample,
        SceneType::CommonMistake,
        SceneType::MiniQuiz,
    ]
}

/// Drop the definition and make sure a misconception scene precedes the quiz.
fn remediate(mut program: Vec<SceneType>) -> Vec<SceneType> {
    program.retain(|scene| *scene != SceneType::DefineConcept);

    if !program.contains(&SceneType::CommonMistake) {
        let at = program
            .iter()
            .position(|scene| *scene == SceneType::MiniQuiz)
            .unwrap_or(program.len());
        program.insert(at, SceneType::CommonMistake);
    }

    program
}

/// Plans scene programs. Holds no state of its own; history lives in the
/// [`LearnerSession`] passed to each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneSequencer;

impl SceneSequencer {
    pub fn new() -> Self {
        Self
    }

    /// Choose a scene program for `cri` and record it in `session`.
    pub fn plan_sequence(
        &self,
        session: &mut LearnerSession,
        cri: &Cri,
        quiz_result: Option<QuizResult>,
        user_state: Option<&UserState>,
    ) -> ScenePlan {
        let concept_id = cri.concept_id.as_str();
        let level = &cri.level;

        let (scene_program, personalization_reason) =
            match user_state {
                Some(state) => self.personalized_sequence(concept_id, level, state),
                None if quiz_result.as_ref().is_some_and(QuizResult::is_incorrect)
                    && session.has_seen(concept_id) =>
                {
                    (
                        remediation_sequence(),
                        "Remediation sequence triggered by incorrect quiz result".to_string(),
                    )
                }
                None => (
                    standard_sequence(level),
                    format!("Standard {level}-level sequence"),
                ),
            };

        tracing::debug!(
            concept_id,
            level = %level,
            scenes = scene_program.len(),
            reason = %personalization_reason,
            "scene program planned"
        );

        session.record(
            concept_id,
            SessionEntry {
                last_sequence: scene_program.clone(),
                quiz_result,
                status: None,
            },
        );

        ScenePlan {
            concept_id: cri.concept_id.clone(),
            concept_name: cri.concept_name.clone(),
            level: level.clone(),
            scene_program,
            load_budget: cri.load_budget,
            personalization_reason,
        }
    }

    fn personalized_sequence(
        &self,
        concept_id: &str,
        level: &Level,
        state: &UserState,
    ) -> (Vec<SceneType>, String) {
        let failed_recently = state
            .recent_quiz_result
            .as_ref()
            .is_some_and(QuizResult::is_incorrect);
        let weak = state.mastery_of(concept_id) == Mastery::Weak;

        if !(failed_recently || weak) {
            return (
                standard_sequence(level),
                format!(
                    "Standard {level}-level sequence (user_state provided but no personalization needed)"
                ),
            );
        }

        let mut triggers = Vec::new();
        if failed_recently {
            triggers.push("recent quiz failure".to_string());
        }
        if weak {
            triggers.push(format!("weak mastery of {concept_id}"));
        }

        (
            remediate(standard_sequence(level)),
            format!(
                "Personalized sequence: skipped definition, added misconception handling due to {}",
                triggers.join(" and ")
            ),
        )
    }

    /// Record a quiz outcome against an existing session entry.
    ///
    /// Does nothing if the concept has not been planned in this session.
    pub fn update_feedback(&self, session: &mut LearnerSession, concept_id: &str, quiz_result: QuizResult) {
        let Some(entry) = session.entry_mut(concept_id) else {
            tracing::debug!(concept_id, "feedback for unplanned concept ignored");
            return;
        };

        entry.status = Some(FeedbackStatus::from(&quiz_result));
        entry.quiz_result = Some(quiz_result);
    }
}

/// Plan a single turn against a fresh session.
pub fn plan_scenes(cri: &Cri, quiz_result: Option<QuizResult>, user_state: Option<&UserState>) -> ScenePlan {
    SceneSequencer::new().plan_sequence(&mut LearnerSession::new(), cri, quiz_result, user_state)
}
