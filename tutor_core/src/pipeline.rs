//! Pipeline orchestrator - runs a learner query through every stage.
//!
//! 1. **Intent**: what the learner wants to do
//! 2. **Concept**: which ontology entry they mean
//! 3. **Level**: how much they already know
//! 4. **CRI**: bundle the above
//! 5. **Scenes**: plan the scene program against the learner's session
//! 6. **Prompts**: one generation instruction per scene

use serde::{Deserialize, Serialize};

use lesson_model::{Cri, Ontology, QuizResult, UserState};

use crate::concept_resolver::ConceptResolver;
use crate::config::TutorConfig;
use crate::cri_emitter::CriEmitter;
use crate::error::Result;
use crate::intent::{IntentDetection, IntentDetector};
use crate::level::{LevelEstimate, LevelEstimator};
use crate::prompts::{PromptBuilder, ScenePrompt};
use crate::scene_sequencer::{LearnerSession, ScenePlan, SceneSequencer};

/// One learner turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanRequest {
    pub query: String,
    pub quiz_result: Option<QuizResult>,
    pub user_state: Option<UserState>,
    /// Attach stage-by-stage metadata to the result.
    pub verbose: bool,
}

impl PlanRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_quiz_result(mut self, result: QuizResult) -> Self {
        self.quiz_result = Some(result);
        self
    }

    pub fn with_user_state(mut self, state: UserState) -> Self {
        self.user_state = Some(state);
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

/// Which alias the resolver matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMatch {
    pub concept_id: String,
    pub matched_alias: String,
}

/// Intermediate results of each stage, for debugging and demos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub query: String,
    pub intent_detection: IntentDetection,
    pub concept_resolution: ConceptMatch,
    pub level_estimation: LevelEstimate,
}

/// Everything produced for one learner turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub cri: Cri,
    pub scene_plan: ScenePlan,
    pub prompts: Vec<ScenePrompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PipelineMetadata>,
}

impl PipelineResult {
    /// Format the plan as a prompt document for a content generator.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("## Concept\n");
        prompt.push_str(&format!(
            "{} ({}), {} level, goal: {}\n",
            self.cri.concept_name, self.cri.domain, self.cri.level, self.cri.goal
        ));
        prompt.push_str(&format!(
            "Mode: {}, load budget: {}\n",
            self.cri.preferred_mode, self.cri.load_budget
        ));
        prompt.push('\n');

        if let Some(prerequisites) = &self.cri.prerequisites {
            prompt.push_str("## Prerequisites\n");
            prompt.push_str(&prerequisites.join(", "));
            prompt.push_str("\n\n");
        }

        if !self.cri.risk_misconceptions.is_empty() {
            prompt.push_str("## Watch For\n");
            for misconception in &self.cri.risk_misconceptions {
                prompt.push_str(&format!("- {}\n", misconception));
            }
            prompt.push('\n');
        }

        prompt.push_str("## Scenes\n");
        prompt.push_str(&format!("({})\n", self.scene_plan.personalization_reason));
        for (i, scene) in self.prompts.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. [{}] {}\n",
                i + 1,
                scene.scene_type,
                scene.instruction
            ));
        }

        prompt
    }
}

/// Runs queries from text to scene prompts.
#[derive(Debug, Clone)]
pub struct TutorPipeline {
    intent_detector: IntentDetector,
    resolver: ConceptResolver,
    level_estimator: LevelEstimator,
    cri_emitter: CriEmitter,
    sequencer: SceneSequencer,
    prompt_builder: PromptBuilder,
}

impl TutorPipeline {
    /// Build a pipeline, loading the ontology named in `config`.
    pub fn new(config: &TutorConfig) -> Result<Self> {
        let resolver = ConceptResolver::from_path(&config.ontology_path, config.alias_collisions)?;
        Ok(Self::with_resolver(resolver, config))
    }

    /// Build a pipeline over an ontology already in memory.
    pub fn from_ontology(ontology: Ontology, config: &TutorConfig) -> Result<Self> {
        let resolver = ConceptResolver::with_policy(ontology, config.alias_collisions)?;
        Ok(Self::with_resolver(resolver, config))
    }

    fn with_resolver(resolver: ConceptResolver, config: &TutorConfig) -> Self {
        Self {
            intent_detector: IntentDetector::new(),
            resolver,
            level_estimator: LevelEstimator::new(),
            cri_emitter: CriEmitter::from_config(config),
            sequencer: SceneSequencer::new(),
            prompt_builder: PromptBuilder::new(),
        }
    }

    /// The concept resolver in use.
    pub fn resolver(&self) -> &ConceptResolver {
        &self.resolver
    }

    /// Run one learner turn.
    ///
    /// Fails only when no concept matches the query, in which case nothing
    /// is recorded in `session`.
    pub fn resolve(&self, session: &mut LearnerSession, request: &PlanRequest) -> Result<PipelineResult> {
        let intent_detection = self.intent_detector.detect(&request.query);
        let resolution = self.resolver.resolve(&request.query)?;
        let level_estimation = self.level_estimator.estimate(&request.query);

        let cri = self.cri_emitter.emit(
            intent_detection.intent,
            &resolution.concept,
            level_estimation.level.clone(),
        );

        let scene_plan = self.sequencer.plan_sequence(
            session,
            &cri,
            request.quiz_result.clone(),
            request.user_state.as_ref(),
        );

        let prompts = self.prompt_builder.build_prompts(
            &cri.concept_name,
            &scene_plan.scene_program,
            &cri.risk_misconceptions,
        );

        tracing::info!(
            intent = %intent_detection.intent,
            concept_id = %resolution.concept_id,
            level = %level_estimation.level,
            scenes = scene_plan.scene_program.len(),
            "query planned"
        );

        let metadata = request.verbose.then(|| PipelineMetadata {
            query: request.query.clone(),
            intent_detection,
            concept_resolution: ConceptMatch {
                concept_id: resolution.concept_id.clone(),
                matched_alias: resolution.matched_alias.clone(),
            },
            level_estimation,
        });

        Ok(PipelineResult {
            cri,
            scene_plan,
            prompts,
            metadata,
        })
    }

    /// Record a quiz outcome for a concept planned earlier in `session`.
    pub fn record_feedback(&self, session: &mut LearnerSession, concept_id: &str, quiz_result: QuizResult) {
        self.sequencer.update_feedback(session, concept_id, quiz_result);
    }
}
