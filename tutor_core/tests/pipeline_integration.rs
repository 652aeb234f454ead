//! End-to-end tests over the bundled electrical-circuits ontology.

use lesson_model::{Concept, Intent, Level, Mastery, Ontology, QuizResult, SceneType, UserState};
use tutor_core::{
    AliasCollisionPolicy, FeedbackStatus, LearnerSession, PlanRequest, ResolverError, SessionRegistry,
    TutorConfig, TutorError, TutorPipeline,
};

use SceneType::*;

const ONTOLOGY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/ontology/concepts.json");

fn pipeline() -> TutorPipeline {
    let config = TutorConfig::default().with_ontology_path(ONTOLOGY);
    TutorPipeline::new(&config).expect("bundled ontology should load")
}

#[test]
fn test_bundled_ontology_has_no_alias_collisions() {
    let config = TutorConfig {
        alias_collisions: AliasCollisionPolicy::Reject,
        ..TutorConfig::default().with_ontology_path(ONTOLOGY)
    };

    assert!(TutorPipeline::new(&config).is_ok());
}

#[test]
fn test_demo_queries_resolve() {
    let pipeline = pipeline();
    let cases = [
        ("Explain KCL", "KCL-001", "kcl"),
        ("What is Ohm's law?", "OHM-001", "ohm's law"),
        ("Review Kirchhoff's voltage law", "KVL-001", "kirchhoff's voltage law"),
        ("Test my understanding of series circuits", "SER-001", "series circuits"),
        ("Teach me about capacitors", "CAP-001", "capacitors"),
    ];

    for (query, concept_id, alias) in cases {
        let mut session = LearnerSession::new();
        let result = pipeline
            .resolve(&mut session, &PlanRequest::new(query).verbose())
            .unwrap();

        let metadata = result.metadata.expect("verbose request");
        assert_eq!(result.cri.concept_id, concept_id, "query: {query}");
        assert_eq!(metadata.concept_resolution.matched_alias, alias, "query: {query}");
    }
}

#[test]
fn test_longest_alias_beats_embedded_shorter_alias() {
    let mut session = LearnerSession::new();

    // "current" alone would resolve to CUR-001
    let result = pipeline()
        .resolve(&mut session, &PlanRequest::new("Explain Kirchhoff's Current Law"))
        .unwrap();

    assert_eq!(result.cri.concept_id, "KCL-001");
}

#[test]
fn test_review_intent_reaches_cri() {
    let mut session = LearnerSession::new();

    let result = pipeline()
        .resolve(&mut session, &PlanRequest::new("Review Kirchhoff's voltage law"))
        .unwrap();

    assert_eq!(result.cri.goal, Intent::ReviseConcept);
}

#[test]
fn test_feedback_loop_in_one_session() {
    let pipeline = pipeline();
    let mut session = LearnerSession::new();

    let first = pipeline
        .resolve(&mut session, &PlanRequest::new("Explain KCL"))
        .unwrap();
    assert_eq!(
        first.scene_plan.scene_program,
        vec![DefineConcept, VisualizeCore, WorkedExample, MiniQuiz]
    );
    assert_eq!(first.scene_plan.personalization_reason, "Standard beginner-level sequence");

    pipeline.record_feedback(&mut session, "KCL-001", QuizResult::Incorrect);
    assert_eq!(
        session.entry("KCL-001").unwrap().status,
        Some(FeedbackStatus::NeedsRemediation)
    );

    let second = pipeline
        .resolve(
            &mut session,
            &PlanRequest::new("Explain KCL").with_quiz_result(QuizResult::Incorrect),
        )
        .unwrap();
    assert_eq!(
        second.scene_plan.scene_program,
        vec![VisualizeCore, WorkedExample, CommonMistake, MiniQuiz]
    );
    assert_eq!(
        second.scene_plan.personalization_reason,
        "Remediation sequence triggered by incorrect quiz result"
    );
    assert!(second.prompts[2]
        .instruction
        .contains("'Current is consumed at a junction'"));
}

#[test]
fn test_failed_quiz_without_prior_encounter_gets_standard_plan() {
    let mut session = LearnerSession::new();

    let result = pipeline()
        .resolve(
            &mut session,
            &PlanRequest::new("Explain KCL").with_quiz_result(QuizResult::Incorrect),
        )
        .unwrap();

    assert_eq!(
        result.scene_plan.scene_program,
        vec![DefineConcept, VisualizeCore, WorkedExample, MiniQuiz]
    );
}

#[test]
fn test_sessions_are_isolated() {
    let pipeline = pipeline();
    let mut registry = SessionRegistry::new();
    let alice = registry.open();
    let bob = registry.open();

    pipeline
        .resolve(registry.session_mut(alice), &PlanRequest::new("Explain KCL"))
        .unwrap();

    let retry = PlanRequest::new("Explain KCL").with_quiz_result(QuizResult::Incorrect);
    let alice_plan = pipeline.resolve(registry.session_mut(alice), &retry).unwrap();
    let bob_plan = pipeline.resolve(registry.session_mut(bob), &retry).unwrap();

    assert!(!alice_plan.scene_plan.scene_program.contains(&DefineConcept));
    assert_eq!(bob_plan.scene_plan.scene_program[0], DefineConcept);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_personalization_scenarios() {
    let pipeline = pipeline();
    let query = "Explain Kirchhoff's Current Law";
    let plan = |state: UserState| {
        let mut session = LearnerSession::new();
        pipeline
            .resolve(&mut session, &PlanRequest::new(query).with_user_state(state))
            .unwrap()
            .scene_plan
    };

    let failed = plan(UserState::new().with_recent_quiz_result(QuizResult::Incorrect));
    assert_eq!(
        failed.scene_program,
        vec![VisualizeCore, WorkedExample, CommonMistake, MiniQuiz]
    );
    assert!(failed.personalization_reason.ends_with("due to recent quiz failure"));

    let both = plan(
        UserState::new()
            .with_recent_quiz_result(QuizResult::Incorrect)
            .with_mastery("KCL-001", Mastery::Weak),
    );
    assert_eq!(
        both.personalization_reason,
        "Personalized sequence: skipped definition, added misconception handling due to recent quiz failure and weak mastery of KCL-001"
    );

    let strong = plan(
        UserState::new()
            .with_recent_quiz_result(QuizResult::Correct)
            .with_mastery("KCL-001", Mastery::Strong),
    );
    assert_eq!(strong.scene_program[0], DefineConcept);
    assert_eq!(
        strong.personalization_reason,
        "Standard beginner-level sequence (user_state provided but no personalization needed)"
    );
}

#[test]
fn test_user_state_from_json() {
    let state = UserState::from_json_str(
        r#"{"recent_quiz_result": 1, "concept_mastery": {"KCL-001": "weak"}}"#,
    )
    .unwrap()
    .unwrap();
    let mut session = LearnerSession::new();

    let result = pipeline()
        .resolve(&mut session, &PlanRequest::new("Explain KCL").with_user_state(state))
        .unwrap();

    assert!(result
        .scene_plan
        .personalization_reason
        .ends_with("due to weak mastery of KCL-001"));
}

#[test]
fn test_supplied_user_state_outranks_failed_quiz_replay() {
    let pipeline = pipeline();
    let mut session = LearnerSession::new();

    pipeline
        .resolve(&mut session, &PlanRequest::new("Explain KCL"))
        .unwrap();

    for json in [
        r#"{"concept_mastery": {}}"#,
        r#"{"recent_quiz_result": null}"#,
        r#"{"favourite_colour": "blue"}"#,
    ] {
        let state = UserState::from_json_str(json).unwrap().unwrap();
        let request = PlanRequest::new("Explain KCL")
            .with_quiz_result(QuizResult::Incorrect)
            .with_user_state(state);

        let plan = pipeline.resolve(&mut session, &request).unwrap().scene_plan;

        assert_eq!(plan.scene_program[0], DefineConcept, "user state: {json}");
        assert!(
            plan.personalization_reason.ends_with("(user_state provided but no personalization needed)"),
            "user state: {json}"
        );
    }
}

#[test]
fn test_empty_user_state_object_is_not_supplied() {
    let pipeline = pipeline();
    let mut session = LearnerSession::new();

    pipeline
        .resolve(&mut session, &PlanRequest::new("Explain KCL"))
        .unwrap();

    let mut request = PlanRequest::new("Explain KCL").with_quiz_result(QuizResult::Incorrect);
    request.user_state = UserState::from_json_str("{}").unwrap();
    let plan = pipeline.resolve(&mut session, &request).unwrap().scene_plan;

    assert_eq!(
        plan.personalization_reason,
        "Remediation sequence triggered by incorrect quiz result"
    );
}

#[test]
fn test_advanced_query_skips_definition() {
    let mut session = LearnerSession::new();

    let result = pipeline()
        .resolve(
            &mut session,
            &PlanRequest::new("Derive the mathematical proof for KVL").verbose(),
        )
        .unwrap();

    assert_eq!(result.cri.concept_id, "KVL-001");
    assert_eq!(result.cri.level, Level::Advanced);
    assert_eq!(
        result.scene_plan.scene_program,
        vec![WorkedExample, CommonMistake, MiniQuiz]
    );
    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.level_estimation.confidence, 0.8);
}

#[test]
fn test_unknown_concept() {
    let mut session = LearnerSession::new();

    let err = pipeline()
        .resolve(&mut session, &PlanRequest::new("Explain quantum entanglement"))
        .unwrap_err();

    assert!(err.is_concept_not_found());
    assert_eq!(
        err.to_string(),
        "No matching concept found for query: 'Explain quantum entanglement'"
    );
    assert!(session.is_empty());
}

#[test]
fn test_json_output_shape() {
    let pipeline = pipeline();
    let mut session = LearnerSession::new();

    let plain = pipeline
        .resolve(&mut session, &PlanRequest::new("Teach me about capacitors"))
        .unwrap();
    let json = serde_json::to_value(&plain).unwrap();

    assert!(json.get("metadata").is_none());
    assert_eq!(json["cri"]["goal"], "teach_concept");
    assert_eq!(json["cri"]["prerequisites"][0], "CUR-001");
    assert_eq!(json["scene_plan"]["scene_program"][0], "define_concept");
    assert_eq!(json["prompts"][0]["scene_type"], "define_concept");
}

#[test]
fn test_config_overrides_reach_cri() {
    let config = TutorConfig::from_toml_str(&format!(
        "ontology_path = \"{ONTOLOGY}\"\npreferred_mode = \"verbal\"\nload_budget = 5\n"
    ))
    .unwrap();
    let mut session = LearnerSession::new();

    let result = TutorPipeline::new(&config)
        .unwrap()
        .resolve(&mut session, &PlanRequest::new("Explain KCL"))
        .unwrap();

    assert_eq!(result.cri.preferred_mode, "verbal");
    assert_eq!(result.cri.load_budget, 5);
    assert_eq!(result.scene_plan.load_budget, 5);
}

#[test]
fn test_reject_policy_fails_on_collision() {
    let ontology = Ontology::from_concepts([
        Concept::new("KVL-001", "Kirchhoff's Voltage Law", "Electrical Circuits").with_alias("loop rule"),
        Concept::new("MESH-001", "Mesh Analysis", "Electrical Circuits").with_alias("Loop Rule"),
    ]);
    let config = TutorConfig {
        alias_collisions: AliasCollisionPolicy::Reject,
        ..TutorConfig::default()
    };

    let err = TutorPipeline::from_ontology(ontology, &config).unwrap_err();

    assert!(matches!(
        err,
        TutorError::Resolver(ResolverError::AliasCollision { .. })
    ));
}

#[test]
fn test_missing_ontology_file() {
    let config = TutorConfig::default().with_ontology_path("/nonexistent/concepts.json");

    let err = TutorPipeline::new(&config).unwrap_err();

    assert!(matches!(err, TutorError::Resolver(ResolverError::Ontology(_))));
}
