//! Tutor CLI
//!
//! Plans a lesson for a learner query, or walks through the feedback and
//! personalization demonstrations.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lesson_model::{Mastery, QuizResult, SceneType, UserState};
use tutor_core::{LearnerSession, PipelineResult, PlanRequest, TutorConfig, TutorPipeline};

/// Tutor - adaptive lesson planning from free-text questions
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(about = "Resolve learner questions to concepts and plan teaching scenes")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ontology JSON file (overrides the config file)
    #[arg(long, global = true)]
    ontology: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan scenes for one query
    Plan {
        /// The learner's question
        query: String,

        /// Outcome of the learner's last quiz on this concept
        #[arg(long, value_enum)]
        quiz_result: Option<QuizArg>,

        /// Learner profile as JSON, e.g. '{"concept_mastery":{"KCL-001":"weak"}}'
        #[arg(long)]
        user_state: Option<String>,

        /// Include intent, concept, and level details
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Run a demonstration flow
    Demo {
        #[arg(value_enum)]
        flow: DemoFlow,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum QuizArg {
    Correct,
    Incorrect,
}

impl From<QuizArg> for QuizResult {
    fn from(arg: QuizArg) -> Self {
        match arg {
            QuizArg::Correct => QuizResult::Correct,
            QuizArg::Incorrect => QuizResult::Incorrect,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DemoFlow {
    /// Initial plan, then remediation after a failed quiz
    Feedback,
    /// The same query under five learner profiles
    Personalization,
}

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tutor_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TutorConfig::load(path)?,
        None => TutorConfig::default(),
    };
    if let Some(path) = cli.ontology {
        config = config.with_ontology_path(path);
    }

    let pipeline = TutorPipeline::new(&config)?;

    match cli.command {
        Command::Plan {
            query,
            quiz_result,
            user_state,
            verbose,
            format,
        } => {
            let mut request = PlanRequest::new(query);
            if let Some(result) = quiz_result {
                request = request.with_quiz_result(result.into());
            }
            if let Some(json) = user_state {
                request.user_state = UserState::from_json_str(&json)?;
            }
            request.verbose = verbose;

            let mut session = LearnerSession::new();
            match pipeline.resolve(&mut session, &request) {
                Ok(result) => print_result(&result, format)?,
                Err(err) if err.is_concept_not_found() => {
                    eprintln!("Sorry, I couldn't find a concept matching '{}'.", request.query);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Demo { flow } => match flow {
            DemoFlow::Feedback => {
                demo_feedback_loop(&pipeline)?;
                demo_level_variations(&pipeline)?;
            }
            DemoFlow::Personalization => demo_personalization(&pipeline)?,
        },
    }

    Ok(())
}

fn print_result(result: &PipelineResult, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            if let Some(metadata) = &result.metadata {
                println!("## Query\n{}\n", metadata.query);
                println!(
                    "Intent: {} ({:.2}), matched alias: '{}', level: {} ({:.2})",
                    metadata.intent_detection.intent,
                    metadata.intent_detection.confidence,
                    metadata.concept_resolution.matched_alias,
                    metadata.level_estimation.level,
                    metadata.level_estimation.confidence,
                );
                println!("Level reasoning: {}\n", metadata.level_estimation.reasoning);
            }
            print!("{}", result.to_prompt_string());
        }
    }
    Ok(())
}

fn print_program(program: &[SceneType]) {
    for (i, scene) in program.iter().enumerate() {
        println!("  {}. {}", i + 1, scene);
    }
}

fn demo_feedback_loop(pipeline: &TutorPipeline) -> Result<(), Box<dyn Error>> {
    println!("{RULE}\nScene Sequencer - Feedback Loop Demo\n{RULE}\n");

    let query = "Explain KCL";
    let mut session = LearnerSession::new();

    println!("STEP 1: Initial teaching sequence\n{THIN_RULE}");
    let initial = pipeline.resolve(&mut session, &PlanRequest::new(query))?;
    println!("Concept: {}", initial.cri.concept_name);
    println!("Level: {}", initial.scene_plan.level);
    print_program(&initial.scene_plan.scene_program);
    println!();

    println!("STEP 2: Learner answers the quiz incorrectly\n{THIN_RULE}");
    pipeline.record_feedback(&mut session, &initial.cri.concept_id, QuizResult::Incorrect);
    if let Some(status) = session.entry(&initial.cri.concept_id).and_then(|e| e.status) {
        println!("Feedback status: {:?}", status);
    }
    println!();

    println!("STEP 3: Remediation sequence\n{THIN_RULE}");
    let remediation = pipeline.resolve(
        &mut session,
        &PlanRequest::new(query).with_quiz_result(QuizResult::Incorrect),
    )?;
    println!("Reason: {}", remediation.scene_plan.personalization_reason);
    print_program(&remediation.scene_plan.scene_program);
    println!();

    println!("STEP 4: Scene prompts for remediation\n{THIN_RULE}");
    for (i, prompt) in remediation.prompts.iter().enumerate() {
        println!("Scene {}: {}", i + 1, prompt.scene_type);
        println!("  -> {}", prompt.instruction);
    }
    println!("\n{RULE}\n");

    Ok(())
}

fn demo_level_variations(pipeline: &TutorPipeline) -> Result<(), Box<dyn Error>> {
    println!("{RULE}\nScene Sequencer - Level-Based Sequences\n{RULE}");

    for query in ["Explain KCL", "Derive the mathematical proof for KVL"] {
        let mut session = LearnerSession::new();
        let result = pipeline.resolve(&mut session, &PlanRequest::new(query))?;

        println!("\nQuery: '{}'\n{THIN_RULE}", query);
        println!("Detected level: {}", result.scene_plan.level);
        print_program(&result.scene_plan.scene_program);
    }
    println!("\n{RULE}");

    Ok(())
}

fn demo_personalization(pipeline: &TutorPipeline) -> Result<(), Box<dyn Error>> {
    println!("{RULE}\nScene Sequencer - Personalization Demo\n{RULE}\n");

    let query = "Explain Kirchhoff's Current Law";
    let scenarios = [
        ("Standard beginner sequence (no user state)", None),
        (
            "Learner with a recent quiz failure",
            Some(UserState::new().with_recent_quiz_result(QuizResult::Incorrect)),
        ),
        (
            "Learner with weak mastery of KCL",
            Some(UserState::new().with_mastery("KCL-001", Mastery::Weak)),
        ),
        (
            "Both a recent failure and weak mastery",
            Some(
                UserState::new()
                    .with_recent_quiz_result(QuizResult::Incorrect)
                    .with_mastery("KCL-001", Mastery::Weak),
            ),
        ),
        (
            "Strong mastery (no personalization needed)",
            Some(
                UserState::new()
                    .with_recent_quiz_result(QuizResult::Correct)
                    .with_mastery("KCL-001", Mastery::Strong),
            ),
        ),
    ];

    for (i, (title, user_state)) in scenarios.into_iter().enumerate() {
        let mut request = PlanRequest::new(query);
        if let Some(state) = user_state {
            request = request.with_user_state(state);
        }

        let mut session = LearnerSession::new();
        let result = pipeline.resolve(&mut session, &request)?;

        println!("Scenario {}: {}\n{THIN_RULE}", i + 1, title);
        print_program(&result.scene_plan.scene_program);
        println!("Reason: {}\n", result.scene_plan.personalization_reason);
    }
    println!("{RULE}");

    Ok(())
}
