//! # Tutor Core
//!
//! The "brain" of the lesson planner. This crate reads the ontology and scene
//! catalog from `lesson_model`, works out which concept a learner is asking
//! about, and plans an adaptive sequence of teaching scenes for it.
//!
//! ## Core Components
//!
//! - **concept_resolver**: Longest-alias matching from free text to a concept
//! - **scene_sequencer**: Level templates adjusted by quiz feedback and mastery
//! - **pipeline**: Intent, concept, level, CRI, scenes, and prompts in one call
//!
//! ## Design Philosophy
//!
//! - **Caller-Owned State**: Learner history lives in a session the caller
//!   passes in; components hold nothing between calls
//! - **Deterministic**: The same query and session always produce the same plan
//! - **Permissive Input**: Unknown levels, mastery values, and quiz outcomes
//!   fall back to defaults instead of failing

pub mod concept_resolver;
pub mod config;
pub mod cri_emitter;
pub mod error;
pub mod intent;
pub mod level;
pub mod pipeline;
pub mod prompts;
pub mod scene_sequencer;

pub use concept_resolver::*;
pub use config::*;
pub use cri_emitter::*;
pub use error::{Result, TutorError};
pub use intent::*;
pub use level::*;
pub use pipeline::*;
pub use prompts::*;
pub use scene_sequencer::*;
