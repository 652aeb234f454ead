//! # Lesson Model
//!
//! The "Curriculum Bible" crate - holds the concept ontology, the scene
//! archetype catalog, and the records exchanged between pipeline stages.
//! This crate is the single source of truth for lesson data and does not
//! contain any resolution or sequencing logic.

pub mod cri;
pub mod learner;
pub mod ontology;
pub mod scenes;

pub use cri::*;
pub use learner::*;
pub use ontology::*;
pub use scenes::*;
