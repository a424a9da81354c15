//! Exercise definitions module
//!
//! This module contains the immutable exercise data the timer runs: phases,
//! cue tags, validated definitions and the catalog they are loaded from.

pub mod catalog;
pub mod definition;
pub mod phase;

// Re-export main types
pub use catalog::{Catalog, CatalogError};
pub use definition::{DefinitionError, ExerciseDefinition};
pub use phase::{CueTag, ExercisePhase};
