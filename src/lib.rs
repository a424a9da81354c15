//! MindCare - guided breathing and grounding exercise timer
//!
//! This library drives exercise definitions through their timed phases,
//! rendering a countdown and firing audio cues through host-provided
//! surfaces, with pause, resume, restart and stop.

pub mod audio;
pub mod config;
pub mod exercise;
pub mod modal;
pub mod render;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use exercise::{Catalog, ExerciseDefinition};
pub use state::{ExerciseTimer, TimerState, TimerStatus};
pub use tasks::{ExerciseSession, TimerCommand};
pub use utils::signals::shutdown_signal;
