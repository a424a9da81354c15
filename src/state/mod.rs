//! State management module
//!
//! This module contains the timer's state structures and the state machine
//! that mutates them.

pub mod controls;
pub mod exercise_timer;
pub mod timer_state;

// Re-export main types
pub use controls::Controls;
pub use exercise_timer::{ExerciseTimer, TimerSnapshot, COMPLETION_TEXT, PLACEHOLDER_TEXT};
pub use timer_state::{TimerState, TimerStatus};
