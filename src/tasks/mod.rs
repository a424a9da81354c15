//! Background tasks module
//!
//! This module contains the task that drives an exercise timer and the
//! session handle used by hosts.

pub mod session;
pub mod ticker;

// Re-export main types
pub use session::{ExerciseSession, SessionError, SessionReport};
pub use ticker::{exercise_ticker_task, ActiveTick, TickSlot, TimerCommand};
