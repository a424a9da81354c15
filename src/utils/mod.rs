//! Utility functions module
//!
//! This module contains terminal key handling and signal handling used by
//! the binary.

pub mod input;
pub mod signals;

// Re-export main functions
pub use input::{command_for_key, RawModeGuard};
pub use signals::shutdown_signal;
