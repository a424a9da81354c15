//! Timer state structure and management

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseDefinition;

/// Lifecycle of one timer run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }
}

/// Counters of the active run
///
/// `elapsed_total_seconds` always equals the durations of the completed
/// phases plus the part of the current phase already spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase_index: usize,
    pub seconds_remaining_in_phase: u32,
    pub elapsed_total_seconds: u32,
    pub running: bool,
}

impl TimerState {
    /// State before the first tick: phase 0 at full duration
    pub fn initial(exercise: &ExerciseDefinition) -> Self {
        Self {
            phase_index: 0,
            seconds_remaining_in_phase: exercise.phase(0).duration_seconds,
            elapsed_total_seconds: 0,
            running: false,
        }
    }

    /// Check if a recurring tick should be scheduled
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed seconds derived from the phase position
    pub fn expected_elapsed(&self, exercise: &ExerciseDefinition) -> u32 {
        let current = exercise.phase(self.phase_index).duration_seconds;
        exercise.seconds_before_phase(self.phase_index)
            + current.saturating_sub(self.seconds_remaining_in_phase)
    }

    pub fn is_consistent_with(&self, exercise: &ExerciseDefinition) -> bool {
        self.phase_index < exercise.phase_count()
            && self.seconds_remaining_in_phase <= exercise.phase(self.phase_index).duration_seconds
            && self.elapsed_total_seconds == self.expected_elapsed(exercise)
    }

    /// Fraction of the whole exercise already elapsed
    pub fn progress_fraction(&self, exercise: &ExerciseDefinition) -> f64 {
        let total = exercise.total_duration_seconds();
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.elapsed_total_seconds) / f64::from(total)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Catalog;

    #[test]
    fn initial_state_is_consistent() {
        let catalog = Catalog::builtin().unwrap();
        for exercise in catalog.iter() {
            let state = TimerState::initial(exercise);
            assert!(!state.is_running());
            assert!(state.is_consistent_with(exercise));
            assert_eq!(state.progress_fraction(exercise), 0.0);
        }
    }

    #[test]
    fn elapsed_follows_phase_position() {
        let catalog = Catalog::builtin().unwrap();
        let exercise = catalog.get("breathing-478").unwrap();
        let state = TimerState {
            phase_index: 1,
            seconds_remaining_in_phase: 5,
            elapsed_total_seconds: 6,
            running: true,
        };
        assert_eq!(state.expected_elapsed(exercise), 6);
        assert!(state.is_consistent_with(exercise));
        assert!(!TimerState { elapsed_total_seconds: 7, ..state }.is_consistent_with(exercise));
    }
}
