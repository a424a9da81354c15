//! The exercise timer state machine
//!
//! `Idle → Running ⇄ Paused`, `Running → Completed`, and restart/stop from
//! anywhere back to `Idle`. Every operation is synchronous; scheduling the
//! one-second tick is left to the caller (see [`crate::tasks::ticker`]),
//! which keeps a tick scheduled exactly while [`TimerState::running`] is set.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::{Controls, TimerState, TimerStatus};
use crate::{
    audio::ToneFacility,
    exercise::{CueTag, ExerciseDefinition},
    render::{Element, ProgressRing, RenderError, RenderSurface},
};

/// Phase text shown before the first start
pub const PLACEHOLDER_TEXT: &str = "Ready?";
/// Phase text shown once every phase has run
pub const COMPLETION_TEXT: &str = "Done! Well done ✨";

/// Countdown seconds at which a tick cue plays (non-final phases only)
const TICK_CUE_WINDOW: u32 = 3;

/// Point-in-time view of a timer, published to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub exercise_id: String,
    pub status: TimerStatus,
    pub state: TimerState,
    pub phase_label: String,
    pub ring_fraction: f64,
    pub controls: Controls,
}

/// Drives one exercise definition through its phases
pub struct ExerciseTimer<S, T> {
    exercise: Arc<ExerciseDefinition>,
    state: TimerState,
    status: TimerStatus,
    controls: Controls,
    ring: ProgressRing,
    surface: S,
    tone: T,
}

impl<S: RenderSurface, T: ToneFacility> ExerciseTimer<S, T> {
    /// Create an idle timer and draw the pre-start placeholder
    pub fn new(exercise: Arc<ExerciseDefinition>, surface: S, tone: T) -> Self {
        let mut timer = Self {
            state: TimerState::initial(&exercise),
            exercise,
            status: TimerStatus::Idle,
            controls: Controls::pre_start(),
            ring: ProgressRing::default(),
            surface,
            tone,
        };
        timer.render_placeholder();
        timer
    }

    pub fn exercise(&self) -> &ExerciseDefinition {
        &self.exercise
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    /// Fraction of the progress ring currently filled
    pub fn ring_fraction(&self) -> f64 {
        match self.status {
            TimerStatus::Completed => 1.0,
            _ => self.state.progress_fraction(&self.exercise),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let phase_label = match self.status {
            TimerStatus::Idle => PLACEHOLDER_TEXT.to_string(),
            TimerStatus::Completed => COMPLETION_TEXT.to_string(),
            TimerStatus::Running | TimerStatus::Paused => {
                self.exercise.phase(self.state.phase_index).label.clone()
            }
        };
        TimerSnapshot {
            exercise_id: self.exercise.id().to_string(),
            status: self.status,
            state: self.state,
            phase_label,
            ring_fraction: self.ring_fraction(),
            controls: self.controls,
        }
    }

    /// Begin a run from phase 0. Only valid while idle.
    pub fn start(&mut self) -> bool {
        if self.status != TimerStatus::Idle {
            debug!("Ignoring start while {}", self.status.as_str());
            return false;
        }

        self.state = TimerState {
            running: true,
            ..TimerState::initial(&self.exercise)
        };
        self.status = TimerStatus::Running;
        self.controls = Controls::running();

        info!(
            "Starting exercise '{}' ({} phases, {}s)",
            self.exercise.id(),
            self.exercise.phase_count(),
            self.exercise.total_duration_seconds()
        );
        self.render_frame();
        self.cue(self.current_cue());
        true
    }

    /// Advance by one second. Ignored unless running.
    pub fn tick(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }

        self.state.elapsed_total_seconds += 1;
        self.state.seconds_remaining_in_phase =
            self.state.seconds_remaining_in_phase.saturating_sub(1);

        let index = self.state.phase_index;
        let last_phase = self.exercise.is_last_phase(index);

        if self.state.seconds_remaining_in_phase > 0 {
            self.render_frame();
            if !last_phase && self.state.seconds_remaining_in_phase <= TICK_CUE_WINDOW {
                self.cue(CueTag::Tick);
            }
            return true;
        }

        if last_phase {
            self.complete();
            return true;
        }

        self.state.phase_index = index + 1;
        self.state.seconds_remaining_in_phase =
            self.exercise.phase(index + 1).duration_seconds;
        debug!(
            "Exercise '{}' entering phase {} ('{}')",
            self.exercise.id(),
            index + 1,
            self.exercise.phase(index + 1).label
        );
        self.render_frame();
        self.cue(self.current_cue());
        true
    }

    /// Freeze the countdown. Only valid while running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            debug!("Ignoring pause while {}", self.status.as_str());
            return false;
        }

        self.state.running = false;
        self.status = TimerStatus::Paused;
        self.controls = Controls::paused();
        info!(
            "Paused '{}' with {}s left in phase {}",
            self.exercise.id(),
            self.state.seconds_remaining_in_phase,
            self.state.phase_index
        );
        true
    }

    /// Continue from where the pause left off. Only valid while paused.
    pub fn resume(&mut self) -> bool {
        if self.status != TimerStatus::Paused {
            debug!("Ignoring resume while {}", self.status.as_str());
            return false;
        }

        self.state.running = true;
        self.status = TimerStatus::Running;
        self.controls = Controls::running();
        info!("Resumed '{}'", self.exercise.id());
        self.render_frame();
        self.cue(self.current_cue());
        true
    }

    /// The single pause/resume button
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            TimerStatus::Running => self.pause(),
            TimerStatus::Paused => self.resume(),
            TimerStatus::Idle | TimerStatus::Completed => false,
        }
    }

    /// Discard the run and return to idle, keeping button labels
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.controls = self.controls.after_restart();
        info!("Restarted '{}'", self.exercise.id());
        true
    }

    /// Discard the run and restore the pre-start buttons
    pub fn stop(&mut self) -> bool {
        self.reset();
        self.controls = Controls::pre_start();
        info!("Stopped '{}'", self.exercise.id());
        true
    }

    fn reset(&mut self) {
        self.state = TimerState::initial(&self.exercise);
        self.status = TimerStatus::Idle;
        self.render_placeholder();
    }

    /// The finished run's counters are discarded; the ring stays full
    fn complete(&mut self) {
        self.state = TimerState::initial(&self.exercise);
        self.status = TimerStatus::Completed;
        self.controls = Controls::completed();

        Self::apply(self.surface.set_text(Element::PhaseText, COMPLETION_TEXT));
        Self::apply(self.surface.set_text(Element::SecondsText, "0"));
        Self::apply(self.surface.set_ring_offset(self.ring.offset_for(1.0)));
        Self::apply(self.surface.present());

        info!("Exercise '{}' completed", self.exercise.id());
        self.cue(CueTag::Complete);
    }

    fn current_cue(&self) -> CueTag {
        self.exercise.phase(self.state.phase_index).cue
    }

    /// Ring, phase label and color, remaining seconds
    fn render_frame(&mut self) {
        let phase = self.exercise.phase(self.state.phase_index);
        let offset = self.ring.offset_for(self.state.progress_fraction(&self.exercise));

        Self::apply(self.surface.set_ring_offset(offset));
        Self::apply(self.surface.set_text(Element::PhaseText, &phase.label));
        Self::apply(
            self.surface
                .set_color(Element::PhaseText, Some(&phase.display_color)),
        );
        Self::apply(
            self.surface
                .set_color(Element::ProgressRing, Some(&phase.display_color)),
        );
        Self::apply(self.surface.set_text(
            Element::SecondsText,
            &self.state.seconds_remaining_in_phase.to_string(),
        ));
        Self::apply(self.surface.present());
    }

    fn render_placeholder(&mut self) {
        Self::apply(self.surface.set_text(Element::PhaseText, PLACEHOLDER_TEXT));
        Self::apply(self.surface.set_color(Element::PhaseText, None));
        Self::apply(self.surface.set_color(Element::ProgressRing, None));
        Self::apply(self.surface.set_text(Element::SecondsText, "0"));
        Self::apply(self.surface.set_ring_offset(self.ring.offset_for(0.0)));
        Self::apply(self.surface.present());
    }

    /// Render failures leave the timer untouched
    fn apply(result: Result<(), RenderError>) {
        if let Err(e) = result {
            debug!("Skipping render update: {}", e);
        }
    }

    fn cue(&mut self, cue: CueTag) {
        if let Err(e) = self.tone.play(cue) {
            debug!("Cue '{}' not played: {}", cue, e);
        }
    }
}
