//! Background task that owns a timer and its recurring one-second tick

use std::{future, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    audio::ToneFacility,
    render::RenderSurface,
    state::{ExerciseTimer, TimerSnapshot, TimerStatus},
};

/// Host input routed to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Resume,
    TogglePause,
    Restart,
    Stop,
    /// Modal teardown: stop the run and end the task
    Close,
}

enum Wake {
    Tick,
    Command(Option<TimerCommand>),
}

/// A scheduled recurring tick. Dropping it cancels the schedule.
pub struct ActiveTick {
    interval: Interval,
}

impl ActiveTick {
    /// Schedule ticks every `period`, the first one a full period from now
    pub fn acquire(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Slot for the single active tick of a timer
pub struct TickSlot {
    period: Duration,
    active: Option<ActiveTick>,
}

impl TickSlot {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.active.is_some()
    }

    /// Hold a tick exactly while the timer is running
    pub fn sync(&mut self, running: bool) {
        if running && self.active.is_none() {
            debug!("Scheduling recurring tick every {:?}", self.period);
            self.active = Some(ActiveTick::acquire(self.period));
        } else if !running {
            self.release();
        }
    }

    /// Cancel the tick; a no-op when nothing is scheduled
    pub fn release(&mut self) {
        if self.active.take().is_some() {
            debug!("Cancelled recurring tick");
        }
    }

    /// Resolve on the next tick, or never when nothing is scheduled
    pub async fn next(&mut self) {
        match self.active.as_mut() {
            Some(tick) => tick.tick().await,
            None => future::pending::<()>().await,
        }
    }
}

/// Outcome of a finished ticker task
pub struct TickerOutcome<S, T> {
    pub timer: ExerciseTimer<S, T>,
    /// Snapshot taken just before the closing stop
    pub last_snapshot: TimerSnapshot,
    pub completed_runs: u32,
    /// Seconds covered by the latest run; a full run counts its total
    pub elapsed_total_seconds: u32,
}

/// Run `timer` until a close command arrives or every sender is dropped
pub async fn exercise_ticker_task<S, T>(
    mut timer: ExerciseTimer<S, T>,
    mut commands: mpsc::Receiver<TimerCommand>,
    updates: &watch::Sender<TimerSnapshot>,
    period: Duration,
) -> TickerOutcome<S, T>
where
    S: RenderSurface,
    T: ToneFacility,
{
    info!("Starting exercise ticker for '{}'", timer.exercise().id());

    let mut slot = TickSlot::new(period);
    let mut completed_runs = 0;
    let mut elapsed_total_seconds = 0;

    loop {
        let before = timer.status();

        let wake = tokio::select! {
            _ = slot.next() => Wake::Tick,
            command = commands.recv() => Wake::Command(command),
        };

        match wake {
            Wake::Tick => {
                timer.tick();
            }
            Wake::Command(Some(TimerCommand::Close)) | Wake::Command(None) => {
                debug!("Close requested for '{}'", timer.exercise().id());
                break;
            }
            Wake::Command(Some(command)) => {
                if command == TimerCommand::Start && timer.status() == TimerStatus::Idle {
                    slot.release();
                }
                apply_command(&mut timer, command);
            }
        }

        slot.sync(timer.state().is_running());

        match timer.status() {
            TimerStatus::Completed if before != TimerStatus::Completed => {
                completed_runs += 1;
                elapsed_total_seconds = timer.exercise().total_duration_seconds();
            }
            TimerStatus::Running | TimerStatus::Paused => {
                elapsed_total_seconds = timer.state().elapsed_total_seconds;
            }
            TimerStatus::Idle | TimerStatus::Completed => {}
        }

        if let Err(e) = updates.send(timer.snapshot()) {
            debug!("No timer observers left: {}", e);
        }
    }

    slot.release();
    let last_snapshot = timer.snapshot();
    timer.stop();
    if let Err(e) = updates.send(timer.snapshot()) {
        debug!("No timer observers left: {}", e);
    }

    info!("Exercise ticker for '{}' finished", timer.exercise().id());
    TickerOutcome {
        timer,
        last_snapshot,
        completed_runs,
        elapsed_total_seconds,
    }
}

fn apply_command<S, T>(timer: &mut ExerciseTimer<S, T>, command: TimerCommand) -> bool
where
    S: RenderSurface,
    T: ToneFacility,
{
    match command {
        TimerCommand::Start => timer.start(),
        TimerCommand::Pause => timer.pause(),
        TimerCommand::Resume => timer.resume(),
        TimerCommand::TogglePause => timer.toggle_pause(),
        TimerCommand::Restart => timer.restart(),
        TimerCommand::Stop | TimerCommand::Close => timer.stop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slot_release_is_idempotent() {
        let mut slot = TickSlot::new(Duration::from_secs(1));
        slot.release();
        slot.sync(true);
        assert!(slot.is_scheduled());
        slot.sync(true);
        assert!(slot.is_scheduled());
        slot.release();
        slot.release();
        assert!(!slot.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_one_period_out() {
        let start = Instant::now();
        let mut tick = ActiveTick::acquire(Duration::from_secs(1));
        tick.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        tick.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_slot_never_fires() {
        let mut slot = TickSlot::new(Duration::from_secs(1));
        let fired = tokio::time::timeout(Duration::from_secs(5), slot.next()).await;
        assert!(fired.is_err());
    }
}
