//! One open exercise modal: a timer task plus the handle the host talks to

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{info, warn};

use super::ticker::{exercise_ticker_task, TimerCommand};
use crate::{
    audio::ToneFacility,
    exercise::ExerciseDefinition,
    modal::ModalHost,
    render::RenderSurface,
    state::{ExerciseTimer, TimerSnapshot, TimerStatus},
};

const COMMAND_BUFFER: usize = 16;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("exercise session is closed")]
    Closed,

    #[error("exercise session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Summary returned when a session closes
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub exercise_id: String,
    /// Status right before the closing stop
    pub final_status: TimerStatus,
    /// Seconds covered by the latest run
    pub elapsed_total_seconds: u32,
    pub completed_runs: u32,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
}

/// Handle to a running exercise session
pub struct ExerciseSession {
    commands: mpsc::Sender<TimerCommand>,
    updates: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<SessionReport>,
}

impl ExerciseSession {
    /// Show the modal and spawn the timer task for `exercise`
    pub fn open<S, T, M>(
        exercise: Arc<ExerciseDefinition>,
        surface: S,
        tone: T,
        mut modal: M,
        period: Duration,
    ) -> Self
    where
        S: RenderSurface + Send + 'static,
        T: ToneFacility + Send + 'static,
        M: ModalHost + Send + 'static,
    {
        let opened_at = Utc::now();
        modal.show(&exercise);

        let timer = ExerciseTimer::new(exercise, surface, tone);
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (update_tx, updates) = watch::channel(timer.snapshot());

        info!("Opened exercise session '{}'", timer.exercise().id());

        let task = tokio::spawn(async move {
            let outcome = exercise_ticker_task(timer, command_rx, &update_tx, period).await;
            modal.hide();

            let report = SessionReport {
                exercise_id: outcome.last_snapshot.exercise_id.clone(),
                final_status: outcome.last_snapshot.status,
                elapsed_total_seconds: outcome.elapsed_total_seconds,
                completed_runs: outcome.completed_runs,
                opened_at,
                closed_at: Utc::now(),
            };
            info!(
                "Closed exercise session '{}' after {} completed run(s)",
                report.exercise_id, report.completed_runs
            );
            drop(update_tx);
            report
        });

        Self {
            commands,
            updates,
            task,
        }
    }

    /// Forward a host command to the timer
    pub async fn send(&self, command: TimerCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.updates.borrow().clone()
    }

    /// Subscribe to snapshot updates
    pub fn updates(&self) -> watch::Receiver<TimerSnapshot> {
        self.updates.clone()
    }

    /// Close the modal, cancelling any scheduled tick
    pub async fn close(self) -> Result<SessionReport, SessionError> {
        if self.commands.send(TimerCommand::Close).await.is_err() {
            warn!("Exercise session already shut down before close");
        }
        Ok(self.task.await?)
    }
}
