//! MindCare - guided breathing and grounding exercise timer
//!
//! This is the terminal host: it plays the modal, the rendering surface and
//! the tone facility, and forwards key presses to the timer.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::{info, warn};

use mindcare::{
    audio::{Muted, TerminalBell, ToneFacility},
    config::Config,
    exercise::Catalog,
    modal::TerminalModal,
    render::TerminalSurface,
    state::TimerStatus,
    tasks::{ExerciseSession, TimerCommand},
    utils::{command_for_key, shutdown_signal, RawModeGuard},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they do not tear the status line
    tracing_subscriber::fmt()
        .with_env_filter(format!("mindcare={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };

    let exercise_id = match (&config.exercise, config.list) {
        (Some(id), false) => id,
        _ => {
            for exercise in catalog.iter() {
                println!(
                    "{:<20} {:<28} {:>4}s  {}",
                    exercise.id(),
                    exercise.title(),
                    exercise.total_duration_seconds(),
                    exercise.description()
                );
            }
            return Ok(());
        }
    };

    let exercise = catalog
        .get(exercise_id)
        .cloned()
        .ok_or_else(|| anyhow!("unknown exercise '{}', see --list", exercise_id))?;

    info!(
        "Opening '{}' with tick period {:?}",
        exercise.id(),
        config.tick_period()
    );

    let tone: Box<dyn ToneFacility + Send> = if config.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::stdout())
    };

    // Without a tty there is no key input; an autostarted run still completes
    let raw_mode = match RawModeGuard::enable() {
        Ok(guard) => Some(guard),
        Err(e) if config.autostart => {
            warn!("Single-key input unavailable: {}", e);
            None
        }
        Err(e) => return Err(e).context("key input needs a terminal, or pass --autostart"),
    };

    let session = ExerciseSession::open(
        Arc::new(exercise),
        TerminalSurface::stdout().with_color(!config.no_color),
        tone,
        TerminalModal::stdout(),
        config.tick_period(),
    );

    if config.autostart {
        session.send(TimerCommand::Start).await?;
    }

    let mut updates = session.updates();
    let mut keys = EventStream::new();
    let mut input_open = raw_mode.is_some();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = keys.next(), if input_open => {
                match event {
                    Some(Ok(Event::Key(key))) => match command_for_key(key) {
                        Some(TimerCommand::Close) => break,
                        Some(command) => session.send(command).await?,
                        None => {}
                    },
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Stopped reading keys: {}", e);
                        input_open = false;
                    }
                    None => {
                        input_open = false;
                    }
                }
                if !input_open {
                    let running = updates.borrow().status == TimerStatus::Running;
                    if !running && !config.autostart {
                        info!("Input closed");
                        break;
                    }
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let completed = updates.borrow_and_update().status == TimerStatus::Completed;
                if completed && !config.keep_open {
                    break;
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let report = session.close().await?;
    drop(raw_mode);
    info!(
        "Session '{}' closed: {} completed run(s), {}s elapsed, status {}",
        report.exercise_id,
        report.completed_runs,
        report.elapsed_total_seconds,
        report.final_status.as_str()
    );
    Ok(())
}
