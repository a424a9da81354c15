//! Modal host that shows and hides the exercise timer

use std::io::{self, Write};

use crossterm::{queue, style::Print};
use tracing::debug;

use crate::exercise::ExerciseDefinition;

/// Host container for the timer. Page scroll stays blocked while visible.
pub trait ModalHost {
    fn show(&mut self, exercise: &ExerciseDefinition);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
}

/// Prints the exercise header and the key bindings to a terminal
pub struct TerminalModal<W: Write = io::Stdout> {
    out: W,
    visible: bool,
}

impl TerminalModal<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalModal<W> {
    pub fn new(out: W) -> Self {
        Self { out, visible: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self, exercise: &ExerciseDefinition) -> io::Result<()> {
        let mut lines = vec![format!("== {} ==", exercise.title())];
        if !exercise.description().is_empty() {
            lines.push(exercise.description().to_string());
        }
        if !exercise.instruction().is_empty() {
            lines.push(exercise.instruction().to_string());
        }
        lines.push(
            "[enter/s] start  [space/p] pause/resume  [r] restart  [x] stop  [q/esc] close"
                .to_string(),
        );

        // Raw mode needs explicit carriage returns
        for line in lines {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        self.out.flush()
    }
}

impl<W: Write> ModalHost for TerminalModal<W> {
    fn show(&mut self, exercise: &ExerciseDefinition) {
        if let Err(e) = self.write_header(exercise) {
            debug!("Failed to draw modal header: {}", e);
        }
        self.visible = true;
    }

    fn hide(&mut self) {
        if self.visible {
            let closed = queue!(self.out, Print("\r\n")).and_then(|_| self.out.flush());
            if let Err(e) = closed {
                debug!("Failed to close modal: {}", e);
            }
        }
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
