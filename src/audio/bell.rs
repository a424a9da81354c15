//! Terminal tone facilities

use std::io::{self, Write};

use tracing::trace;

use super::{strokes_for, ToneError, ToneFacility};
use crate::exercise::CueTag;

/// Rings the terminal bell for each cue
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ToneFacility for TerminalBell<W> {
    fn play(&mut self, cue: CueTag) -> Result<(), ToneError> {
        let strokes = strokes_for(cue);
        trace!("Cue {}: {} bell stroke(s)", cue, strokes);
        self.out.write_all(&vec![0x07; strokes])?;
        self.out.flush()?;
        Ok(())
    }
}

/// Tone facility for hosts without audio
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl ToneFacility for Muted {
    fn play(&mut self, cue: CueTag) -> Result<(), ToneError> {
        Err(ToneError::Unavailable(format!("muted, skipping '{}' cue", cue)))
    }
}
