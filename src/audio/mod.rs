//! Tone facility module
//!
//! Cue playback is best-effort: the timer calls [`ToneFacility::play`] and
//! discards any error.

pub mod bell;

use thiserror::Error;

use crate::exercise::CueTag;

pub use bell::{Muted, TerminalBell};

/// Why a cue could not be played
#[derive(Debug, Error)]
pub enum ToneError {
    #[error("audio unavailable: {0}")]
    Unavailable(String),

    #[error("audio output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Host facility that turns a cue tag into sound
pub trait ToneFacility {
    fn play(&mut self, cue: CueTag) -> Result<(), ToneError>;
}

impl<T: ToneFacility + ?Sized> ToneFacility for Box<T> {
    fn play(&mut self, cue: CueTag) -> Result<(), ToneError> {
        (**self).play(cue)
    }
}

/// Number of bell strokes a cue rings; completion is a three-note chime
pub fn strokes_for(cue: CueTag) -> usize {
    match cue {
        CueTag::Complete => 3,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completion_rings_more_than_once() {
        for cue in CueTag::ALL {
            let expected = if cue == CueTag::Complete { 3 } else { 1 };
            assert_eq!(strokes_for(cue), expected, "{}", cue);
        }
    }
}
