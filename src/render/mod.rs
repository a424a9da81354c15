//! Rendering surface module
//!
//! The timer never draws anything itself. It writes through a
//! [`RenderSurface`], which owns the phase text, the seconds text and the
//! circular progress ring.

pub mod terminal;

use std::fmt;

use thiserror::Error;

pub use terminal::TerminalSurface;

/// Circumference of the progress ring (2π · 45)
pub const RING_CIRCUMFERENCE: f64 = 283.0;

/// Elements a surface may own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    PhaseText,
    SecondsText,
    ProgressRing,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::PhaseText => "phase text",
            Element::SecondsText => "seconds text",
            Element::ProgressRing => "progress ring",
        };
        f.write_str(name)
    }
}

/// Rendering failures. None of them are fatal to a running timer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render element missing: {0}")]
    MissingElement(Element),

    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Update contract of the host's rendering surface
pub trait RenderSurface {
    /// Replace the text of a text element
    fn set_text(&mut self, element: Element, text: &str) -> Result<(), RenderError>;

    /// Set the foreground/stroke color of an element; `None` restores the default
    fn set_color(&mut self, element: Element, color: Option<&str>) -> Result<(), RenderError>;

    /// Set the ring's stroke offset, `0.0` is a full ring
    fn set_ring_offset(&mut self, offset: f64) -> Result<(), RenderError>;

    /// Called once after every batch of updates
    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Maps progress fractions to stroke offsets and back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    circumference: f64,
}

impl ProgressRing {
    pub fn new(circumference: f64) -> Self {
        Self { circumference }
    }

    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    /// Stroke offset for a completed fraction in `0.0..=1.0`
    pub fn offset_for(&self, fraction: f64) -> f64 {
        self.circumference * (1.0 - fraction.clamp(0.0, 1.0))
    }

    /// Completed fraction represented by a stroke offset
    pub fn fraction_for(&self, offset: f64) -> f64 {
        if self.circumference <= 0.0 {
            return 0.0;
        }
        (1.0 - offset / self.circumference).clamp(0.0, 1.0)
    }
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self::new(RING_CIRCUMFERENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_offsets_span_the_circumference() {
        let ring = ProgressRing::default();
        assert_eq!(ring.offset_for(0.0), RING_CIRCUMFERENCE);
        assert_eq!(ring.offset_for(1.0), 0.0);
        assert_eq!(ring.offset_for(1.5), 0.0);
        assert!((ring.fraction_for(ring.offset_for(0.25)) - 0.25).abs() < 1e-9);
    }
}
