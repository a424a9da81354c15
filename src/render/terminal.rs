//! Single-line terminal rendering of the exercise timer

use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::{Element, ProgressRing, RenderError, RenderSurface};

const BAR_WIDTH: usize = 24;

/// Redraws one status line: phase label, remaining seconds and a progress bar
pub struct TerminalSurface<W: Write = io::Stdout> {
    out: W,
    ring: ProgressRing,
    phase_text: String,
    seconds_text: String,
    phase_color: Option<Color>,
    ring_offset: f64,
    color_enabled: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        let ring = ProgressRing::default();
        Self {
            out,
            ring,
            phase_text: String::new(),
            seconds_text: String::new(),
            phase_color: None,
            ring_offset: ring.circumference(),
            color_enabled: true,
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&self) -> String {
        let fraction = self.ring.fraction_for(self.ring_offset);
        let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        format!(
            " {:>3}s [{}{}] {:>3.0}%",
            self.seconds_text,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            fraction * 100.0
        )
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn set_text(&mut self, element: Element, text: &str) -> Result<(), RenderError> {
        match element {
            Element::PhaseText => self.phase_text = text.to_string(),
            Element::SecondsText => self.seconds_text = text.to_string(),
            Element::ProgressRing => return Err(RenderError::MissingElement(element)),
        }
        Ok(())
    }

    fn set_color(&mut self, element: Element, color: Option<&str>) -> Result<(), RenderError> {
        match element {
            Element::PhaseText | Element::ProgressRing => {
                self.phase_color = color.and_then(parse_color);
                Ok(())
            }
            Element::SecondsText => Err(RenderError::MissingElement(element)),
        }
    }

    fn set_ring_offset(&mut self, offset: f64) -> Result<(), RenderError> {
        self.ring_offset = offset;
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        match self.phase_color {
            Some(color) if self.color_enabled => queue!(
                self.out,
                SetForegroundColor(color),
                Print(format!("{:<32}", self.phase_text)),
                ResetColor
            )?,
            _ => queue!(self.out, Print(format!("{:<32}", self.phase_text)))?,
        }
        let status = self.status();
        queue!(self.out, Print(status))?;
        self.out.flush()?;
        Ok(())
    }
}

/// `#RRGGBB` as a truecolor value
fn parse_color(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_draws_label_seconds_and_bar() {
        let mut surface = TerminalSurface::new(Vec::new()).with_color(false);
        surface.set_text(Element::PhaseText, "Inhale").unwrap();
        surface.set_text(Element::SecondsText, "3").unwrap();
        surface.set_ring_offset(ProgressRing::default().offset_for(0.5)).unwrap();
        surface.present().unwrap();

        let line = String::from_utf8(surface.into_inner()).unwrap();
        assert!(line.contains("Inhale"));
        assert!(line.contains("  3s"));
        assert!(line.contains(&format!("{}{}", "█".repeat(12), "░".repeat(12))));
        assert!(line.contains(" 50%"));
    }

    #[test]
    fn hex_colors_parse_to_rgb() {
        assert_eq!(
            parse_color("#9CAF88"),
            Some(Color::Rgb { r: 156, g: 175, b: 136 })
        );
        assert_eq!(parse_color("teal"), None);
    }

    #[test]
    fn colored_label_is_reset_after_the_phase_text() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_text(Element::PhaseText, "Hold").unwrap();
        surface.set_color(Element::PhaseText, Some("#B4A7D6")).unwrap();
        surface.present().unwrap();

        let mut expected = Vec::new();
        queue!(
            expected,
            SetForegroundColor(Color::Rgb { r: 180, g: 167, b: 214 }),
            Print(format!("{:<32}", "Hold")),
            ResetColor
        )
        .unwrap();
        let expected = String::from_utf8(expected).unwrap();
        let line = String::from_utf8(surface.into_inner()).unwrap();
        assert!(line.contains(&expected));
    }
}
