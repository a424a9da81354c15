//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "mindcare")]
#[command(about = "Guided breathing and grounding exercises in the terminal")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Exercise id to open (see --list)
    pub exercise: Option<String>,

    /// List available exercises and exit
    #[arg(short, long)]
    pub list: bool,

    /// JSON catalog to load instead of the built-in exercises
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Tick period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Start the exercise as soon as it opens
    #[arg(short, long)]
    pub autostart: bool,

    /// Disable audio cues
    #[arg(short, long)]
    pub mute: bool,

    /// Keep the exercise open after it completes
    #[arg(long)]
    pub keep_open: bool,

    /// Disable colored phase labels
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Tick period, never shorter than one millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_second_ticks() {
        let config = Config::try_parse_from(["mindcare", "breathing-478"]).unwrap();
        assert_eq!(config.exercise.as_deref(), Some("breathing-478"));
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn zero_tick_period_is_clamped() {
        let config = Config::try_parse_from(["mindcare", "--tick-ms", "0", "-v"]).unwrap();
        assert_eq!(config.tick_period(), Duration::from_millis(1));
        assert_eq!(config.log_level(), "debug");
    }
}
