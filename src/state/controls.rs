//! Visibility and labels of the timer's host buttons

use serde::Serialize;

pub const START_LABEL: &str = "Start exercise";
pub const PAUSE_LABEL: &str = "Pause";
pub const RESUME_LABEL: &str = "Resume";
pub const RESTART_LABEL: &str = "Restart";
pub const STOP_LABEL: &str = "Stop";
pub const CLOSE_LABEL: &str = "Close";

/// Button configuration the host should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start_visible: bool,
    pub pause_visible: bool,
    pub restart_visible: bool,
    pub stop_visible: bool,
    pub pause_label: &'static str,
    pub stop_label: &'static str,
}

impl Controls {
    /// Configuration shown when the modal opens
    pub fn pre_start() -> Self {
        Self {
            start_visible: true,
            pause_visible: false,
            restart_visible: false,
            stop_visible: false,
            pause_label: PAUSE_LABEL,
            stop_label: STOP_LABEL,
        }
    }

    pub fn running() -> Self {
        Self {
            start_visible: false,
            pause_visible: true,
            restart_visible: false,
            stop_visible: true,
            pause_label: PAUSE_LABEL,
            stop_label: STOP_LABEL,
        }
    }

    pub fn paused() -> Self {
        Self {
            pause_label: RESUME_LABEL,
            ..Self::running()
        }
    }

    /// Pause disappears, restart appears and stop turns into close
    pub fn completed() -> Self {
        Self {
            start_visible: false,
            pause_visible: false,
            restart_visible: true,
            stop_visible: true,
            pause_label: PAUSE_LABEL,
            stop_label: CLOSE_LABEL,
        }
    }

    /// Pre-start visibility with the current labels left untouched
    pub fn after_restart(&self) -> Self {
        Self {
            start_visible: true,
            pause_visible: false,
            restart_visible: false,
            stop_visible: false,
            ..*self
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::pre_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_keeps_labels_but_hides_run_buttons() {
        let restarted = Controls::completed().after_restart();
        assert!(restarted.start_visible);
        assert!(!restarted.stop_visible);
        assert_eq!(restarted.stop_label, CLOSE_LABEL);
        assert_ne!(restarted, Controls::pre_start());
    }
}
