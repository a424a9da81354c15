//! Exercise phases and the cue tags attached to them

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Tone pattern selector understood by the tone facility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueTag {
    In,
    Out,
    Hold,
    Step,
    Tick,
    Complete,
    #[default]
    #[serde(other)]
    Default,
}

impl CueTag {
    pub const ALL: [CueTag; 7] = [
        CueTag::In,
        CueTag::Out,
        CueTag::Hold,
        CueTag::Step,
        CueTag::Tick,
        CueTag::Complete,
        CueTag::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CueTag::In => "in",
            CueTag::Out => "out",
            CueTag::Hold => "hold",
            CueTag::Step => "step",
            CueTag::Tick => "tick",
            CueTag::Complete => "complete",
            CueTag::Default => "default",
        }
    }
}

impl fmt::Display for CueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CueTag {
    type Err = std::convert::Infallible;

    /// Unknown tags fall back to the default tone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CueTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(CueTag::Default))
    }
}

/// One labeled, timed segment of an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePhase {
    /// Text shown while the phase runs ("Inhale", "Hold", ...)
    #[serde(alias = "action")]
    pub label: String,
    /// Whole seconds, must be non-zero
    #[serde(alias = "duration")]
    pub duration_seconds: u32,
    /// CSS-style color used for the label and the ring stroke
    #[serde(alias = "color")]
    pub display_color: String,
    #[serde(default, alias = "sound")]
    pub cue: CueTag,
}

impl ExercisePhase {
    pub fn new(label: &str, duration_seconds: u32, display_color: &str, cue: CueTag) -> Self {
        Self {
            label: label.to_string(),
            duration_seconds,
            display_color: display_color.to_string(),
            cue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_tags_parse_case_insensitively() {
        assert_eq!("HOLD".parse::<CueTag>().unwrap(), CueTag::Hold);
        assert_eq!(" in ".parse::<CueTag>().unwrap(), CueTag::In);
    }

    #[test]
    fn unknown_cue_tags_fall_back_to_default() {
        assert_eq!("chime".parse::<CueTag>().unwrap(), CueTag::Default);
        let tag: CueTag = serde_json::from_str("\"chime\"").unwrap();
        assert_eq!(tag, CueTag::Default);
    }

    #[test]
    fn phase_accepts_short_field_names() {
        let json = r##"{"label":"Inhale","duration":4,"color":"#9CAF88","sound":"in"}"##;
        let phase: ExercisePhase = serde_json::from_str(json).unwrap();
        assert_eq!(phase, ExercisePhase::new("Inhale", 4, "#9CAF88", CueTag::In));

        let json = r##"{"action":"Exhale","duration":8,"color":"#8AA2A9","sound":"out"}"##;
        let phase: ExercisePhase = serde_json::from_str(json).unwrap();
        assert_eq!(phase, ExercisePhase::new("Exhale", 8, "#8AA2A9", CueTag::Out));
    }
}
