//! Validated, immutable exercise definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ExercisePhase;

/// Reasons a definition is rejected at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("exercise '{id}' has no phases")]
    NoPhases { id: String },

    #[error("exercise '{id}' phase {index} ('{label}') has zero duration")]
    ZeroDuration { id: String, index: usize, label: String },

    #[error("exercise id must not be empty")]
    EmptyId,

    #[error("exercise '{id}' is too long: phase durations exceed {max} seconds in total")]
    TotalTooLong { id: String, max: u32 },
}

/// Raw shape accepted from catalog files before validation
#[derive(Debug, Deserialize)]
struct RawDefinition {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    instruction: String,
    #[serde(alias = "steps")]
    phases: Vec<ExercisePhase>,
}

/// A named, ordered, non-empty sequence of phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDefinition")]
pub struct ExerciseDefinition {
    id: String,
    title: String,
    description: String,
    instruction: String,
    phases: Vec<ExercisePhase>,
    #[serde(skip_serializing)]
    total_duration_seconds: u32,
}

impl ExerciseDefinition {
    /// Build a definition, rejecting empty phase lists and zero-length phases
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        instruction: &str,
        phases: Vec<ExercisePhase>,
    ) -> Result<Self, DefinitionError> {
        if id.trim().is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if phases.is_empty() {
            return Err(DefinitionError::NoPhases { id: id.to_string() });
        }
        if let Some((index, phase)) = phases
            .iter()
            .enumerate()
            .find(|(_, phase)| phase.duration_seconds == 0)
        {
            return Err(DefinitionError::ZeroDuration {
                id: id.to_string(),
                index,
                label: phase.label.clone(),
            });
        }

        let total_duration_seconds = phases
            .iter()
            .try_fold(0u32, |total, p| total.checked_add(p.duration_seconds))
            .ok_or_else(|| DefinitionError::TotalTooLong {
                id: id.to_string(),
                max: u32::MAX,
            })?;

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            instruction: instruction.to_string(),
            phases,
            total_duration_seconds,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn phases(&self) -> &[ExercisePhase] {
        &self.phases
    }

    /// Phase at `index`; the first phase when out of range
    pub fn phase(&self, index: usize) -> &ExercisePhase {
        self.phases.get(index).unwrap_or(&self.phases[0])
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn is_last_phase(&self, index: usize) -> bool {
        index + 1 >= self.phases.len()
    }

    /// Sum of all phase durations, fixed at construction
    pub fn total_duration_seconds(&self) -> u32 {
        self.total_duration_seconds
    }

    /// Seconds covered by the phases before `index`
    pub fn seconds_before_phase(&self, index: usize) -> u32 {
        self.phases
            .iter()
            .take(index)
            .map(|p| p.duration_seconds)
            .sum()
    }
}

impl TryFrom<RawDefinition> for ExerciseDefinition {
    type Error = DefinitionError;

    fn try_from(raw: RawDefinition) -> Result<Self, Self::Error> {
        Self::new(
            &raw.id,
            &raw.title,
            &raw.description,
            &raw.instruction,
            raw.phases,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::CueTag;

    fn phases() -> Vec<ExercisePhase> {
        vec![
            ExercisePhase::new("Inhale", 4, "#9CAF88", CueTag::In),
            ExercisePhase::new("Hold", 7, "#B4A7D6", CueTag::Hold),
            ExercisePhase::new("Exhale", 8, "#8AA2A9", CueTag::Out),
        ]
    }

    #[test]
    fn total_duration_is_computed_once() {
        let def = ExerciseDefinition::new("478", "4-7-8", "", "", phases()).unwrap();
        assert_eq!(def.total_duration_seconds(), 19);
        assert_eq!(def.seconds_before_phase(2), 11);
        assert!(def.is_last_phase(2));
        assert!(!def.is_last_phase(1));
    }

    #[test]
    fn rejects_zero_duration_phase() {
        let mut bad = phases();
        bad[1].duration_seconds = 0;
        let err = ExerciseDefinition::new("478", "4-7-8", "", "", bad).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::ZeroDuration {
                id: "478".to_string(),
                index: 1,
                label: "Hold".to_string(),
            }
        );
    }

    #[test]
    fn rejects_total_duration_overflow() {
        let phases = vec![
            ExercisePhase::new("Long", 3_000_000_000, "#000000", CueTag::Step),
            ExercisePhase::new("Longer", 3_000_000_000, "#000000", CueTag::Step),
        ];
        let err = ExerciseDefinition::new("huge", "Huge", "", "", phases).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::TotalTooLong {
                id: "huge".to_string(),
                max: u32::MAX,
            }
        );

        let phases = vec![
            ExercisePhase::new("Long", u32::MAX - 1, "#000000", CueTag::Step),
            ExercisePhase::new("Tail", 1, "#000000", CueTag::Step),
        ];
        let def = ExerciseDefinition::new("edge", "Edge", "", "", phases).unwrap();
        assert_eq!(def.total_duration_seconds(), u32::MAX);
        assert_eq!(def.seconds_before_phase(1), u32::MAX - 1);
    }

    #[test]
    fn rejects_empty_phase_list() {
        let err = ExerciseDefinition::new("empty", "Empty", "", "", Vec::new()).unwrap_err();
        assert!(matches!(err, DefinitionError::NoPhases { .. }));
    }

    #[test]
    fn deserialization_runs_validation() {
        let json = r#"{"id":"x","title":"X","steps":[{"label":"A","duration":0,"color":"red"}]}"#;
        assert!(serde_json::from_str::<ExerciseDefinition>(json).is_err());

        let json = r#"{"id":"x","title":"X","steps":[{"label":"A","duration":3,"color":"red"}]}"#;
        let def: ExerciseDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.total_duration_seconds(), 3);
    }
}
