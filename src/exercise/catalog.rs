//! Exercise catalog: the built-in table plus optional JSON catalog files

use std::{collections::HashSet, fs, path::Path};

use thiserror::Error;
use tracing::{debug, info};

use super::{CueTag, DefinitionError, ExerciseDefinition, ExercisePhase};

const SAGE: &str = "#9CAF88";
const LAVENDER: &str = "#B4A7D6";
const SLATE: &str = "#8AA2A9";

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid exercise definition: {0}")]
    Definition(#[from] DefinitionError),

    #[error("duplicate exercise id '{0}'")]
    DuplicateId(String),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered set of exercise definitions with unique ids
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<ExerciseDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(exercises: Vec<ExerciseDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !seen.insert(exercise.id().to_string()) {
                return Err(CatalogError::DuplicateId(exercise.id().to_string()));
            }
        }
        Ok(Self { exercises })
    }

    /// The three exercises that ship with the site
    pub fn builtin() -> Result<Self, CatalogError> {
        let breathing = ExerciseDefinition::new(
            "breathing-478",
            "4-7-8 Breathing",
            "A powerful technique for quickly relieving anxiety",
            "Inhale through the nose for 4 seconds → hold the breath for 7 seconds → exhale slowly through the mouth for 8 seconds",
            vec![
                ExercisePhase::new("Inhale", 4, SAGE, CueTag::In),
                ExercisePhase::new("Hold", 7, LAVENDER, CueTag::Hold),
                ExercisePhase::new("Exhale", 8, SLATE, CueTag::Out),
            ],
        )?;

        let square = ExerciseDefinition::new(
            "square-breathing",
            "Square Breathing",
            "Helps you calm down and focus",
            "Breathe along a square: inhale → hold → exhale → hold. 4 seconds per phase.",
            vec![
                ExercisePhase::new("Inhale", 4, SAGE, CueTag::In),
                ExercisePhase::new("Hold", 4, LAVENDER, CueTag::Hold),
                ExercisePhase::new("Exhale", 4, SLATE, CueTag::Out),
                ExercisePhase::new("Hold", 4, LAVENDER, CueTag::Hold),
            ],
        )?;

        let grounding = ExerciseDefinition::new(
            "grounding-54321",
            "5-4-3-2-1 Grounding",
            "Quickly brings you back to the here and now during panic",
            "Name in turn: 5 things you see → 4 you can touch → 3 sounds → 2 smells → 1 taste",
            vec![
                ExercisePhase::new("5 things you can see", 30, SAGE, CueTag::Step),
                ExercisePhase::new("4 things you can touch", 24, LAVENDER, CueTag::Step),
                ExercisePhase::new("3 sounds you can hear", 18, SLATE, CueTag::Step),
                ExercisePhase::new("2 smells", 12, SAGE, CueTag::Step),
                ExercisePhase::new("1 taste", 6, LAVENDER, CueTag::Complete),
            ],
        )?;

        Self::new(vec![breathing, square, grounding])
    }

    /// Parse a JSON array of exercise definitions
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let exercises: Vec<ExerciseDefinition> = serde_json::from_str(json)?;
        debug!("Parsed {} exercises from JSON catalog", exercises.len());
        Self::new(exercises)
    }

    /// Load a JSON catalog file from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} exercises from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|exercise| exercise.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_matches_site_exercises() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("breathing-478").unwrap().total_duration_seconds(), 19);
        assert_eq!(catalog.get("square-breathing").unwrap().total_duration_seconds(), 16);
        let grounding = catalog.get("grounding-54321").unwrap();
        assert_eq!(grounding.total_duration_seconds(), 90);
        assert_eq!(grounding.phases().last().unwrap().cue, CueTag::Complete);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"a","title":"A","phases":[{"label":"x","duration":1,"color":"red"}]},
            {"id":"a","title":"B","phases":[{"label":"y","duration":2,"color":"blue"}]}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));
    }

    #[test]
    fn loads_catalog_in_the_site_table_shape() {
        let json = r##"[{
            "id": "breathing-478",
            "title": "4-7-8 Breathing",
            "description": "Quick anxiety relief",
            "instruction": "In 4, hold 7, out 8",
            "steps": [
                {"action": "Inhale", "duration": 4, "color": "#9CAF88", "sound": "in"},
                {"action": "Hold", "duration": 7, "color": "#B4A7D6", "sound": "hold"},
                {"action": "Exhale", "duration": 8, "color": "#8AA2A9", "sound": "out"}
            ]
        }]"##;
        let catalog = Catalog::from_json(json).unwrap();
        let exercise = catalog.get("breathing-478").unwrap();
        assert_eq!(exercise.total_duration_seconds(), 19);
        assert_eq!(exercise.phase(1).label, "Hold");
        assert_eq!(exercise.phase(2).cue, CueTag::Out);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
