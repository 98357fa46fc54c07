// src/catalog.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("Exercise catalog must contain at least one template.")]
    Empty,
    #[error("Duplicate exercise template name: {0}")]
    DuplicateName(String),
    #[error("Invalid exercise template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },
}

/// A predefined exercise offered as a choice (and default) when composing a plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseTemplate {
    pub name: String,
    /// Minutes consumed by one set.
    pub duration_per_set: f64,
    pub default_sets: u32,
    pub default_repetitions: u32,
}

impl ExerciseTemplate {
    pub fn new(
        name: &str,
        duration_per_set: f64,
        default_sets: u32,
        default_repetitions: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            duration_per_set,
            default_sets,
            default_repetitions,
        }
    }

    fn check(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidTemplate {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !self.duration_per_set.is_finite() || self.duration_per_set <= 0.0 {
            return Err(invalid("duration per set must be a positive number"));
        }
        if self.default_sets == 0 || self.default_repetitions == 0 {
            return Err(invalid("default sets and repetitions must be positive"));
        }
        Ok(())
    }
}

/// Fixed, ordered lookup of exercise templates. Never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCatalog {
    templates: Vec<ExerciseTemplate>,
}

impl ExerciseCatalog {
    /// Builds a catalog, rejecting empty lists, duplicate names and non-positive values.
    /// # Errors
    /// Returns `CatalogError` describing the first offending template.
    pub fn new(templates: Vec<ExerciseTemplate>) -> Result<Self, CatalogError> {
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for template in &templates {
            template.check()?;
            if !seen.insert(template.name.as_str()) {
                return Err(CatalogError::DuplicateName(template.name.clone()));
            }
        }
        Ok(Self { templates })
    }

    pub fn list_templates(&self) -> &[ExerciseTemplate] {
        &self.templates
    }

    /// The template new entries are seeded from.
    pub fn default_template(&self) -> &ExerciseTemplate {
        // Construction guarantees at least one template.
        &self.templates[0]
    }

    pub fn get(&self, name: &str) -> Option<&ExerciseTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// # Errors
    /// Returns `CatalogError::UnknownExercise` if `name` is not in the catalog.
    pub fn duration_per_set(&self, name: &str) -> Result<f64, CatalogError> {
        self.get(name)
            .map(|t| t.duration_per_set)
            .ok_or_else(|| CatalogError::UnknownExercise(name.to_string()))
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self {
            templates: vec![
                ExerciseTemplate::new("Flexiones", 1.0, 3, 10),
                ExerciseTemplate::new("Sentadillas", 0.5, 4, 15),
                ExerciseTemplate::new("Plancha", 0.75, 3, 30),
            ],
        }
    }
}
