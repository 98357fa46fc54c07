// src/plan.rs
use crate::catalog::{CatalogError, ExerciseCatalog};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Entry index {index} is out of range (plan has {len} entries)")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Editable fields of an entry, as named by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EntryField {
    #[strum(to_string = "exercise", serialize = "name")]
    ExerciseName,
    #[strum(to_string = "sets")]
    Sets,
    #[strum(to_string = "reps", serialize = "repetitions")]
    Repetitions,
}

/// Coerces free-form numeric input to a number. Anything that does not parse
/// as a finite number (including empty input) counts as 0.
pub fn numeric_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Keeps the entry shape as edited: numbers go out as numbers, anything else verbatim.
fn numeric_json(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw.to_string()),
    }
}

/// One row of a plan. `sets` and `repetitions` hold the raw text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    exercise_name: String,
    sets: String,
    repetitions: String,
}

impl ExerciseEntry {
    pub fn exercise_name(&self) -> &str {
        &self.exercise_name
    }

    pub fn sets(&self) -> &str {
        &self.sets
    }

    pub fn repetitions(&self) -> &str {
        &self.repetitions
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    pub name: String,
    pub duration_per_set: f64,
    pub sets: Value,
    pub repetitions: Value,
}

/// Body of the create request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlanPayload {
    pub name: String,
    pub exercises: Vec<ExercisePayload>,
}

/// The plan being edited. Every mutator recomputes the total duration before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanModel {
    name: String,
    entries: Vec<ExerciseEntry>,
    total_duration_minutes: f64,
    catalog: Arc<ExerciseCatalog>,
}

impl PlanModel {
    pub fn new(catalog: Arc<ExerciseCatalog>) -> Self {
        Self {
            name: String::new(),
            entries: Vec::new(),
            total_duration_minutes: 0.0,
            catalog,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ExerciseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_minutes
    }

    /// # Errors
    /// Returns `PlanError::OutOfRange` if `index` is not a valid entry position.
    pub fn entry(&self, index: usize) -> Result<&ExerciseEntry, PlanError> {
        self.entries.get(index).ok_or(PlanError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn set_name(&mut self, new_name: &str) {
        self.name = new_name.to_string();
    }

    /// Appends an entry seeded from the catalog's first template and returns its index.
    /// # Errors
    /// Propagates catalog lookup failures from the recomputation.
    pub fn add_entry(&mut self) -> Result<usize, PlanError> {
        let template = self.catalog.default_template();
        self.entries.push(ExerciseEntry {
            exercise_name: template.name.clone(),
            sets: template.default_sets.to_string(),
            repetitions: template.default_repetitions.to_string(),
        });
        self.recompute()?;
        Ok(self.entries.len() - 1)
    }

    /// Overwrites one field of the entry at `index`. The model is left untouched on error.
    /// # Errors
    /// - `PlanError::OutOfRange` if `index` is invalid.
    /// - `PlanError::Catalog` if an exercise name outside the catalog is chosen.
    pub fn update_entry_field(
        &mut self,
        index: usize,
        field: EntryField,
        value: &str,
    ) -> Result<(), PlanError> {
        let len = self.entries.len();
        if field == EntryField::ExerciseName && !self.catalog.contains(value) {
            // Bounds are still reported first so collaborator bugs are not masked.
            self.entry(index)?;
            return Err(CatalogError::UnknownExercise(value.to_string()).into());
        }
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(PlanError::OutOfRange { index, len })?;
        match field {
            EntryField::ExerciseName => entry.exercise_name = value.to_string(),
            EntryField::Sets => entry.sets = value.to_string(),
            EntryField::Repetitions => entry.repetitions = value.to_string(),
        }
        self.recompute()
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    /// # Errors
    /// Returns `PlanError::OutOfRange` if `index` is invalid.
    pub fn remove_entry(&mut self, index: usize) -> Result<ExerciseEntry, PlanError> {
        if index >= self.entries.len() {
            return Err(PlanError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.recompute()?;
        Ok(removed)
    }

    /// Sum over entries of `duration_per_set * sets`, computed from scratch.
    /// # Errors
    /// Returns `PlanError::Catalog` if an entry names an exercise missing from the catalog.
    pub fn compute_total_duration(&self) -> Result<f64, PlanError> {
        self.entries.iter().try_fold(0.0, |acc, entry| -> Result<f64, PlanError> {
            let per_set = self.catalog.duration_per_set(&entry.exercise_name)?;
            Ok(acc + per_set * numeric_value(&entry.sets))
        })
    }

    fn recompute(&mut self) -> Result<(), PlanError> {
        self.total_duration_minutes = self.compute_total_duration()?;
        Ok(())
    }

    /// Builds the create-request body, entries in insertion order.
    /// # Errors
    /// Returns `PlanError::Catalog` if an entry names an unknown exercise.
    pub fn to_payload(&self) -> Result<PlanPayload, PlanError> {
        let exercises = self
            .entries
            .iter()
            .map(|entry| -> Result<ExercisePayload, PlanError> {
                Ok(ExercisePayload {
                    name: entry.exercise_name.clone(),
                    duration_per_set: self.catalog.duration_per_set(&entry.exercise_name)?,
                    sets: numeric_json(&entry.sets),
                    repetitions: numeric_json(&entry.repetitions),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlanPayload {
            name: self.name.clone(),
            exercises,
        })
    }
}

/// Formats minutes as a plain number (`5`, `2.25`).
pub fn format_minutes(minutes: f64) -> String {
    format!("{minutes}")
}
