use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

// --- Declare modules ---
pub mod catalog;
mod config;
mod editor;
pub mod plan;
mod session;
mod submission;
pub mod transport;

// --- Expose public types ---
pub use catalog::{CatalogError, ExerciseCatalog, ExerciseTemplate};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util,
    save as save_config_util, Config, ConfigError, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};
pub use editor::{EditorError, PlanEditor};
pub use plan::{
    format_minutes, numeric_value, EntryField, ExerciseEntry, PlanError, PlanModel, PlanPayload,
};
pub use session::EditorSession;
pub use submission::{
    InvalidReason, SubmissionController, SubmissionState, SubmitOutcome, ValidationResult,
};
pub use transport::{HttpPlanTransport, PlanTransport, SubmissionFailure};

/// One exercise given on the command line as `NAME[:SETS[:REPS]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSpec {
    pub name: String,
    pub sets: Option<String>,
    pub repetitions: Option<String>,
}

impl FromStr for ExerciseSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            bail!("Exercise name cannot be empty in '{s}'.");
        }
        let sets = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let repetitions = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        if parts.next().is_some() {
            bail!("Expected NAME[:SETS[:REPS]], got '{s}'.");
        }
        Ok(Self {
            name: name.to_string(),
            sets,
            repetitions,
        })
    }
}

pub struct PlannerService {
    pub config: Config,
    pub config_path: PathBuf,
    pub catalog: Arc<ExerciseCatalog>,
    pub transport: Arc<dyn PlanTransport>,
}

impl PlannerService {
    /// Loads configuration and builds the catalog and HTTP transport from it.
    /// # Errors
    /// Returns `anyhow::Error` if config path determination, loading or client
    /// construction fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;
        let transport = HttpPlanTransport::new(config.endpoint.clone(), config.timeout())
            .context("Failed to build HTTP client")?;
        Self::with_transport(config, config_path, Arc::new(transport))
    }

    /// Builds a service around an arbitrary transport.
    /// # Errors
    /// Returns `anyhow::Error` if the configured catalog is invalid.
    pub fn with_transport(
        config: Config,
        config_path: PathBuf,
        transport: Arc<dyn PlanTransport>,
    ) -> Result<Self> {
        let catalog = config
            .exercise_catalog()
            .context("Failed to build exercise catalog")?;
        Ok(Self {
            config,
            config_path,
            catalog: Arc::new(catalog),
            transport,
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn list_templates(&self) -> &[ExerciseTemplate] {
        self.catalog.list_templates()
    }

    pub fn open_editor(&self) -> PlanEditor {
        PlanEditor::open(Arc::clone(&self.catalog), Arc::clone(&self.transport))
    }

    /// Opens an editor and replays `name` and `exercises` into it as user intents.
    /// Omitted sets/repetitions take the chosen template's defaults.
    /// # Errors
    /// Returns `anyhow::Error` if an exercise is not in the catalog.
    pub fn compose(&self, name: &str, exercises: &[ExerciseSpec]) -> Result<PlanEditor> {
        let mut editor = self.open_editor();
        editor.set_name(name)?;
        for spec in exercises {
            let template = self
                .catalog
                .get(&spec.name)
                .ok_or_else(|| CatalogError::UnknownExercise(spec.name.clone()))
                .with_context(|| {
                    let names: Vec<&str> =
                        self.list_templates().iter().map(|t| t.name.as_str()).collect();
                    format!("Available exercises: {}", names.join(", "))
                })?;
            let default_sets = template.default_sets.to_string();
            let default_reps = template.default_repetitions.to_string();

            let index = editor.add_entry()?;
            editor.update_entry_field(index, EntryField::ExerciseName, &spec.name)?;
            editor.update_entry_field(
                index,
                EntryField::Sets,
                spec.sets.as_deref().unwrap_or(&default_sets),
            )?;
            editor.update_entry_field(
                index,
                EntryField::Repetitions,
                spec.repetitions.as_deref().unwrap_or(&default_reps),
            )?;
        }
        Ok(editor)
    }
}
