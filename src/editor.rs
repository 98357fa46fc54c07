// src/editor.rs
use crate::catalog::{ExerciseCatalog, ExerciseTemplate};
use crate::plan::{EntryField, PlanError, PlanModel};
use crate::session::EditorSession;
use crate::submission::{SubmissionController, SubmissionState, SubmitOutcome};
use crate::transport::PlanTransport;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("The plan editor is closed.")]
    Closed,
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// One open plan editor: the model being composed plus the controller that submits it.
/// Front ends forward user intents here and render from the read accessors.
pub struct PlanEditor {
    model: PlanModel,
    controller: SubmissionController,
    session: EditorSession,
}

impl PlanEditor {
    /// Opens an editor with an empty plan.
    pub fn open(catalog: Arc<ExerciseCatalog>, transport: Arc<dyn PlanTransport>) -> Self {
        let session = EditorSession::new();
        debug!("Opening plan editor");
        Self {
            model: PlanModel::new(catalog),
            controller: SubmissionController::new(transport, session.clone()),
            session,
        }
    }

    pub fn model(&self) -> &PlanModel {
        &self.model
    }

    pub fn templates(&self) -> &[ExerciseTemplate] {
        self.model.catalog().list_templates()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Handle used to detect (or force) closure from elsewhere.
    pub fn session(&self) -> EditorSession {
        self.session.clone()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_live()
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.is_open() {
            Ok(())
        } else {
            warn!("Edit rejected: the plan editor is closed");
            Err(EditorError::Closed)
        }
    }

    /// # Errors
    /// Returns `EditorError::Closed` once the editor has been closed.
    pub fn set_name(&mut self, name: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.model.set_name(name);
        Ok(())
    }

    /// # Errors
    /// `EditorError::Closed`, or see [`PlanModel::add_entry`].
    pub fn add_entry(&mut self) -> Result<usize, EditorError> {
        self.ensure_open()?;
        Ok(self.model.add_entry()?)
    }

    /// # Errors
    /// `EditorError::Closed`, or see [`PlanModel::update_entry_field`].
    pub fn update_entry_field(
        &mut self,
        index: usize,
        field: EntryField,
        value: &str,
    ) -> Result<(), EditorError> {
        self.ensure_open()?;
        Ok(self.model.update_entry_field(index, field, value)?)
    }

    /// # Errors
    /// `EditorError::Closed`, or see [`PlanModel::remove_entry`].
    pub fn remove_entry(&mut self, index: usize) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.model.remove_entry(index)?;
        Ok(())
    }

    /// Submits the current plan. The editor closes itself on success; on any other
    /// outcome it stays open with the plan unchanged. The terminal state is
    /// acknowledged before returning, so the controller is `Idle` again afterwards.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.controller.submit(&self.model).await;
        self.controller.acknowledge();
        if outcome.should_close_editor() {
            self.session.close();
        }
        outcome
    }

    /// Closes the editor without submitting. The plan is discarded.
    pub fn cancel(self) {
        info!("Plan editor cancelled");
        self.session.close();
    }
}
