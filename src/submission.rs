// src/submission.rs
use crate::plan::PlanModel;
use crate::session::EditorSession;
use crate::transport::{PlanTransport, SubmissionFailure};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("Please enter a name for the training plan.")]
    MissingName,
    #[error("Add at least one exercise to the training plan.")]
    NoExercises,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(InvalidReason),
}

/// What the front end learns from a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Plan stored; the editor should close.
    Submitted,
    /// Withheld before any request was made.
    Invalid(InvalidReason),
    Failed(SubmissionFailure),
    /// Another submission is still pending.
    InFlight,
    /// The editor was closed before the response arrived; nothing was acted on.
    Abandoned,
}

impl SubmitOutcome {
    pub fn should_close_editor(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Validates and submits plans for one editor session, one request at a time.
pub struct SubmissionController {
    transport: Arc<dyn PlanTransport>,
    session: EditorSession,
    state: Mutex<SubmissionState>,
}

// Returns the controller to Idle if a submission future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a Mutex<SubmissionState>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn finish(mut self, next: SubmissionState) {
        *lock(self.state) = next;
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            *lock(self.state) = SubmissionState::Idle;
        }
    }
}

fn lock(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn PlanTransport>, session: EditorSession) -> Self {
        Self {
            transport,
            session,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Marks a terminal state as observed, returning it and resetting to `Idle`.
    /// Has no effect while a submission is in flight.
    pub fn acknowledge(&self) -> SubmissionState {
        let mut state = lock(&self.state);
        let observed = *state;
        if observed != SubmissionState::Submitting {
            *state = SubmissionState::Idle;
        }
        observed
    }

    /// Checks the plan-level rules only; entry fields are not inspected.
    pub fn validate(model: &PlanModel) -> ValidationResult {
        if model.name().trim().is_empty() {
            ValidationResult::Invalid(InvalidReason::MissingName)
        } else if model.is_empty() {
            ValidationResult::Invalid(InvalidReason::NoExercises)
        } else {
            ValidationResult::Valid
        }
    }

    /// Validates `model` and, if valid, sends exactly one create request.
    /// `model` is never modified, so a failed attempt can be retried as-is.
    pub async fn submit(&self, model: &PlanModel) -> SubmitOutcome {
        if !self.session.is_live() {
            warn!("Plan submission requested after the editor was closed");
            return SubmitOutcome::Abandoned;
        }
        if let ValidationResult::Invalid(reason) = Self::validate(model) {
            warn!("Plan submission withheld: {}", reason);
            return SubmitOutcome::Invalid(reason);
        }

        {
            let mut state = lock(&self.state);
            if *state == SubmissionState::Submitting {
                warn!("Plan submission rejected: another submission is in flight");
                return SubmitOutcome::InFlight;
            }
            *state = SubmissionState::Submitting;
        }
        let guard = InFlightGuard {
            state: &self.state,
            armed: true,
        };

        let payload = match model.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Plan could not be serialized: {}", e);
                guard.finish(SubmissionState::Failed);
                return SubmitOutcome::Failed(e.into());
            }
        };

        info!(
            "Submitting plan '{}' ({} exercises, {} minutes)",
            payload.name,
            payload.exercises.len(),
            model.total_duration_minutes()
        );
        let result = tokio::select! {
            result = self.transport.create_plan(&payload) => Some(result),
            _ = self.session.closed() => None,
        };

        let result = match result {
            Some(result) if self.session.is_live() => result,
            _ => {
                warn!("Editor closed before the plan service responded; ignoring response");
                guard.finish(SubmissionState::Idle);
                return SubmitOutcome::Abandoned;
            }
        };

        match result {
            Ok(()) => {
                info!("Training plan '{}' created successfully", payload.name);
                guard.finish(SubmissionState::Succeeded);
                SubmitOutcome::Submitted
            }
            Err(failure) => {
                warn!("Error creating training plan '{}': {}", payload.name, failure);
                guard.finish(SubmissionState::Failed);
                SubmitOutcome::Failed(failure)
            }
        }
    }
}
