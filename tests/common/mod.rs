#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use training_plan_lib::{
    EditorSession, ExerciseCatalog, PlanModel, PlanPayload, PlanTransport, SubmissionFailure,
};

/// Transport that records every request and answers with a canned response.
pub struct RecordingTransport {
    pub requests: Mutex<Vec<PlanPayload>>,
    response: Result<(), SubmissionFailure>,
}

impl RecordingTransport {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(()),
        })
    }

    pub fn failing(failure: SubmissionFailure) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Err(failure),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PlanTransport for RecordingTransport {
    async fn create_plan(&self, payload: &PlanPayload) -> Result<(), SubmissionFailure> {
        self.requests.lock().unwrap().push(payload.clone());
        self.response.clone()
    }
}

/// Transport that blocks until released, for in-flight scenarios.
pub struct GatedTransport {
    pub gate: Notify,
    pub calls: Mutex<usize>,
}

impl GatedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            calls: Mutex::new(0),
        })
    }
}

#[async_trait]
impl PlanTransport for GatedTransport {
    async fn create_plan(&self, _payload: &PlanPayload) -> Result<(), SubmissionFailure> {
        *self.calls.lock().unwrap() += 1;
        self.gate.notified().await;
        Ok(())
    }
}

/// Transport that closes the editor session while the request is "on the wire".
pub struct ClosingTransport {
    pub session: EditorSession,
}

#[async_trait]
impl PlanTransport for ClosingTransport {
    async fn create_plan(&self, _payload: &PlanPayload) -> Result<(), SubmissionFailure> {
        self.session.close();
        Ok(())
    }
}

/// Transport that never answers.
pub struct HangingTransport;

#[async_trait]
impl PlanTransport for HangingTransport {
    async fn create_plan(&self, _payload: &PlanPayload) -> Result<(), SubmissionFailure> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

pub fn default_catalog() -> Arc<ExerciseCatalog> {
    Arc::new(ExerciseCatalog::default())
}

/// "Leg Day" with one Sentadillas entry of 4 x 15.
pub fn leg_day() -> anyhow::Result<PlanModel> {
    let mut model = PlanModel::new(default_catalog());
    model.set_name("Leg Day");
    let index = model.add_entry()?;
    model.update_entry_field(index, training_plan_lib::EntryField::ExerciseName, "Sentadillas")?;
    model.update_entry_field(index, training_plan_lib::EntryField::Sets, "4")?;
    model.update_entry_field(index, training_plan_lib::EntryField::Repetitions, "15")?;
    Ok(model)
}
