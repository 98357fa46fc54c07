// src/transport.rs
use crate::plan::{PlanError, PlanPayload};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    #[error("Could not reach the plan service: {0}")]
    Transport(String),
    #[error("Plan service returned {status}: {body}")]
    ServerStatus { status: u16, body: String },
    #[error("Plan could not be serialized: {0}")]
    InvalidPlan(#[from] PlanError),
}

/// Sends a finished plan to the storage service. Timeouts are the implementor's concern.
#[async_trait]
pub trait PlanTransport: Send + Sync {
    async fn create_plan(&self, payload: &PlanPayload) -> Result<(), SubmissionFailure>;
}

/// JSON-over-HTTP transport posting to a single plans endpoint.
pub struct HttpPlanTransport {
    http_client: Client,
    endpoint: String,
}

impl HttpPlanTransport {
    /// # Errors
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlanTransport for HttpPlanTransport {
    async fn create_plan(&self, payload: &PlanPayload) -> Result<(), SubmissionFailure> {
        info!(
            "Sending POST to {} for plan '{}' with {} exercises",
            self.endpoint,
            payload.name,
            payload.exercises.len()
        );
        debug!("Plan payload: {:?}", payload);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Plan POST request failed: {}", e);
                SubmissionFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            error!("Plan POST request failed with status: {}. Body: {}", status, body);
            return Err(SubmissionFailure::ServerStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!("Plan '{}' accepted with status {}", payload.name, status);
        Ok(())
    }
}
