//! Remote coaching agent client
//!
//! Used only when `agent.enabled` is set. Every call is a single request
//! with the configured timeout; failures are terminal and never retried.

use crate::config::AgentConfig;
use adafit_shared::{AgentRequest, AgentResponse, RecommendationBundle, WorkoutPlanRequest};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Remote agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Agent request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the coaching agent API
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/workout-plan`
    #[instrument(skip(self, request))]
    pub async fn workout_plan(
        &self,
        request: &WorkoutPlanRequest,
    ) -> Result<RecommendationBundle, AgentError> {
        self.post("/workout-plan", request).await
    }

    /// `POST {base}/today/`
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn chat(&self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        self.post("/today/", request).await
    }

    /// `GET {base}/health`; any 2xx counts as up.
    pub async fn health(&self) -> Result<(), AgentError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        check_status(&response)?;
        Ok(())
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling coaching agent");
        let response = self.client.post(&url).json(body).send().await?;
        check_status(&response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(AgentError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    })
}
