//! HTTP client for a remote scoring service.
//!
//! Posts the applicant record as JSON to `<base_url>/score` and expects a
//! `ScoreResponse` body. Deadlines are applied by the orchestrator, so every
//! pillar gets the same budget.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::errors::ScorerError;
use crate::models::features::ApplicantFeatures;
use crate::models::pillar::Pillar;
use crate::services::scorer::{RiskScorer, ScoreResponse};

#[derive(Debug, Clone)]
pub struct HttpScorer {
    pillar: Pillar,
    endpoint: String,
    client: Client,
}

impl HttpScorer {
    pub fn new(pillar: Pillar, base_url: &Url) -> Self {
        Self::with_client(pillar, base_url, Client::new())
    }

    /// Reuse an existing connection pool
    pub fn with_client(pillar: Pillar, base_url: &Url, client: Client) -> Self {
        let endpoint = format!("{}/score", base_url.as_str().trim_end_matches('/'));
        Self {
            pillar,
            endpoint,
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RiskScorer for HttpScorer {
    fn pillar(&self) -> Pillar {
        self.pillar
    }

    async fn score(&self, features: &ApplicantFeatures) -> Result<ScoreResponse, ScorerError> {
        debug!(
            pillar = self.pillar.key(),
            endpoint = %self.endpoint,
            applicant = features.sk_id_curr,
            "Dispatching scorer request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(features)
            .send()
            .await
            .map_err(|e| ScorerError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScorerError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ScorerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<ScoreResponse>(&body).map_err(|e| ScorerError::Malformed(e.to_string()))
    }
}
