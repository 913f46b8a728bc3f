//! Scoring collaborator interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ScorerError;
use crate::models::features::ApplicantFeatures;
use crate::models::pillar::Pillar;

/// Raw output of one pillar's scorer, before banding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(alias = "raw_score")]
    pub raw_score: f64,
    /// Only Fraud and AML scorers send this
    #[serde(default, alias = "critical_flag", skip_serializing_if = "Option::is_none")]
    pub critical_flag: Option<bool>,
    #[serde(default, alias = "model_version", skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl ScoreResponse {
    pub fn new(raw_score: f64) -> Self {
        Self {
            raw_score,
            critical_flag: None,
            model_version: None,
        }
    }

    pub fn with_critical_flag(mut self, flag: bool) -> Self {
        self.critical_flag = Some(flag);
        self
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }
}

/// One external risk model. Implementations must be safe to call concurrently
/// and must not share mutable state with the other pillars.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Pillar this scorer assesses
    fn pillar(&self) -> Pillar;

    async fn score(&self, features: &ApplicantFeatures) -> Result<ScoreResponse, ScorerError>;
}
