//! Error types for the decision engine and its scoring collaborators

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::pillar::Pillar;

/// Failure of a single call to an external scorer
#[derive(Error, Debug, Clone)]
pub enum ScorerError {
    #[error("timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("scorer responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed scorer response: {0}")]
    Malformed(String),
}

impl ScorerError {
    pub fn kind(&self) -> &'static str {
        match self {
            ScorerError::Timeout { .. } => "timeout",
            ScorerError::Transport(_) => "transport",
            ScorerError::Status { .. } => "status",
            ScorerError::Malformed(_) => "malformed",
        }
    }
}

/// Errors surfaced to callers of the engine. None of them carries a decision.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error("invalid feature input: {0}")]
    InvalidFeatureInput(String),

    #[error("scorer unavailable for pillar \"{}\": {reason}", .pillar.key())]
    ScorerUnavailable { pillar: Pillar, reason: String },

    #[error("invalid threshold configuration for pillar \"{}\": {reason}", .pillar.key())]
    ThresholdConfigInvalid { pillar: Pillar, reason: String },

    #[error("more than one assessment received for pillar \"{}\"", .0.key())]
    DuplicateAssessment(Pillar),

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },
}

impl EngineError {
    pub fn scorer_unavailable(pillar: Pillar, source: &ScorerError) -> Self {
        Self::ScorerUnavailable {
            pillar,
            reason: source.to_string(),
        }
    }

    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Pillar whose scorer failed, if this is a scorer failure
    pub fn unavailable_pillar(&self) -> Option<Pillar> {
        match self {
            EngineError::ScorerUnavailable { pillar, .. } => Some(*pillar),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::InvalidFeatureInput(_) => StatusCode::BAD_REQUEST,
            EngineError::ScorerUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            EngineError::ThresholdConfigInvalid { .. }
            | EngineError::DuplicateAssessment(_)
            | EngineError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidFeatureInput(_) => "invalid_feature_input",
            EngineError::ScorerUnavailable { .. } => "scorer_unavailable",
            EngineError::ThresholdConfigInvalid { .. } => "threshold_config_invalid",
            EngineError::DuplicateAssessment(_) => "duplicate_assessment",
            EngineError::Config { .. } => "configuration_error",
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.kind(),
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}
