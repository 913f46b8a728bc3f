//! Aggregation orchestrator: fans out to the three scorers, bands their
//! output and runs the decision policy.

use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, ScorerEndpoints};
use crate::errors::{EngineError, ScorerError};
use crate::metrics::Metrics;
use crate::models::decision::Decision;
use crate::models::evaluation::EvaluationRequest;
use crate::models::features::ApplicantFeatures;
use crate::models::pillar::{Pillar, PillarAssessment};
use crate::models::response::ResponsePayload;
use crate::policy::{compose, decide_request, explain};
use crate::services::http_scorer::HttpScorer;
use crate::services::scorer::{RiskScorer, ScoreResponse};

/// Result of one successful evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub request: EvaluationRequest,
    pub decision: Decision,
    pub explanation: String,
}

impl Evaluation {
    pub fn into_response(self) -> ResponsePayload {
        compose(self.decision, self.explanation, &self.request)
    }
}

/// Holds no per-request state; one instance serves any number of concurrent
/// evaluations.
pub struct AggregationOrchestrator {
    credit: Arc<dyn RiskScorer>,
    fraud: Arc<dyn RiskScorer>,
    aml: Arc<dyn RiskScorer>,
    config: EngineConfig,
    metrics: Option<Arc<Metrics>>,
}

impl AggregationOrchestrator {
    /// Validates the configuration and scorer wiring; an engine with an
    /// unusable threshold table is never constructed.
    pub fn new(
        credit: Arc<dyn RiskScorer>,
        fraud: Arc<dyn RiskScorer>,
        aml: Arc<dyn RiskScorer>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        for (expected, scorer) in [
            (Pillar::Credit, &credit),
            (Pillar::Fraud, &fraud),
            (Pillar::Aml, &aml),
        ] {
            if scorer.pillar() != expected {
                return Err(EngineError::config(
                    format!("{}_scorer", expected.key()),
                    format!("scorer reports pillar \"{}\"", scorer.pillar().key()),
                ));
            }
        }

        Ok(Self {
            credit,
            fraud,
            aml,
            config,
            metrics: None,
        })
    }

    /// Wire HTTP scorers for each configured endpoint, sharing one connection pool.
    pub fn from_endpoints(endpoints: &ScorerEndpoints, config: EngineConfig) -> Result<Self, EngineError> {
        let client = Client::new();
        let scorer = |pillar: Pillar| -> Arc<dyn RiskScorer> {
            Arc::new(HttpScorer::with_client(
                pillar,
                endpoints.get(pillar),
                client.clone(),
            ))
        };

        Self::new(
            scorer(Pillar::Credit),
            scorer(Pillar::Fraud),
            scorer(Pillar::Aml),
            config,
        )
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one applicant.
    ///
    /// All three scorers run concurrently under the same deadline. The first
    /// failure or timeout drops the calls still in flight and is returned as
    /// `ScorerUnavailable`; no decision is produced from a partial picture.
    pub async fn evaluate(
        &self,
        request_id: &str,
        features: &ApplicantFeatures,
    ) -> Result<Evaluation, EngineError> {
        let result = self.run(request_id, features).await;

        if let Some(metrics) = &self.metrics {
            match &result {
                Ok(evaluation) => metrics.record_outcome(evaluation.decision.outcome),
                Err(e) => metrics.record_failure(e.kind()),
            }
        }

        result
    }

    /// Evaluate and compose the boundary payload.
    pub async fn evaluate_response(
        &self,
        request_id: &str,
        features: &ApplicantFeatures,
    ) -> Result<ResponsePayload, EngineError> {
        self.evaluate(request_id, features)
            .await
            .map(Evaluation::into_response)
    }

    /// Evaluate several applicants independently; one failure does not affect
    /// the others. Results keep input order.
    ///
    /// At most `batch_concurrency` applicants are in flight at once. Entries
    /// that already failed upstream (e.g. could not be parsed) are returned
    /// as they are without calling any scorer.
    pub async fn evaluate_batch(
        &self,
        applicants: Vec<(String, Result<ApplicantFeatures, EngineError>)>,
    ) -> Vec<(String, Result<ResponsePayload, EngineError>)> {
        stream::iter(applicants)
            .map(|(request_id, features)| async move {
                let result = match features {
                    Ok(features) => self.evaluate_response(&request_id, &features).await,
                    Err(e) => Err(e),
                };
                (request_id, result)
            })
            .buffered(self.config.batch_concurrency)
            .collect()
            .await
    }

    async fn run(
        &self,
        request_id: &str,
        features: &ApplicantFeatures,
    ) -> Result<Evaluation, EngineError> {
        if let Err(e) = features.validate() {
            warn!(request_id, error = %e, "Rejected applicant features");
            return Err(e);
        }

        let (credit, fraud, aml) = tokio::try_join!(
            self.assess(self.credit.as_ref(), features),
            self.assess(self.fraud.as_ref(), features),
            self.assess(self.aml.as_ref(), features),
        )
        .map_err(|e| {
            warn!(
                request_id,
                pillar = e.unavailable_pillar().map(Pillar::key),
                error = %e,
                "Evaluation failed closed"
            );
            e
        })?;

        let request = EvaluationRequest::from_assessments(request_id, [credit, fraud, aml])?;
        let decision = decide_request(&request);
        let explanation = explain(&decision, &request);

        info!(
            request_id,
            outcome = %decision.outcome,
            rule = %decision.triggering_rule,
            explanation = %explanation,
            "Evaluation completed"
        );

        Ok(Evaluation {
            request,
            decision,
            explanation,
        })
    }

    async fn assess(
        &self,
        scorer: &dyn RiskScorer,
        features: &ApplicantFeatures,
    ) -> Result<PillarAssessment, EngineError> {
        let pillar = scorer.pillar();
        let started = Instant::now();

        let outcome = match timeout(self.config.scorer_timeout, scorer.score(features)).await {
            Ok(result) => result.and_then(check_score),
            Err(_) => Err(ScorerError::Timeout {
                timeout_ms: self.config.scorer_timeout.as_millis() as u64,
            }),
        };

        if let Some(metrics) = &self.metrics {
            let label = match &outcome {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            };
            metrics.record_scorer_call(pillar, label, started.elapsed().as_secs_f64());
        }

        let response = outcome.map_err(|e| EngineError::scorer_unavailable(pillar, &e))?;

        if !pillar.supports_critical_flag() && response.critical_flag.is_some() {
            warn!(
                pillar = pillar.key(),
                "Ignoring critical flag from a scorer that cannot raise one"
            );
        }

        let band = self.config.thresholds.classify(pillar, response.raw_score);
        debug!(
            pillar = pillar.key(),
            raw_score = response.raw_score,
            band = %band,
            "Scorer response banded"
        );

        Ok(PillarAssessment::new(
            pillar,
            band,
            response.critical_flag.unwrap_or(false),
            response.raw_score,
            response
                .model_version
                .unwrap_or_else(|| "unversioned".to_string()),
        ))
    }
}

fn check_score(response: ScoreResponse) -> Result<ScoreResponse, ScorerError> {
    if response.raw_score.is_finite() {
        Ok(response)
    } else {
        Err(ScorerError::Malformed(format!(
            "raw score {} is not a finite number",
            response.raw_score
        )))
    }
}
