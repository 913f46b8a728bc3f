//! Stub scorers and fixtures shared by unit and integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use riskgate::config::EngineConfig;
use riskgate::core::orchestrator::AggregationOrchestrator;
use riskgate::errors::ScorerError;
use riskgate::models::features::ApplicantFeatures;
use riskgate::models::pillar::{Pillar, PillarAssessment, RiskBand};
use riskgate::services::scorer::{RiskScorer, ScoreResponse};

/// Scorer that answers after an optional delay with a fixed result
pub struct StubScorer {
    pillar: Pillar,
    result: Result<ScoreResponse, ScorerError>,
    delay: Duration,
    calls: AtomicUsize,
    completed: Arc<AtomicBool>,
}

impl StubScorer {
    pub fn ok(pillar: Pillar, raw_score: f64) -> Self {
        Self::with_result(
            pillar,
            Ok(ScoreResponse::new(raw_score).with_model_version(format!("{}-v1", pillar.key()))),
        )
    }

    pub fn flagged(pillar: Pillar, raw_score: f64) -> Self {
        Self::with_result(
            pillar,
            Ok(ScoreResponse::new(raw_score)
                .with_critical_flag(true)
                .with_model_version(format!("{}-v1", pillar.key()))),
        )
    }

    pub fn failing(pillar: Pillar, error: ScorerError) -> Self {
        Self::with_result(pillar, Err(error))
    }

    pub fn with_result(pillar: Pillar, result: Result<ScoreResponse, ScorerError>) -> Self {
        Self {
            pillar,
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Set once the scorer ran to completion (not cancelled mid-call)
    pub fn completed_flag(&self) -> Arc<AtomicBool> {
        self.completed.clone()
    }
}

#[async_trait]
impl RiskScorer for StubScorer {
    fn pillar(&self) -> Pillar {
        self.pillar
    }

    async fn score(&self, _features: &ApplicantFeatures) -> Result<ScoreResponse, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.store(true, Ordering::SeqCst);
        self.result.clone()
    }
}

pub fn orchestrator(
    credit: StubScorer,
    fraud: StubScorer,
    aml: StubScorer,
) -> AggregationOrchestrator {
    orchestrator_with_config(credit, fraud, aml, EngineConfig::default())
}

pub fn orchestrator_with_config(
    credit: StubScorer,
    fraud: StubScorer,
    aml: StubScorer,
    config: EngineConfig,
) -> AggregationOrchestrator {
    AggregationOrchestrator::new(Arc::new(credit), Arc::new(fraud), Arc::new(aml), config)
        .expect("valid orchestrator")
}

/// Low-risk applicant taken from the source dataset examples
pub fn sample_features() -> ApplicantFeatures {
    ApplicantFeatures {
        sk_id_curr: 100002,
        amt_income_total: 650_000.0,
        amt_credit: 90_000.0,
        amt_annuity: 10_000.0,
        amt_goods_price: 80_000.0,
        days_birth: -13_000,
        days_employed: -5_000,
        code_gender: "F".to_string(),
        name_income_type: "Businessman".to_string(),
        organization_type: "Business Entity Type 3".to_string(),
        ext_source_1: 0.9,
        ext_source_2: 0.9,
        ext_source_3: 0.9,
    }
}

pub fn sample_features_json() -> serde_json::Value {
    serde_json::json!({
        "SK_ID_CURR": 100002,
        "AMT_INCOME_TOTAL": 650000.0,
        "AMT_CREDIT": 90000.0,
        "AMT_ANNUITY": 10000.0,
        "AMT_GOODS_PRICE": 80000.0,
        "DAYS_BIRTH": -13000,
        "DAYS_EMPLOYED": -5000,
        "CODE_GENDER": "F",
        "NAME_INCOME_TYPE": "Businessman",
        "ORGANIZATION_TYPE": "Business Entity Type 3",
        "EXT_SOURCE_1": 0.9,
        "EXT_SOURCE_2": 0.9,
        "EXT_SOURCE_3": 0.9
    })
}

pub fn assessment(pillar: Pillar, band: RiskBand, raw_score: f64) -> PillarAssessment {
    PillarAssessment::new(pillar, band, false, raw_score, format!("{}-v1", pillar.key()))
}

pub fn flagged_assessment(pillar: Pillar, band: RiskBand, raw_score: f64) -> PillarAssessment {
    PillarAssessment::new(pillar, band, true, raw_score, format!("{}-v1", pillar.key()))
}
