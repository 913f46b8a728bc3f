//! Unit tests for assembling evaluation requests

use riskgate::errors::EngineError;
use riskgate::models::evaluation::EvaluationRequest;
use riskgate::models::pillar::{Pillar, RiskBand};

use crate::common_scorers::assessment;

#[test]
fn assessments_land_in_their_own_slot_whatever_the_arrival_order() {
    let credit = assessment(Pillar::Credit, RiskBand::Yellow, 0.42);
    let fraud = assessment(Pillar::Fraud, RiskBand::Green, 0.05);
    let aml = assessment(Pillar::Aml, RiskBand::Red, 0.95);

    let orders = [
        vec![credit.clone(), fraud.clone(), aml.clone()],
        vec![aml.clone(), credit.clone(), fraud.clone()],
        vec![fraud.clone(), aml.clone(), credit.clone()],
    ];

    for order in orders {
        let request = EvaluationRequest::from_assessments("req-1", order).unwrap();
        assert_eq!(request.credit, credit);
        assert_eq!(request.fraud, fraud);
        assert_eq!(request.aml, aml);
    }
}

#[test]
fn missing_pillar_is_reported_unavailable() {
    let result = EvaluationRequest::from_assessments(
        "req-2",
        vec![
            assessment(Pillar::Credit, RiskBand::Green, 0.1),
            assessment(Pillar::Aml, RiskBand::Green, 0.1),
        ],
    );

    match result {
        Err(EngineError::ScorerUnavailable { pillar, .. }) => assert_eq!(pillar, Pillar::Fraud),
        other => panic!("expected ScorerUnavailable, got {:?}", other),
    }
}

#[test]
fn duplicate_pillar_is_rejected() {
    let result = EvaluationRequest::from_assessments(
        "req-3",
        vec![
            assessment(Pillar::Credit, RiskBand::Green, 0.1),
            assessment(Pillar::Credit, RiskBand::Red, 0.9),
            assessment(Pillar::Fraud, RiskBand::Green, 0.1),
            assessment(Pillar::Aml, RiskBand::Green, 0.1),
        ],
    );

    assert!(matches!(
        result,
        Err(EngineError::DuplicateAssessment(Pillar::Credit))
    ));
}

#[test]
fn review_order_lists_fraud_aml_credit() {
    let request = EvaluationRequest::from_assessments(
        "req-4",
        vec![
            assessment(Pillar::Credit, RiskBand::Green, 0.1),
            assessment(Pillar::Fraud, RiskBand::Green, 0.1),
            assessment(Pillar::Aml, RiskBand::Green, 0.1),
        ],
    )
    .unwrap();

    let pillars: Vec<Pillar> = request.in_review_order().iter().map(|a| a.pillar).collect();
    assert_eq!(pillars, vec![Pillar::Fraud, Pillar::Aml, Pillar::Credit]);
}
