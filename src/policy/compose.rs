//! Assembles the API-boundary payload from a decision and its inputs.

use crate::models::decision::Decision;
use crate::models::evaluation::EvaluationRequest;
use crate::models::response::{CriticalFlags, PillarBands, PillarScores, ResponsePayload};

/// Pure formatting step. The outcome is a closed enum and every band is a
/// required field, so a partially-populated payload is unrepresentable.
pub fn compose(
    decision: Decision,
    explanation: String,
    assessments: &EvaluationRequest,
) -> ResponsePayload {
    ResponsePayload {
        request_id: assessments.request_id.clone(),
        outcome: decision.outcome,
        bands: PillarBands {
            credit: assessments.credit.band,
            fraud: assessments.fraud.band,
            aml: assessments.aml.band,
        },
        scores: PillarScores {
            credit: assessments.credit.raw_score,
            fraud: assessments.fraud.raw_score,
            aml: assessments.aml.raw_score,
        },
        flags: CriticalFlags {
            fraud: assessments.fraud.critical_flag,
            aml: assessments.aml.critical_flag,
        },
        triggering_rule: decision.triggering_rule,
        explanation,
        contributing_pillars: decision.contributing_pillars,
    }
}
