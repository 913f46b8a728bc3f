//! Policy rule set mapping three pillar assessments to a decision.
//!
//! Rules, first match wins:
//! 1. Fraud or AML critical flag -> Reject (`critical-flag`), whatever the bands
//! 2. All three bands Red -> Reject (`all-red`)
//! 3. All three bands Green -> Approve (`all-green`)
//! 4. Anything else -> Review (`mixed-risk`)

use std::cmp::Reverse;

use crate::models::decision::{Decision, Outcome, TriggeringRule};
use crate::models::evaluation::EvaluationRequest;
use crate::models::pillar::{Pillar, PillarAssessment, RiskBand};

/// Total and pure: the same three assessments always yield the same decision.
pub fn decide(
    credit: &PillarAssessment,
    fraud: &PillarAssessment,
    aml: &PillarAssessment,
) -> Decision {
    let bands = [credit.band, fraud.band, aml.band];

    let (outcome, triggering_rule) = if fraud.critical_flag || aml.critical_flag {
        (Outcome::Reject, TriggeringRule::CriticalFlag)
    } else if bands.iter().all(|band| *band == RiskBand::Red) {
        (Outcome::Reject, TriggeringRule::AllRed)
    } else if bands.iter().all(|band| *band == RiskBand::Green) {
        (Outcome::Approve, TriggeringRule::AllGreen)
    } else {
        (Outcome::Review, TriggeringRule::MixedRisk)
    };

    Decision {
        outcome,
        triggering_rule,
        contributing_pillars: contributing_pillars(credit, fraud, aml),
    }
}

pub fn decide_request(request: &EvaluationRequest) -> Decision {
    decide(&request.credit, &request.fraud, &request.aml)
}

/// Pillars strictly above Green, most severe first. Equal severities keep the
/// review order Fraud, AML, Credit.
pub fn contributing_pillars(
    credit: &PillarAssessment,
    fraud: &PillarAssessment,
    aml: &PillarAssessment,
) -> Vec<Pillar> {
    let mut elevated: Vec<(Pillar, RiskBand)> = [
        (Pillar::Fraud, fraud.band),
        (Pillar::Aml, aml.band),
        (Pillar::Credit, credit.band),
    ]
    .into_iter()
    .filter(|(_, band)| band.is_elevated())
    .collect();

    elevated.sort_by_key(|(pillar, band)| (Reverse(*band), pillar.review_rank()));
    elevated.into_iter().map(|(pillar, _)| pillar).collect()
}
