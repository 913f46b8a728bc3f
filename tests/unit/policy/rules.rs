//! Unit tests for the decision rule set

use riskgate::models::decision::{Outcome, TriggeringRule};
use riskgate::models::pillar::{Pillar, RiskBand};
use riskgate::policy::decide;

use crate::common_scorers::{assessment, flagged_assessment};

const BANDS: [RiskBand; 3] = [RiskBand::Green, RiskBand::Yellow, RiskBand::Red];

fn score_for(band: RiskBand) -> f64 {
    match band {
        RiskBand::Green => 0.1,
        RiskBand::Yellow => 0.45,
        RiskBand::Red => 0.9,
    }
}

#[test]
fn all_green_without_flags_approves() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Green, 0.1),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &assessment(Pillar::Aml, RiskBand::Green, 0.1),
    );
    assert_eq!(decision.outcome, Outcome::Approve);
    assert_eq!(decision.triggering_rule, TriggeringRule::AllGreen);
    assert!(decision.contributing_pillars.is_empty());
}

#[test]
fn all_red_without_flags_rejects() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Red, 0.9),
        &assessment(Pillar::Fraud, RiskBand::Red, 0.8),
        &assessment(Pillar::Aml, RiskBand::Red, 0.95),
    );
    assert_eq!(decision.outcome, Outcome::Reject);
    assert_eq!(decision.triggering_rule, TriggeringRule::AllRed);
    assert_eq!(
        decision.contributing_pillars,
        vec![Pillar::Fraud, Pillar::Aml, Pillar::Credit]
    );
}

#[test]
fn fraud_flag_rejects_regardless_of_bands() {
    for credit in BANDS {
        for fraud in BANDS {
            for aml in BANDS {
                let decision = decide(
                    &assessment(Pillar::Credit, credit, score_for(credit)),
                    &flagged_assessment(Pillar::Fraud, fraud, score_for(fraud)),
                    &assessment(Pillar::Aml, aml, score_for(aml)),
                );
                assert_eq!(decision.outcome, Outcome::Reject);
                assert_eq!(decision.triggering_rule, TriggeringRule::CriticalFlag);
            }
        }
    }
}

#[test]
fn aml_flag_on_green_band_still_rejects() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Green, 0.1),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &flagged_assessment(Pillar::Aml, RiskBand::Green, 0.1),
    );
    assert_eq!(decision.outcome, Outcome::Reject);
    assert_eq!(decision.triggering_rule, TriggeringRule::CriticalFlag);
    assert!(decision.contributing_pillars.is_empty());
}

#[test]
fn credit_flag_is_ignored() {
    let decision = decide(
        &flagged_assessment(Pillar::Credit, RiskBand::Green, 0.1),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &assessment(Pillar::Aml, RiskBand::Green, 0.1),
    );
    assert_eq!(decision.outcome, Outcome::Approve);
}

#[test]
fn every_unflagged_mix_follows_precedence() {
    for credit in BANDS {
        for fraud in BANDS {
            for aml in BANDS {
                let decision = decide(
                    &assessment(Pillar::Credit, credit, score_for(credit)),
                    &assessment(Pillar::Fraud, fraud, score_for(fraud)),
                    &assessment(Pillar::Aml, aml, score_for(aml)),
                );
                let bands = [credit, fraud, aml];
                let expected = if bands.iter().all(|b| *b == RiskBand::Red) {
                    (Outcome::Reject, TriggeringRule::AllRed)
                } else if bands.iter().all(|b| *b == RiskBand::Green) {
                    (Outcome::Approve, TriggeringRule::AllGreen)
                } else {
                    (Outcome::Review, TriggeringRule::MixedRisk)
                };
                assert_eq!(
                    (decision.outcome, decision.triggering_rule),
                    expected,
                    "credit={credit:?} fraud={fraud:?} aml={aml:?}"
                );
            }
        }
    }
}

#[test]
fn two_red_one_yellow_is_review() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Yellow, 0.45),
        &assessment(Pillar::Fraud, RiskBand::Red, 0.8),
        &assessment(Pillar::Aml, RiskBand::Red, 0.9),
    );
    assert_eq!(decision.outcome, Outcome::Review);
    assert_eq!(decision.triggering_rule, TriggeringRule::MixedRisk);
}

#[test]
fn two_red_one_green_is_review() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Red, 0.9),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &assessment(Pillar::Aml, RiskBand::Red, 0.9),
    );
    assert_eq!(decision.outcome, Outcome::Review);
    assert_eq!(decision.contributing_pillars, vec![Pillar::Aml, Pillar::Credit]);
}

#[test]
fn contributing_pillars_rank_severity_before_review_order() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Red, 0.9),
        &assessment(Pillar::Fraud, RiskBand::Yellow, 0.3),
        &assessment(Pillar::Aml, RiskBand::Yellow, 0.4),
    );
    assert_eq!(
        decision.contributing_pillars,
        vec![Pillar::Credit, Pillar::Fraud, Pillar::Aml]
    );
}

#[test]
fn credit_yellow_example_is_review_with_credit_contributing() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Yellow, 0.42),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &assessment(Pillar::Aml, RiskBand::Green, 0.10),
    );
    assert_eq!(decision.outcome, Outcome::Review);
    assert_eq!(decision.triggering_rule, TriggeringRule::MixedRisk);
    assert_eq!(decision.contributing_pillars, vec![Pillar::Credit]);
}

#[test]
fn flagged_red_aml_example_rejects_with_aml_contributing() {
    let decision = decide(
        &assessment(Pillar::Credit, RiskBand::Green, 0.1),
        &assessment(Pillar::Fraud, RiskBand::Green, 0.05),
        &flagged_assessment(Pillar::Aml, RiskBand::Red, 0.95),
    );
    assert_eq!(decision.outcome, Outcome::Reject);
    assert_eq!(decision.triggering_rule, TriggeringRule::CriticalFlag);
    assert_eq!(decision.contributing_pillars, vec![Pillar::Aml]);
}

#[test]
fn decide_is_idempotent() {
    let credit = assessment(Pillar::Credit, RiskBand::Yellow, 0.42);
    let fraud = assessment(Pillar::Fraud, RiskBand::Red, 0.7);
    let aml = assessment(Pillar::Aml, RiskBand::Green, 0.1);
    assert_eq!(decide(&credit, &fraud, &aml), decide(&credit, &fraud, &aml));
}

#[test]
fn triggering_rule_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&TriggeringRule::CriticalFlag).unwrap(),
        "\"critical-flag\""
    );
    assert_eq!(TriggeringRule::MixedRisk.to_string(), "mixed-risk");
}
