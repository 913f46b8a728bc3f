//! Templated, deterministic decision rationale for the compliance audit log.
//!
//! The text depends only on the decision and the assessments (never on the
//! request id, clock or locale) so identical inputs produce identical bytes.
//! Raw scores are printed in their shortest exact form, unrounded, so the
//! text always agrees with the band it reports.

use std::fmt::Write;

use crate::models::decision::{Decision, TriggeringRule};
use crate::models::evaluation::EvaluationRequest;
use crate::models::pillar::{Pillar, PillarAssessment};

pub fn explain(decision: &Decision, assessments: &EvaluationRequest) -> String {
    let mut text = format!(
        "{} under rule '{}': {}.",
        decision.outcome,
        decision.triggering_rule,
        rule_summary(decision.triggering_rule, assessments)
    );

    text.push_str(" Contributing pillars: ");
    if decision.contributing_pillars.is_empty() {
        text.push_str("none");
    } else {
        let contributing: Vec<String> = decision
            .contributing_pillars
            .iter()
            .map(|pillar| describe(assessments.get(*pillar)))
            .collect();
        text.push_str(&contributing.join(", "));
    }
    text.push('.');

    text.push_str(" Assessed:");
    for pillar in [Pillar::Credit, Pillar::Fraud, Pillar::Aml] {
        let assessment = assessments.get(pillar);
        // Writing into a String cannot fail.
        let _ = write!(
            text,
            " {}={} (score {}, model {}{});",
            assessment.pillar,
            assessment.band,
            assessment.raw_score,
            assessment.model_version,
            if assessment.critical_flag { ", critical flag" } else { "" }
        );
    }
    text.pop();
    text.push('.');

    text
}

fn rule_summary(rule: TriggeringRule, assessments: &EvaluationRequest) -> String {
    match rule {
        TriggeringRule::CriticalFlag => {
            let flagged: Vec<&str> = assessments
                .in_review_order()
                .iter()
                .filter(|a| a.critical_flag)
                .map(|a| a.pillar.display_name())
                .collect();
            format!("critical flag raised by {}", flagged.join(" and "))
        }
        TriggeringRule::AllRed => "all three pillars are Red".to_string(),
        TriggeringRule::AllGreen => "all three pillars are Green".to_string(),
        TriggeringRule::MixedRisk => "bands are mixed across pillars".to_string(),
    }
}

fn describe(assessment: &PillarAssessment) -> String {
    format!(
        "{}={} (score {})",
        assessment.pillar, assessment.band, assessment.raw_score
    )
}
