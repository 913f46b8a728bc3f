//! A complete set of assessments for one applicant.

use serde::Serialize;

use crate::errors::EngineError;
use crate::models::pillar::{Pillar, PillarAssessment};

/// Exactly one assessment per pillar, keyed by slot so the policy can never
/// see a partial risk picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRequest {
    pub request_id: String,
    pub credit: PillarAssessment,
    pub fraud: PillarAssessment,
    pub aml: PillarAssessment,
}

impl EvaluationRequest {
    /// Assemble a request from assessments in arrival order.
    ///
    /// Arrival order is irrelevant: each assessment lands in the slot named by
    /// its own `pillar` tag. A pillar with no assessment is reported as
    /// unavailable, never defaulted.
    pub fn from_assessments<I>(request_id: impl Into<String>, assessments: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = PillarAssessment>,
    {
        let mut credit = None;
        let mut fraud = None;
        let mut aml = None;

        for assessment in assessments {
            let slot = match assessment.pillar {
                Pillar::Credit => &mut credit,
                Pillar::Fraud => &mut fraud,
                Pillar::Aml => &mut aml,
            };
            if slot.is_some() {
                return Err(EngineError::DuplicateAssessment(assessment.pillar));
            }
            *slot = Some(assessment);
        }

        let missing = |pillar: Pillar| EngineError::ScorerUnavailable {
            pillar,
            reason: "no assessment received".to_string(),
        };

        Ok(Self {
            request_id: request_id.into(),
            credit: credit.ok_or_else(|| missing(Pillar::Credit))?,
            fraud: fraud.ok_or_else(|| missing(Pillar::Fraud))?,
            aml: aml.ok_or_else(|| missing(Pillar::Aml))?,
        })
    }

    pub fn get(&self, pillar: Pillar) -> &PillarAssessment {
        match pillar {
            Pillar::Credit => &self.credit,
            Pillar::Fraud => &self.fraud,
            Pillar::Aml => &self.aml,
        }
    }

    /// Assessments in review-priority order (Fraud, AML, Credit).
    pub fn in_review_order(&self) -> [&PillarAssessment; 3] {
        [&self.fraud, &self.aml, &self.credit]
    }
}
