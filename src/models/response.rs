//! Payload returned at the API boundary.

use serde::{Deserialize, Serialize};

use crate::models::decision::{Outcome, TriggeringRule};
use crate::models::pillar::{Pillar, RiskBand};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub request_id: String,
    pub outcome: Outcome,
    pub bands: PillarBands,
    pub scores: PillarScores,
    pub flags: CriticalFlags,
    pub triggering_rule: TriggeringRule,
    pub explanation: String,
    pub contributing_pillars: Vec<Pillar>,
}

/// Every pillar band is a required field, so a payload cannot be emitted
/// with a band missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarBands {
    pub credit: RiskBand,
    pub fraud: RiskBand,
    pub aml: RiskBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarScores {
    pub credit: f64,
    pub fraud: f64,
    pub aml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalFlags {
    pub fraud: bool,
    pub aml: bool,
}
