use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::pillar::Pillar;

/// Final lending outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Approve,
    Review,
    Reject,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Approve => "Approve",
            Outcome::Review => "Review",
            Outcome::Reject => "Reject",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy rule that produced a decision, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggeringRule {
    CriticalFlag,
    AllRed,
    AllGreen,
    MixedRisk,
}

impl TriggeringRule {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggeringRule::CriticalFlag => "critical-flag",
            TriggeringRule::AllRed => "all-red",
            TriggeringRule::AllGreen => "all-green",
            TriggeringRule::MixedRisk => "mixed-risk",
        }
    }
}

impl fmt::Display for TriggeringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub triggering_rule: TriggeringRule,
    /// Pillars above Green, most severe first, ties broken Fraud, AML, Credit
    pub contributing_pillars: Vec<Pillar>,
}
