//! Per-pillar risk classification types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three independent risk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    Credit,
    Fraud,
    #[serde(rename = "AML")]
    Aml,
}

impl Pillar {
    /// Manual-review priority: Fraud and AML findings are actioned before Credit.
    pub const REVIEW_ORDER: [Pillar; 3] = [Pillar::Fraud, Pillar::Aml, Pillar::Credit];

    /// Position in [`Pillar::REVIEW_ORDER`], lower is reviewed first.
    pub fn review_rank(self) -> usize {
        match self {
            Pillar::Fraud => 0,
            Pillar::Aml => 1,
            Pillar::Credit => 2,
        }
    }

    /// Lowercase key used in configuration, error messages and metric labels
    pub fn key(self) -> &'static str {
        match self {
            Pillar::Credit => "credit",
            Pillar::Fraud => "fraud",
            Pillar::Aml => "aml",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Pillar::Credit => "Credit",
            Pillar::Fraud => "Fraud",
            Pillar::Aml => "AML",
        }
    }

    /// Whether the upstream scorer for this pillar may raise a critical flag
    pub fn supports_critical_flag(self) -> bool {
        !matches!(self, Pillar::Credit)
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Three-level risk severity. Variant order is the severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Green,
    Yellow,
    Red,
}

impl RiskBand {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Green => "Green",
            RiskBand::Yellow => "Yellow",
            RiskBand::Red => "Red",
        }
    }

    pub fn is_elevated(self) -> bool {
        self > RiskBand::Green
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical output of one pillar's scorer after banding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarAssessment {
    pub pillar: Pillar,
    pub band: RiskBand,
    pub critical_flag: bool,
    pub raw_score: f64,
    pub model_version: String,
}

impl PillarAssessment {
    /// Build an assessment. Credit never carries a critical flag, so any flag
    /// passed for it is dropped.
    pub fn new(
        pillar: Pillar,
        band: RiskBand,
        critical_flag: bool,
        raw_score: f64,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            pillar,
            band,
            critical_flag: critical_flag && pillar.supports_critical_flag(),
            raw_score,
            model_version: model_version.into(),
        }
    }
}
