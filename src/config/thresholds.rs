//! Per-pillar score thresholds used to band raw scorer output.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::pillar::{Pillar, RiskBand};

/// Band boundaries for one pillar: `score <= green_max` is Green,
/// `score <= yellow_max` is Yellow, anything above is Red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarThresholds {
    pub green_max: f64,
    pub yellow_max: f64,
}

impl PillarThresholds {
    pub const fn new(green_max: f64, yellow_max: f64) -> Self {
        Self {
            green_max,
            yellow_max,
        }
    }

    pub fn validate(&self, pillar: Pillar) -> Result<(), EngineError> {
        if !self.green_max.is_finite() || !self.yellow_max.is_finite() {
            return Err(EngineError::ThresholdConfigInvalid {
                pillar,
                reason: format!(
                    "thresholds must be finite (greenMax={}, yellowMax={})",
                    self.green_max, self.yellow_max
                ),
            });
        }
        if self.green_max >= self.yellow_max {
            return Err(EngineError::ThresholdConfigInvalid {
                pillar,
                reason: format!(
                    "greenMax ({}) must be strictly below yellowMax ({})",
                    self.green_max, self.yellow_max
                ),
            });
        }
        Ok(())
    }

    /// Caller must have rejected non-finite scores already.
    pub fn classify(&self, score: f64) -> RiskBand {
        if score <= self.green_max {
            RiskBand::Green
        } else if score <= self.yellow_max {
            RiskBand::Yellow
        } else {
            RiskBand::Red
        }
    }
}

/// Threshold tables for all three pillars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub credit: PillarThresholds,
    pub fraud: PillarThresholds,
    pub aml: PillarThresholds,
}

impl ThresholdTable {
    pub const DEFAULT_CREDIT: PillarThresholds = PillarThresholds::new(0.30, 0.60);
    pub const DEFAULT_FRAUD: PillarThresholds = PillarThresholds::new(0.20, 0.50);
    pub const DEFAULT_AML: PillarThresholds = PillarThresholds::new(0.25, 0.60);

    pub fn get(&self, pillar: Pillar) -> &PillarThresholds {
        match pillar {
            Pillar::Credit => &self.credit,
            Pillar::Fraud => &self.fraud,
            Pillar::Aml => &self.aml,
        }
    }

    pub fn get_mut(&mut self, pillar: Pillar) -> &mut PillarThresholds {
        match pillar {
            Pillar::Credit => &mut self.credit,
            Pillar::Fraud => &mut self.fraud,
            Pillar::Aml => &mut self.aml,
        }
    }

    /// Fails on the first pillar (review order) with an unusable table.
    pub fn validate(&self) -> Result<(), EngineError> {
        for pillar in Pillar::REVIEW_ORDER {
            self.get(pillar).validate(pillar)?;
        }
        Ok(())
    }

    pub fn classify(&self, pillar: Pillar, score: f64) -> RiskBand {
        self.get(pillar).classify(score)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            credit: Self::DEFAULT_CREDIT,
            fraud: Self::DEFAULT_FRAUD,
            aml: Self::DEFAULT_AML,
        }
    }
}
