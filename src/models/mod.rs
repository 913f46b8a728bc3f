//! Shared data models spanning the engine layers.

pub mod decision;
pub mod evaluation;
pub mod features;
pub mod pillar;
pub mod response;

pub use decision::{Decision, Outcome, TriggeringRule};
pub use evaluation::EvaluationRequest;
pub use features::ApplicantFeatures;
pub use pillar::{Pillar, PillarAssessment, RiskBand};
pub use response::{CriticalFlags, PillarBands, PillarScores, ResponsePayload};
