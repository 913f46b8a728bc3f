//! External scoring collaborators.

pub mod http_scorer;
pub mod scorer;

pub use http_scorer::HttpScorer;
pub use scorer::{RiskScorer, ScoreResponse};
