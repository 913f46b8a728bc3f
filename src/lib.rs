//! Lending decision engine.
//!
//! Combines the Credit, Fraud and AML risk assessments of an applicant into a
//! single Approve / Review / Reject outcome with an auditable explanation.

pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod services;

pub use errors::{EngineError, ScorerError};
