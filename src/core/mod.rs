//! Core application primitives (orchestrator, HTTP surface)

pub mod http;
pub mod orchestrator;

pub use http::*;
pub use orchestrator::*;
