//! Decision policy: rule set, explainer and response composer.
//!
//! Everything here is synchronous and side-effect free.

pub mod compose;
pub mod explain;
pub mod rules;

pub use compose::compose;
pub use explain::explain;
pub use rules::{contributing_pillars, decide, decide_request};
