//! Application layer: Use cases and services.
//!
//! This module orchestrates the scoring engine with ports to implement
//! the core use cases of the application.

mod assessment;
mod trends;

pub use assessment::AssessmentService;
pub use trends::{TrendSummary, TrendsService};
