//! Orchestration over the store and the diff engine

mod comparison;
mod payloads;

pub use comparison::ComparisonService;
pub use payloads::{ComparisonSummary, PayloadInfo, PayloadService};
