//! Core type definitions for bindiff

mod error;
mod outcome;
mod payload;

pub use error::BinDiffError;
pub use outcome::{ComparisonOutcome, DiffRun};
pub use payload::{ComparisonId, Payload, Side, StoredComparison};
