//! External representation of a comparison outcome

use crate::types::{ComparisonOutcome, DiffRun};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type tag as exposed to API consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultType {
    Equals,
    ContentDoNotMatch,
    SizeDoNotMatch,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Equals => "Equals",
            ResultType::ContentDoNotMatch => "ContentDoNotMatch",
            ResultType::SizeDoNotMatch => "SizeDoNotMatch",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable diff result: a tag plus runs for content mismatches
///
/// `diffs` is left out of the JSON entirely unless the content differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub result_type: ResultType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffs: Option<Vec<DiffRun>>,
}

impl From<ComparisonOutcome> for DiffResult {
    fn from(outcome: ComparisonOutcome) -> Self {
        match outcome {
            ComparisonOutcome::Equal => DiffResult {
                result_type: ResultType::Equals,
                diffs: None,
            },
            ComparisonOutcome::SizeMismatch => DiffResult {
                result_type: ResultType::SizeDoNotMatch,
                diffs: None,
            },
            ComparisonOutcome::ContentMismatch(runs) => DiffResult {
                result_type: ResultType::ContentDoNotMatch,
                diffs: Some(runs),
            },
        }
    }
}
