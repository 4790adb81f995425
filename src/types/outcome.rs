//! ComparisonOutcome - Classification produced by the diff engine

use serde::{Deserialize, Serialize};

/// A maximal span `[offset, offset + length)` where both sequences differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRun {
    /// Index of the first differing byte
    pub offset: usize,

    /// Number of consecutive differing bytes (always > 0)
    pub length: usize,
}

impl DiffRun {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Exclusive end index of the run
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Result of comparing two byte sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Same length and same content
    Equal,

    /// Lengths differ; content was not scanned
    SizeMismatch,

    /// Same length, differing content; runs are non-empty and offset-ascending
    ContentMismatch(Vec<DiffRun>),
}

impl ComparisonOutcome {
    pub fn is_equal(&self) -> bool {
        matches!(self, ComparisonOutcome::Equal)
    }

    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, ComparisonOutcome::SizeMismatch)
    }

    pub fn is_content_mismatch(&self) -> bool {
        matches!(self, ComparisonOutcome::ContentMismatch(_))
    }

    /// Differing runs, if the outcome carries any
    pub fn runs(&self) -> Option<&[DiffRun]> {
        match self {
            ComparisonOutcome::ContentMismatch(runs) => Some(runs),
            _ => None,
        }
    }

    /// Total number of differing bytes
    pub fn differing_bytes(&self) -> usize {
        self.runs()
            .map(|runs| runs.iter().map(|run| run.length).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_end() {
        let run = DiffRun::new(2, 3);
        assert_eq!(run.end(), 5);
    }

    #[test]
    fn test_runs_only_for_content_mismatch() {
        assert!(ComparisonOutcome::Equal.runs().is_none());
        assert!(ComparisonOutcome::SizeMismatch.runs().is_none());

        let outcome = ComparisonOutcome::ContentMismatch(vec![DiffRun::new(0, 1)]);
        assert_eq!(outcome.runs(), Some(&[DiffRun::new(0, 1)][..]));
    }

    #[test]
    fn test_differing_bytes() {
        let outcome =
            ComparisonOutcome::ContentMismatch(vec![DiffRun::new(0, 1), DiffRun::new(2, 2)]);
        assert_eq!(outcome.differing_bytes(), 3);
        assert_eq!(ComparisonOutcome::SizeMismatch.differing_bytes(), 0);
    }

    #[test]
    fn test_run_serialization_shape() {
        let json = serde_json::to_string(&DiffRun::new(4, 8)).expect("serialize run");
        assert_eq!(json, r#"{"offset":4,"length":8}"#);
    }
}
