//! Resolve stored payloads by id and compare them

use crate::diff::{compare, DiffResult};
use crate::store::PayloadStore;
use crate::types::{BinDiffError, ComparisonId, ComparisonOutcome};
use tracing::debug;

/// Compares the left and right payloads stored under an id
#[derive(Debug, Clone)]
pub struct ComparisonService<S> {
    store: S,
}

impl<S: PayloadStore> ComparisonService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load both payloads for `id`
    ///
    /// Returns `NotFound` when the record or either side is missing. This is
    /// always evaluated before any comparison runs.
    pub fn fetch_pair(&self, id: ComparisonId) -> Result<(Vec<u8>, Vec<u8>), BinDiffError> {
        let record = self
            .store
            .load(id)?
            .ok_or(BinDiffError::NotFound { id })?;

        match (record.left, record.right) {
            (Some(left), Some(right)) => Ok((left.content, right.content)),
            (left, right) => {
                debug!(
                    id,
                    has_left = left.is_some(),
                    has_right = right.is_some(),
                    "comparison incomplete"
                );
                Err(BinDiffError::NotFound { id })
            }
        }
    }

    /// Classify the stored payloads of `id`
    pub fn outcome(&self, id: ComparisonId) -> Result<ComparisonOutcome, BinDiffError> {
        let (left, right) = self.fetch_pair(id)?;
        let outcome = compare(&left, &right)?;

        debug!(
            id,
            left_len = left.len(),
            right_len = right.len(),
            runs = outcome.runs().map_or(0, |runs| runs.len()),
            "compared payloads"
        );

        Ok(outcome)
    }

    /// Comparison result of `id` in its external shape
    pub fn get_comparison(&self, id: ComparisonId) -> Result<DiffResult, BinDiffError> {
        self.outcome(id).map(DiffResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ResultType;
    use crate::store::MemoryStore;
    use crate::types::{DiffRun, Payload, Side};

    fn service_with(
        id: ComparisonId,
        left: Option<&[u8]>,
        right: Option<&[u8]>,
    ) -> ComparisonService<MemoryStore> {
        let store = MemoryStore::new();
        if let Some(left) = left {
            store.save(id, Side::Left, Payload::new(left.to_vec())).unwrap();
        }
        if let Some(right) = right {
            store.save(id, Side::Right, Payload::new(right.to_vec())).unwrap();
        }
        ComparisonService::new(store)
    }

    #[test]
    fn test_equal_payloads() {
        let service = service_with(1, Some(&[0, 0, 0, 0]), Some(&[0, 0, 0, 0]));
        let result = service.get_comparison(1).unwrap();
        assert_eq!(result.result_type, ResultType::Equals);
        assert!(result.diffs.is_none());
    }

    #[test]
    fn test_size_mismatch() {
        let service = service_with(1, Some(&[0, 0, 0, 0]), Some(&[0, 0]));
        let result = service.get_comparison(1).unwrap();
        assert_eq!(result.result_type, ResultType::SizeDoNotMatch);
        assert!(result.diffs.is_none());
    }

    #[test]
    fn test_content_mismatch() {
        let service = service_with(1, Some(&[0, 0, 0, 0]), Some(&[1, 0, 1, 1]));
        let result = service.get_comparison(1).unwrap();
        assert_eq!(result.result_type, ResultType::ContentDoNotMatch);
        assert_eq!(
            result.diffs,
            Some(vec![DiffRun::new(0, 1), DiffRun::new(2, 2)])
        );
    }

    #[test]
    fn test_missing_right_is_not_found() {
        let service = service_with(3, Some(&[1, 2, 3]), None);
        let err = service.get_comparison(3).unwrap_err();
        assert!(matches!(err, BinDiffError::NotFound { id: 3 }));
    }

    #[test]
    fn test_missing_left_is_not_found() {
        let service = service_with(3, None, Some(&[1, 2, 3]));
        assert!(service.get_comparison(3).unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let service = ComparisonService::new(MemoryStore::new());
        assert!(service.get_comparison(99).unwrap_err().is_not_found());
    }
}
