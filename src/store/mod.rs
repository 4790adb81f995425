//! Payload storage - Where uploaded left/right payloads live between requests

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::types::{BinDiffError, ComparisonId, Payload, Side, StoredComparison};
use std::sync::Arc;

/// Storage collaborator for comparison payloads
///
/// A single id's record must never be observed half-written: `load` returns
/// either the previous or the new content of a side, never a mix.
pub trait PayloadStore: Send + Sync {
    /// Fetch the record for `id`; `None` if nothing was ever uploaded
    fn load(&self, id: ComparisonId) -> Result<Option<StoredComparison>, BinDiffError>;

    /// Insert or replace one side of `id`, creating the record if needed
    fn save(
        &self,
        id: ComparisonId,
        side: Side,
        payload: Payload,
    ) -> Result<StoredComparison, BinDiffError>;

    /// All ids with at least one stored side, ascending
    fn ids(&self) -> Result<Vec<ComparisonId>, BinDiffError>;
}

impl<T: PayloadStore + ?Sized> PayloadStore for Arc<T> {
    fn load(&self, id: ComparisonId) -> Result<Option<StoredComparison>, BinDiffError> {
        (**self).load(id)
    }

    fn save(
        &self,
        id: ComparisonId,
        side: Side,
        payload: Payload,
    ) -> Result<StoredComparison, BinDiffError> {
        (**self).save(id, side, payload)
    }

    fn ids(&self) -> Result<Vec<ComparisonId>, BinDiffError> {
        (**self).ids()
    }
}
