//! Upload and retrieval of comparison payloads

use crate::hash::payload_digest;
use crate::store::PayloadStore;
use crate::types::{BinDiffError, ComparisonId, Payload, Side, StoredComparison};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Description of one stored side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadInfo {
    pub size: usize,

    /// Blake3 digest, hex encoded
    pub digest: String,

    pub uploaded_at: DateTime<Utc>,

    /// Stored bytes as standard base64, only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PayloadInfo {
    fn describe(payload: &Payload) -> Self {
        Self {
            size: payload.len(),
            digest: payload_digest(&payload.content),
            uploaded_at: payload.uploaded_at,
            content: None,
        }
    }

    fn describe_with_content(payload: &Payload) -> Self {
        Self {
            content: Some(STANDARD.encode(&payload.content)),
            ..Self::describe(payload)
        }
    }
}

/// What is stored under a comparison id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub id: ComparisonId,
    pub left: Option<PayloadInfo>,
    pub right: Option<PayloadInfo>,
}

impl ComparisonSummary {
    /// Summary that also carries each side's bytes
    pub fn with_content(record: &StoredComparison) -> Self {
        Self {
            id: record.id,
            left: record.left.as_ref().map(PayloadInfo::describe_with_content),
            right: record.right.as_ref().map(PayloadInfo::describe_with_content),
        }
    }
}

impl From<&StoredComparison> for ComparisonSummary {
    fn from(record: &StoredComparison) -> Self {
        Self {
            id: record.id,
            left: record.left.as_ref().map(PayloadInfo::describe),
            right: record.right.as_ref().map(PayloadInfo::describe),
        }
    }
}

/// Accepts uploads for either side and reports what is stored
#[derive(Debug, Clone)]
pub struct PayloadService<S> {
    store: S,
}

impl<S: PayloadStore> PayloadService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store `content` as the given side of `id`
    ///
    /// Creates the record if this is the first upload for `id`; otherwise
    /// replaces only that side. Empty content is rejected.
    pub fn upload(
        &self,
        id: ComparisonId,
        side: Side,
        content: Vec<u8>,
    ) -> Result<ComparisonSummary, BinDiffError> {
        if content.is_empty() {
            return Err(BinDiffError::empty(side));
        }

        let size = content.len();
        let record = self.store.save(id, side, Payload::new(content))?;
        info!(id, %side, size, "payload uploaded");

        Ok(ComparisonSummary::from(&record))
    }

    /// Decode standard base64 `data` and store it as the given side of `id`
    pub fn upload_base64(
        &self,
        id: ComparisonId,
        side: Side,
        data: &str,
    ) -> Result<ComparisonSummary, BinDiffError> {
        let data = data.trim();
        if data.is_empty() {
            return Err(BinDiffError::empty(side));
        }

        let content = STANDARD
            .decode(data)
            .map_err(|e| BinDiffError::InvalidArgument {
                side,
                reason: format!("payload is not valid base64: {}", e),
            })?;

        self.upload(id, side, content)
    }

    /// Whether the given side of `id` has been uploaded
    pub fn exists(&self, id: ComparisonId, side: Side) -> Result<bool, BinDiffError> {
        Ok(self
            .store
            .load(id)?
            .is_some_and(|record| record.side(side).is_some()))
    }

    /// Sizes, digests and upload times of what is stored under `id`
    pub fn summary(&self, id: ComparisonId) -> Result<Option<ComparisonSummary>, BinDiffError> {
        Ok(self
            .store
            .load(id)?
            .map(|record| ComparisonSummary::from(&record)))
    }

    /// Summary of `id` including the stored bytes of each side
    pub fn summary_with_content(
        &self,
        id: ComparisonId,
    ) -> Result<Option<ComparisonSummary>, BinDiffError> {
        Ok(self
            .retrieve(id)?
            .map(|record| ComparisonSummary::with_content(&record)))
    }

    /// The payloads stored under `id`, as uploaded
    pub fn retrieve(&self, id: ComparisonId) -> Result<Option<StoredComparison>, BinDiffError> {
        self.store.load(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_upload_creates_record() {
        let service = PayloadService::new(MemoryStore::new());

        let summary = service.upload(1, Side::Left, vec![1, 2, 3]).unwrap();

        assert_eq!(summary.id, 1);
        assert_eq!(summary.left.as_ref().map(|info| info.size), Some(3));
        assert!(summary.right.is_none());
        assert!(service.exists(1, Side::Left).unwrap());
        assert!(!service.exists(1, Side::Right).unwrap());
    }

    #[test]
    fn test_upload_replaces_one_side() {
        let service = PayloadService::new(MemoryStore::new());
        service.upload(1, Side::Left, vec![1]).unwrap();
        service.upload(1, Side::Right, vec![2, 2]).unwrap();

        let summary = service.upload(1, Side::Left, vec![3, 3, 3]).unwrap();

        assert_eq!(summary.left.map(|info| info.size), Some(3));
        assert_eq!(summary.right.map(|info| info.size), Some(2));
    }

    #[test]
    fn test_upload_rejects_empty_content() {
        let service = PayloadService::new(MemoryStore::new());
        let err = service.upload(1, Side::Right, Vec::new()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!service.exists(1, Side::Right).unwrap());
    }

    #[test]
    fn test_upload_base64_decodes() {
        let service = PayloadService::new(MemoryStore::new());
        let summary = service.upload_base64(2, Side::Left, "AQABAQ==").unwrap();

        let left = summary.left.expect("left uploaded");
        assert_eq!(left.size, 4);
        assert_eq!(left.digest, payload_digest(&[1, 0, 1, 1]));
    }

    #[test]
    fn test_upload_base64_rejects_empty_and_invalid() {
        let service = PayloadService::new(MemoryStore::new());
        assert!(service
            .upload_base64(2, Side::Left, "  ")
            .unwrap_err()
            .is_invalid_argument());
        assert!(service
            .upload_base64(2, Side::Left, "not base64!")
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(service.summary(2).unwrap(), None);
    }

    #[test]
    fn test_retrieve_returns_stored_bytes() {
        let service = PayloadService::new(MemoryStore::new());
        service.upload(4, Side::Right, vec![1, 0, 1, 1]).unwrap();

        let record = service.retrieve(4).unwrap().expect("record stored");
        assert!(record.left.is_none());
        assert_eq!(record.right.map(|p| p.content), Some(vec![1, 0, 1, 1]));
        assert_eq!(service.retrieve(5).unwrap(), None);
    }

    #[test]
    fn test_summary_with_content_encodes_base64() {
        let service = PayloadService::new(MemoryStore::new());
        service.upload_base64(6, Side::Left, "AQABAQ==").unwrap();

        let plain = service.summary(6).unwrap().unwrap();
        assert_eq!(plain.left.unwrap().content, None);

        let full = service.summary_with_content(6).unwrap().unwrap();
        assert_eq!(full.left.unwrap().content.as_deref(), Some("AQABAQ=="));
        assert!(full.right.is_none());
    }

    #[test]
    fn test_summary_unknown_id() {
        let service = PayloadService::new(MemoryStore::new());
        assert_eq!(service.summary(5).unwrap(), None);
        assert!(!service.exists(5, Side::Left).unwrap());
    }
}
