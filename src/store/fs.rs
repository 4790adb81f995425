//! Directory-backed payload store
//!
//! Each comparison id gets its own directory under the store root:
//!
//! ```text
//! <root>/<id>/left.bin
//! <root>/<id>/left.json
//! <root>/<id>/right.bin
//! <root>/<id>/right.json
//! ```
//!
//! The `.bin` file holds the payload and is authoritative. The `.json`
//! sidecar records when it was uploaded, together with its size and digest
//! so a sidecar that no longer describes the content can be detected. The
//! two sides never share a file, so separate processes may upload the left
//! and right side of one id at the same time.

use super::PayloadStore;
use crate::hash::payload_digest;
use crate::types::{BinDiffError, ComparisonId, Payload, Side, StoredComparison};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Upload metadata kept next to one side's content file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SideMeta {
    uploaded_at: DateTime<Utc>,
    size: u64,
    digest: String,
}

impl SideMeta {
    fn describe(payload: &Payload) -> Self {
        Self {
            uploaded_at: payload.uploaded_at,
            size: payload.content.len() as u64,
            digest: payload_digest(&payload.content),
        }
    }

    /// Whether this sidecar was written for exactly `content`
    fn matches(&self, content: &[u8]) -> bool {
        self.size == content.len() as u64 && self.digest == payload_digest(content)
    }
}

/// Payload store persisting every id under a root directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`; the directory is created on first save
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_dir(&self, id: ComparisonId) -> PathBuf {
        self.root.join(id.to_string())
    }

    fn content_path(&self, id: ComparisonId, side: Side) -> PathBuf {
        self.record_dir(id).join(format!("{}.bin", side))
    }

    fn meta_path(&self, id: ComparisonId, side: Side) -> PathBuf {
        self.record_dir(id).join(format!("{}.json", side))
    }

    /// Sidecar for one side, if present and readable
    fn read_meta(&self, id: ComparisonId, side: Side) -> Option<SideMeta> {
        let path = self.meta_path(id, side);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(id, %side, path = %path.display(), error = %e, "unreadable payload metadata");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(id, %side, path = %path.display(), error = %e, "corrupt payload metadata");
                None
            }
        }
    }

    fn load_side(&self, id: ComparisonId, side: Side) -> Result<Option<Payload>, BinDiffError> {
        let path = self.content_path(id, side);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BinDiffError::Io(e)),
        };

        // Fall back to the file mtime when the sidecar does not describe this content
        let uploaded_at = match self.read_meta(id, side) {
            Some(meta) if meta.matches(&content) => meta.uploaded_at,
            _ => DateTime::<Utc>::from(fs::metadata(&path)?.modified()?),
        };

        Ok(Some(Payload {
            content,
            uploaded_at,
        }))
    }
}

impl PayloadStore for FsStore {
    fn load(&self, id: ComparisonId) -> Result<Option<StoredComparison>, BinDiffError> {
        if !self.record_dir(id).is_dir() {
            return Ok(None);
        }

        let left = self.load_side(id, Side::Left)?;
        let right = self.load_side(id, Side::Right)?;

        if left.is_none() && right.is_none() {
            return Ok(None);
        }

        Ok(Some(StoredComparison { id, left, right }))
    }

    fn save(
        &self,
        id: ComparisonId,
        side: Side,
        payload: Payload,
    ) -> Result<StoredComparison, BinDiffError> {
        let dir = self.record_dir(id);
        fs::create_dir_all(&dir)?;

        // Stage both files before renaming anything
        let meta_bytes = serde_json::to_vec_pretty(&SideMeta::describe(&payload))?;
        let staged_meta = stage(&dir, side, &meta_bytes)?;
        let staged_content = stage(&dir, side, &payload.content)?;

        // The content rename is the commit point
        commit(staged_meta, &self.meta_path(id, side))?;
        let content_path = self.content_path(id, side);
        commit(staged_content, &content_path)?;

        debug!(
            id,
            %side,
            bytes = payload.content.len(),
            path = %content_path.display(),
            "payload written"
        );

        let mut record = self.load(id)?.unwrap_or_else(|| StoredComparison::new(id));
        record.set(side, payload);
        Ok(record)
    }

    fn ids(&self) -> Result<Vec<ComparisonId>, BinDiffError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BinDiffError::Io(e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<ComparisonId>().ok())
            else {
                continue;
            };
            if self.content_path(id, Side::Left).is_file()
                || self.content_path(id, Side::Right).is_file()
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

/// Write `bytes` to a uniquely named temporary file inside `dir`
///
/// The file is flushed and synced to disk. It is removed again if it is
/// dropped without being committed.
fn stage(dir: &Path, side: Side, bytes: &[u8]) -> Result<NamedTempFile, BinDiffError> {
    let mut part = tempfile::Builder::new()
        .prefix(&format!(".{}.", side))
        .suffix(".part")
        .tempfile_in(dir)?;
    part.write_all(bytes)?;
    part.as_file().sync_all()?;
    Ok(part)
}

/// Rename a staged file over `dest` (atomic on POSIX)
fn commit(part: NamedTempFile, dest: &Path) -> Result<(), BinDiffError> {
    part.persist(dest).map_err(|e| BinDiffError::Io(e.error))?;
    Ok(())
}
