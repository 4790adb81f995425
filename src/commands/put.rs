//! Upload and inspect stored payloads

use super::print_json;
use crate::service::PayloadService;
use crate::store::PayloadStore;
use crate::types::{BinDiffError, ComparisonId, Side};
use std::fs;
use std::path::Path;

/// Store a payload from `file` or base64 `data` as one side of `id`
///
/// Prints the resulting summary as JSON.
pub fn run<S: PayloadStore>(
    store: S,
    id: ComparisonId,
    side: Side,
    file: Option<&Path>,
    data: Option<&str>,
) -> Result<(), BinDiffError> {
    let service = PayloadService::new(store);

    let summary = match (file, data) {
        (Some(path), None) => service.upload(id, side, fs::read(path)?)?,
        (None, Some(data)) => service.upload_base64(id, side, data)?,
        _ => {
            return Err(BinDiffError::InvalidArgument {
                side,
                reason: "provide either a file or --base64 data".to_string(),
            })
        }
    };

    print_json(&summary)
}

/// Print what is stored under `id`, optionally with the bytes themselves
pub fn show<S: PayloadStore>(
    store: S,
    id: ComparisonId,
    with_content: bool,
) -> Result<(), BinDiffError> {
    let service = PayloadService::new(store);
    let summary = if with_content {
        service.summary_with_content(id)?
    } else {
        service.summary(id)?
    };
    print_json(&summary.ok_or(BinDiffError::NotFound { id })?)
}
