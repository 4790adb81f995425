//! Compare two local files without going through the store

use super::print_json;
use crate::diff::{compare, DiffResult};
use crate::types::BinDiffError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Diff result of two files on disk
pub fn compare_files(left: &Path, right: &Path) -> Result<DiffResult, BinDiffError> {
    let left_bytes = fs::read(left)?;
    let right_bytes = fs::read(right)?;

    debug!(
        left = %left.display(),
        right = %right.display(),
        left_len = left_bytes.len(),
        right_len = right_bytes.len(),
        "comparing files"
    );

    compare(&left_bytes, &right_bytes).map(DiffResult::from)
}

/// Print the diff result of two files as JSON
pub fn run(left: &Path, right: &Path) -> Result<(), BinDiffError> {
    print_json(&compare_files(left, right)?)
}
