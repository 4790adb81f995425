//! Compare stored payloads by id

use super::print_json;
use crate::executor::compare_all;
use crate::service::ComparisonService;
use crate::store::PayloadStore;
use crate::types::{BinDiffError, ComparisonId};
use crate::Config;

/// Print the diff result of `id` as JSON
pub fn run<S: PayloadStore>(store: S, id: ComparisonId) -> Result<(), BinDiffError> {
    let result = ComparisonService::new(store).get_comparison(id)?;
    print_json(&result)
}

/// Compare every stored id and print one entry per id
pub fn run_all<S: PayloadStore>(store: S, config: &Config) -> Result<(), BinDiffError> {
    let service = ComparisonService::new(store);
    let ids = service.store().ids()?;
    let entries = compare_all(&service, &ids, config)?;
    print_json(&entries)
}
