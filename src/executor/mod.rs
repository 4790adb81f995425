//! Executor module for batch comparisons

pub mod pool;

use crate::diff::DiffResult;
use crate::service::ComparisonService;
use crate::store::PayloadStore;
use crate::types::{BinDiffError, ComparisonId};
use crate::Config;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use pool::{ComparisonJob, ComparisonPool, JobResult, PoolReport, PoolStats};

/// Per-id status of a batch comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BatchStatus {
    /// Both sides were present and compared
    Compared(DiffResult),

    /// At least one side is missing; nothing was compared
    NotFound,

    /// The comparison was rejected
    Failed { error: String },
}

/// One line of a batch comparison report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub id: ComparisonId,

    #[serde(flatten)]
    pub status: BatchStatus,
}

/// Compare every id in `ids` on a bounded worker pool
///
/// Ids with a missing side are reported as `NotFound` without being
/// dispatched. Entries are returned in the order of `ids`. A store failure
/// aborts the whole batch.
pub fn compare_all<S: PayloadStore>(
    service: &ComparisonService<S>,
    ids: &[ComparisonId],
    config: &Config,
) -> Result<Vec<BatchEntry>, BinDiffError> {
    let pool = ComparisonPool::new(config.workers, config.queue_capacity)?;
    let mut slots: Vec<Option<BatchEntry>> = vec![None; ids.len()];

    for (index, &id) in ids.iter().enumerate() {
        match service.fetch_pair(id) {
            Ok((left, right)) => {
                pool.enqueue(ComparisonJob {
                    index,
                    id,
                    left,
                    right,
                })?;
            }
            Err(e) if e.is_not_found() => {
                warn!(id, "skipping incomplete comparison");
                slots[index] = Some(BatchEntry {
                    id,
                    status: BatchStatus::NotFound,
                });
            }
            Err(e) => return Err(e),
        }
    }

    let report = pool.close_and_wait()?;
    for job in report.results {
        let status = match job.result {
            Ok(outcome) => BatchStatus::Compared(DiffResult::from(outcome)),
            Err(e) => BatchStatus::Failed {
                error: e.to_string(),
            },
        };
        if let Some(slot) = slots.get_mut(job.index) {
            *slot = Some(BatchEntry { id: job.id, status });
        }
    }

    info!(
        total = ids.len(),
        compared = report.stats.completed,
        workers = report.stats.workers,
        "batch comparison finished"
    );

    collect_entries(ids, slots)
}

/// Every id must end the batch with an entry
fn collect_entries(
    ids: &[ComparisonId],
    slots: Vec<Option<BatchEntry>>,
) -> Result<Vec<BatchEntry>, BinDiffError> {
    ids.iter()
        .zip(slots)
        .map(|(&id, slot)| {
            slot.ok_or_else(|| {
                BinDiffError::Executor(format!("comparison {} produced no result", id))
            })
        })
        .collect()
}
