//! Concurrent comparison pool.
//!
//! Dispatcher + worker inbox design:
//! - single-consumer upstream `mpsc::Receiver` (dispatcher)
//! - per-worker `mpsc` inbox channels
//! - explicit sender drop on shutdown before awaiting workers
//!
//! Workers run `diff::compare` on fully loaded payloads. A job is never
//! interrupted once a worker picks it up.

use crate::diff::compare;
use crate::types::{BinDiffError, ComparisonId, ComparisonOutcome};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

use std::sync::Arc;

/// Work item accepted by the comparison pool.
#[derive(Debug, Clone)]
pub struct ComparisonJob {
    pub index: usize,
    pub id: ComparisonId,
    pub left: Vec<u8>,
    pub right: Vec<u8>,
}

/// Outcome of one job, tagged with its enqueue index.
#[derive(Debug)]
pub struct JobResult {
    pub index: usize,
    pub id: ComparisonId,
    pub result: Result<ComparisonOutcome, BinDiffError>,
}

/// Runtime stats for the comparison pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub enqueued: usize,
    pub dispatched: usize,
    pub completed: usize,
    pub per_worker_completed: Vec<usize>,
}

impl PoolStats {
    fn new(workers: usize) -> Self {
        Self {
            workers,
            enqueued: 0,
            dispatched: 0,
            completed: 0,
            per_worker_completed: vec![0; workers],
        }
    }
}

/// Everything the pool produced once it has shut down.
#[derive(Debug)]
pub struct PoolReport {
    pub stats: PoolStats,
    /// Job results in enqueue order.
    pub results: Vec<JobResult>,
}

#[derive(Debug)]
struct PoolState {
    stats: PoolStats,
    results: Vec<JobResult>,
}

/// Thread-pool executor comparing many payload pairs concurrently.
pub struct ComparisonPool {
    runtime: Runtime,
    enqueue_tx: Option<mpsc::Sender<ComparisonJob>>,
    dispatcher_handle: Option<JoinHandle<()>>,
    worker_handles: Vec<JoinHandle<()>>,
    state: Arc<Mutex<PoolState>>,
}

impl ComparisonPool {
    /// Create a dispatcher + worker pool with bounded channels.
    pub fn new(worker_count: usize, queue_capacity: usize) -> Result<Self, BinDiffError> {
        let workers = worker_count.max(1);
        let capacity = queue_capacity.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .enable_all()
            .build()?;

        let state = Arc::new(Mutex::new(PoolState {
            stats: PoolStats::new(workers),
            results: Vec::new(),
        }));
        let handle = runtime.handle().clone();

        let (enqueue_tx, enqueue_rx) = mpsc::channel::<ComparisonJob>(capacity);

        let mut worker_txs = Vec::with_capacity(workers);
        let mut worker_handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let (worker_tx, worker_rx) = mpsc::channel::<ComparisonJob>(capacity);
            worker_txs.push(worker_tx);
            worker_handles.push(handle.spawn(worker_loop(
                worker_id,
                worker_rx,
                Arc::clone(&state),
            )));
        }

        let dispatcher_handle =
            handle.spawn(dispatcher_loop(enqueue_rx, worker_txs, Arc::clone(&state)));

        Ok(Self {
            runtime,
            enqueue_tx: Some(enqueue_tx),
            dispatcher_handle: Some(dispatcher_handle),
            worker_handles,
            state,
        })
    }

    /// Enqueue a job into upstream dispatcher queue.
    pub fn enqueue(&self, job: ComparisonJob) -> Result<(), BinDiffError> {
        let sender = self.enqueue_tx.as_ref().ok_or_else(|| {
            BinDiffError::Executor("comparison pool queue is already closed".to_string())
        })?;
        let state = Arc::clone(&self.state);

        self.runtime.block_on(async {
            sender.send(job).await.map_err(|_| {
                BinDiffError::Executor("comparison pool queue receiver is closed".to_string())
            })?;

            let mut guard = state.lock().await;
            guard.stats.enqueued += 1;
            Ok(())
        })
    }

    /// Close queue input and wait for dispatcher/workers to exit cleanly.
    pub fn close_and_wait(mut self) -> Result<PoolReport, BinDiffError> {
        self.enqueue_tx.take();

        let dispatcher = self.dispatcher_handle.take();
        let workers = std::mem::take(&mut self.worker_handles);
        let state = Arc::clone(&self.state);

        self.runtime.block_on(async move {
            if let Some(handle) = dispatcher {
                handle.await.map_err(map_join_error)?;
            }
            for handle in workers {
                handle.await.map_err(map_join_error)?;
            }

            let mut guard = state.lock().await;
            let mut results = std::mem::take(&mut guard.results);
            results.sort_by_key(|result| result.index);
            Ok(PoolReport {
                stats: guard.stats.clone(),
                results,
            })
        })
    }
}

async fn dispatcher_loop(
    mut enqueue_rx: mpsc::Receiver<ComparisonJob>,
    worker_txs: Vec<mpsc::Sender<ComparisonJob>>,
    state: Arc<Mutex<PoolState>>,
) {
    let mut next_worker = 0usize;
    let worker_len = worker_txs.len();

    while let Some(job) = enqueue_rx.recv().await {
        let target = next_worker % worker_len;
        next_worker = (next_worker + 1) % worker_len;

        match worker_txs[target].send(job).await {
            Ok(()) => {
                let mut guard = state.lock().await;
                guard.stats.dispatched += 1;
            }
            Err(mpsc::error::SendError(job)) => {
                // The worker is gone; report the job instead of losing it
                warn!(worker = target, id = job.id, "comparison worker inbox closed");
                let mut guard = state.lock().await;
                guard.results.push(JobResult {
                    index: job.index,
                    id: job.id,
                    result: Err(BinDiffError::Executor(format!(
                        "comparison worker {} stopped before job {} could run",
                        target, job.id
                    ))),
                });
            }
        }
    }
    // worker_txs are dropped here, which closes worker inboxes.
}

async fn worker_loop(
    worker_id: usize,
    mut worker_rx: mpsc::Receiver<ComparisonJob>,
    state: Arc<Mutex<PoolState>>,
) {
    while let Some(job) = worker_rx.recv().await {
        let result = compare(&job.left, &job.right);

        let mut guard = state.lock().await;
        guard.stats.completed += 1;
        if let Some(slot) = guard.stats.per_worker_completed.get_mut(worker_id) {
            *slot += 1;
        }
        guard.results.push(JobResult {
            index: job.index,
            id: job.id,
            result,
        });
    }
}

fn map_join_error(error: tokio::task::JoinError) -> BinDiffError {
    BinDiffError::Executor(format!("comparison pool task failed: {}", error))
}
