// src/audit/pool.rs
// =============================================================================
// The worker pool: a fixed number of tokio tasks draining one job queue.
//
// How it fits together:
// 1. The orchestrator calls submit() for every link. The queue is a bounded
//    async-channel with room for a single job, so submit() waits until a
//    worker is free to take it (backpressure instead of one task per link)
// 2. Each worker loops: take a job, probe it, hand the outcome to the
//    Reporter, mark one unit of work done
// 3. wait() is the completion barrier: it returns once every submitted job
//    has been reported, no matter how many workers there are
// 4. shutdown() closes the queue and joins the workers
//
// Rust concepts:
// - Arc: Shares the probe and the pending counter between tasks
// - Atomics + Notify: A counting barrier without holding a lock
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::job::{CheckOutcome, LinkCheckJob};
use super::report::Reporter;
use crate::checker::Probe;
use crate::error::AuditError;

// Jobs that can sit in the queue waiting for a worker
const QUEUE_CAPACITY: usize = 1;

/// Counts jobs that were submitted but have not produced an outcome yet.
#[derive(Debug, Default)]
pub struct Pending {
    count: AtomicUsize,
    drained: Notify,
}

impl Pending {
    pub fn add(&self, jobs: usize) {
        self.count.fetch_add(jobs, Ordering::SeqCst);
    }

    pub fn done(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.drained.notify_waiters();
        }
    }

    pub fn outstanding(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        loop {
            // Register interest before looking at the count, otherwise a
            // done() landing in between would never wake us
            let drained = self.drained.notified();
            if self.outstanding() == 0 {
                return;
            }
            drained.await;
        }
    }
}

pub struct WorkerPool {
    queue: async_channel::Sender<LinkCheckJob>,
    pending: Arc<Pending>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn spawn(size: usize, probe: Arc<dyn Probe>, reporter: Reporter) -> Result<Self, AuditError> {
        if size == 0 {
            return Err(AuditError::NoWorkers);
        }

        let (queue, jobs) = async_channel::bounded(QUEUE_CAPACITY);
        let pending = Arc::new(Pending::default());

        let workers = (0..size)
            .map(|id| {
                tokio::spawn(work(
                    id,
                    jobs.clone(),
                    Arc::clone(&probe),
                    reporter.clone(),
                    Arc::clone(&pending),
                ))
            })
            .collect();

        tracing::debug!(workers = size, "worker pool started");

        Ok(Self {
            queue,
            pending,
            workers,
        })
    }

    /// Hands one job to the pool, waiting for a free worker if needed.
    pub async fn submit(&self, job: LinkCheckJob) -> Result<(), AuditError> {
        self.pending.add(1);
        if self.queue.send(job).await.is_err() {
            self.pending.done();
            return Err(AuditError::QueueClosed);
        }
        Ok(())
    }

    /// Returns once every submitted job has been reported.
    pub async fn wait(&self) {
        self.pending.wait().await;
    }

    pub async fn shutdown(self) {
        self.queue.close();
        for result in futures::future::join_all(self.workers).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "link check worker crashed");
            }
        }
    }
}

async fn work(
    id: usize,
    jobs: async_channel::Receiver<LinkCheckJob>,
    probe: Arc<dyn Probe>,
    reporter: Reporter,
    pending: Arc<Pending>,
) {
    // recv() fails once the queue is closed and empty
    while let Ok(job) = jobs.recv().await {
        let result = probe.probe(&job.url).await;
        reporter.record(CheckOutcome::from_probe(job, result));
        pending.done();
    }
    tracing::trace!(worker = id, "worker stopped");
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async-channel instead of tokio::sync::mpsc?
//    - tokio's mpsc has exactly one receiver
//    - async-channel receivers can be cloned, so every worker pulls from the
//      same queue and each job goes to exactly one of them
//
// 2. Why count pending jobs instead of joining the workers?
//    - Workers live for the whole run and keep waiting for more jobs
//    - The counter tells us "everything submitted so far is done" while the
//      workers are still alive
//
// 3. What does Notify::notified() do?
//    - Creates a future that completes on the next notify_waiters() call
//    - It starts listening as soon as it is created, not when first awaited
// -----------------------------------------------------------------------------
