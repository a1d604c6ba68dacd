//! Debounced, ordered persistence of learner progress.
//!
//! Mutations hand the scheduler a numbered snapshot; a background task waits
//! for the stream of snapshots to go quiet and writes only the newest one. All
//! writes pass through a gate that refuses revisions older than the last one
//! written, so an explicit flush and the timer can never reorder state.

use std::sync::Arc;
use std::time::Duration;

use learn_core::model::LearnerProgress;
use storage::repository::{ProgressRepository, StorageError};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

/// A progress snapshot tagged with the revision that produced it.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub revision: u64,
    pub progress: LearnerProgress,
}

struct WriteGate {
    repo: Arc<dyn ProgressRepository>,
    last_written: Mutex<u64>,
}

impl WriteGate {
    async fn write(&self, snapshot: &Snapshot) {
        let mut last = self.last_written.lock().await;
        if snapshot.revision <= *last {
            return;
        }
        match self.repo.save_progress(&snapshot.progress).await {
            Ok(()) => {
                *last = snapshot.revision;
                tracing::debug!(revision = snapshot.revision, "persisted learner progress");
            }
            Err(err) => {
                tracing::warn!(
                    revision = snapshot.revision,
                    error = %err,
                    "failed to persist learner progress; keeping in-memory state"
                );
            }
        }
    }

    async fn clear(&self, revision: u64) -> Result<(), StorageError> {
        let mut last = self.last_written.lock().await;
        self.repo.clear_progress().await?;
        *last = (*last).max(revision);
        Ok(())
    }
}

pub(crate) struct PersistScheduler {
    tx: watch::Sender<Snapshot>,
    gate: Arc<WriteGate>,
    _worker: JoinHandle<()>,
}

impl PersistScheduler {
    /// Starts the writer task on the current tokio runtime.
    ///
    /// `initial` is the hydrated state; it is treated as already written.
    pub(crate) fn spawn(
        repo: Arc<dyn ProgressRepository>,
        quiet_period: Duration,
        initial: LearnerProgress,
    ) -> Self {
        let (tx, rx) = watch::channel(Snapshot {
            revision: 0,
            progress: initial,
        });
        let gate = Arc::new(WriteGate {
            repo,
            last_written: Mutex::new(0),
        });
        let worker = tokio::spawn(run_writer(rx, Arc::clone(&gate), quiet_period));
        Self {
            tx,
            gate,
            _worker: worker,
        }
    }

    /// Replaces the pending snapshot and restarts the quiet period.
    pub(crate) fn schedule(&self, snapshot: Snapshot) {
        self.tx.send_replace(snapshot);
    }

    /// Writes the newest scheduled snapshot now.
    pub(crate) async fn flush(&self) {
        let snapshot = self.tx.borrow().clone();
        self.gate.write(&snapshot).await;
    }

    /// Deletes the durable record and drops every pending write up to `revision`.
    pub(crate) async fn clear(&self, revision: u64) -> Result<(), StorageError> {
        self.gate.clear(revision).await
    }
}

async fn run_writer(
    mut rx: watch::Receiver<Snapshot>,
    gate: Arc<WriteGate>,
    quiet_period: Duration,
) {
    while rx.changed().await.is_ok() {
        // Coalesce until no new snapshot arrives for a full quiet period.
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                () = tokio::time::sleep(quiet_period) => break,
            }
        }
        let snapshot = rx.borrow_and_update().clone();
        gate.write(&snapshot).await;
    }
}
