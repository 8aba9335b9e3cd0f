//! Optimistic replication of level results to a [`ProgressStore`].
//!
//! Local state is always updated first. Remote writes are spawned on the
//! current tokio runtime and never awaited by gameplay; a failed write is
//! logged and dropped. Each write waits for the one queued before it, so
//! rows land in the order they were recorded.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::instrument;
use uuid::Uuid;

use crate::progress::ProgressTracker;
use crate::traits::{ProgressRecord, ProgressStore};

pub struct ProgressMirror {
    store: Arc<dyn ProgressStore>,
    /// Last queued write; it awaits every earlier one.
    tail: Mutex<Option<JoinHandle<()>>>,
}

impl ProgressMirror {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            store,
            tail: Mutex::new(None),
        }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Rebuild progress from the remote records of a user. A failed load
    /// yields fresh progress.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: Uuid) -> ProgressTracker {
        match self.store.load_progress(user_id).await {
            Ok(records) => {
                tracing::debug!("replaying {} progress records", records.len());
                ProgressTracker::from_records(&records)
            }
            Err(e) => {
                tracing::warn!("could not load remote progress, starting fresh: {e:#}");
                ProgressTracker::new()
            }
        }
    }

    /// Queue a remote upsert without waiting for it.
    pub fn record(&self, record: ProgressRecord) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(
                "no async runtime, progress for {} level {} not mirrored",
                record.domain,
                record.level
            );
            return;
        };

        let Ok(mut tail) = self.tail.lock() else {
            tracing::warn!("write queue poisoned, progress not mirrored");
            return;
        };
        let previous = tail.take();
        let store = Arc::clone(&self.store);
        *tail = Some(handle.spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::warn!("earlier progress write task failed: {e}");
                }
            }
            match store.save_progress(&record).await {
                Ok(()) => tracing::debug!(
                    "mirrored {} level {} ({}/10)",
                    record.domain,
                    record.level,
                    record.score
                ),
                Err(e) => tracing::warn!(
                    "failed to mirror {} level {}: {e:#}",
                    record.domain,
                    record.level
                ),
            }
        }));
    }

    /// Whether a write is still in flight.
    pub fn pending(&self) -> bool {
        self.tail
            .lock()
            .map(|t| t.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }

    /// Wait for every queued write.
    pub async fn flush(&self) {
        let last = match self.tail.lock() {
            Ok(mut tail) => tail.take(),
            Err(_) => return,
        };
        if let Some(last) = last {
            if let Err(e) = last.await {
                tracing::warn!("progress write task failed: {e}");
            }
        }
    }
}
