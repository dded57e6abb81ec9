//! Single-slot paste store with a retention timer.
//!
//! One `RwLock` covers both the slot and the pending expiry task. Writers
//! (`replace`, `clear`, timer expiry) take it exclusively; `get` takes it
//! shared and only clones an `Arc`, so readers never see a half-installed
//! artifact. A reader may briefly wait behind a writer, but writers only
//! swap pointers and abort a task under the lock: artifacts are built,
//! and log lines written, outside it. Every mutation bumps a generation counter, and an expiry task may
//! only clear the slot when the generation it was armed for is still current.


use crate::models::artifact::{Artifact, Submission, UploadMethod};
use chrono::Utc;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Why the slot was cleared. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearCause {
    /// Explicit deletion by a client.
    Request,
    /// The retention timer fired.
    Retention,
}

impl ClearCause {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Retention => "retention",
        }
    }
}

impl fmt::Display for ClearCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default)]
struct Slot {
    artifact: Option<Arc<Artifact>>,
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_expiry(&mut self) {
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.cancel_expiry();
    }
}

struct Shared {
    retention: Duration,
    slot: RwLock<Slot>,
}

impl Shared {
    fn expire(&self, generation: u64) -> bool {
        let cleared = {
            let mut slot = self.slot.write();
            if slot.generation != generation {
                None
            } else {
                // The running task is this one; detach instead of aborting it.
                slot.expiry = None;
                slot.generation = slot.generation.wrapping_add(1);
                Some(slot.artifact.take().is_some())
            }
        };

        match cleared {
            Some(cleared) => {
                tracing::info!(cause = %ClearCause::Retention, cleared, "deleted paste");
                cleared
            }
            None => {
                tracing::debug!(generation, "ignoring stale retention timer");
                false
            }
        }
    }
}

/// Holder of at most one [`Artifact`].
///
/// Cheap to clone; all clones share the same slot. Construct one per server
/// lifecycle and hand clones to every handler.
#[derive(Clone)]
pub struct PasteStore {
    shared: Arc<Shared>,
}

impl PasteStore {
    /// Create an empty store.
    ///
    /// # Arguments
    /// - `retention`: How long an artifact survives after acceptance. Zero
    ///   disables automatic expiry.
    pub fn new(retention: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                retention,
                slot: RwLock::new(Slot::default()),
            }),
        }
    }

    /// Configured retention window.
    pub fn retention(&self) -> Duration {
        self.shared.retention
    }

    /// Accept `submission` as the current paste, discarding any previous one.
    ///
    /// Unnamed submissions get a timestamp name and generic content types are
    /// sniffed (see [`Artifact::accept`]). Any pending expiry is cancelled and,
    /// when retention is non-zero, a new one is armed on the ambient Tokio
    /// runtime. Outside a runtime the artifact is still stored but never
    /// expires on its own.
    ///
    /// # Returns
    /// The installed [`Artifact`].
    pub fn replace(&self, method: UploadMethod, submission: Submission) -> Arc<Artifact> {
        let artifact = Arc::new(Artifact::accept(submission, Utc::now()));
        let runtime = Handle::try_current().ok();
        let retention = self.shared.retention;

        let armed = {
            let mut slot = self.shared.slot.write();
            slot.cancel_expiry();
            slot.generation = slot.generation.wrapping_add(1);
            slot.artifact = Some(Arc::clone(&artifact));
            if retention.is_zero() {
                true
            } else if let Some(runtime) = runtime.as_ref() {
                slot.expiry = Some(self.spawn_expiry(runtime, slot.generation));
                true
            } else {
                false
            }
        };

        tracing::info!(
            method = %method,
            name = artifact.name(),
            content_type = artifact.content_type(),
            length = artifact.len(),
            "upload accepted"
        );
        if !armed {
            tracing::warn!("No Tokio runtime available; retention timer not armed");
        }
        artifact
    }

    /// Current paste, if any.
    ///
    /// Never waits on the timer or on an upload body; at most it waits for a
    /// concurrent writer's pointer swap.
    pub fn get(&self) -> Option<Arc<Artifact>> {
        self.shared.slot.read().artifact.clone()
    }

    /// Discard the current paste and cancel its timer.
    ///
    /// Clearing an empty store is a no-op apart from the log line.
    ///
    /// # Returns
    /// `true` when an artifact was present.
    pub fn clear(&self, cause: ClearCause) -> bool {
        let cleared = {
            let mut slot = self.shared.slot.write();
            slot.cancel_expiry();
            slot.generation = slot.generation.wrapping_add(1);
            slot.artifact.take().is_some()
        };
        tracing::info!(cause = %cause, cleared, "deleted paste");
        cleared
    }

    fn spawn_expiry(&self, runtime: &Handle, generation: u64) -> JoinHandle<()> {
        let retention = self.shared.retention;
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        runtime.spawn(async move {
            tokio::time::sleep(retention).await;
            if let Some(shared) = shared.upgrade() {
                shared.expire(generation);
            }
        })
    }
}

impl fmt::Debug for PasteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot.read();
        f.debug_struct("PasteStore")
            .field("retention", &self.shared.retention)
            .field("occupied", &slot.artifact.is_some())
            .field("generation", &slot.generation)
            .finish()
    }
}
