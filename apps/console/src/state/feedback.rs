//! # Feedback Cue
//!
//! The transient "shake" flag raised when a submission fails validation.
//!
//! ## Timer Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trigger()            trigger() again           delay elapsed          │
//! │     │                      │                         │                  │
//! │     ▼                      ▼                         ▼                  │
//! │  active=true ──────► abort old task, ──────► active=false, on_expire() │
//! │  spawn sleep(delay)  generation += 1,                                   │
//! │                      spawn sleep(delay)                                 │
//! │                                                                         │
//! │  Only the task whose generation is current may lower the flag.          │
//! │  on_expire receives that generation; callers that take their own lock  │
//! │  re-check it with is_current() under that lock.                        │
//! │  cancel() lowers it immediately and skips on_expire.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cue carries no data; it only has to be deterministic and single-shot.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::lock;

#[derive(Debug, Default)]
struct CueInner {
    generation: u64,
    active: bool,
    task: Option<JoinHandle<()>>,
}

/// Single-shot, timer-cancelling feedback flag.
///
/// Cloning yields another handle to the same cue.
#[derive(Debug, Clone)]
pub struct FeedbackCue {
    delay: Duration,
    inner: Arc<Mutex<CueInner>>,
}

impl FeedbackCue {
    pub fn new(delay: Duration) -> Self {
        FeedbackCue {
            delay,
            inner: Arc::new(Mutex::new(CueInner::default())),
        }
    }

    /// Returns true while the cue is raised.
    pub fn is_active(&self) -> bool {
        lock(&self.inner).active
    }

    /// Returns true if `generation` belongs to the latest trigger and no
    /// `cancel` happened since.
    pub fn is_current(&self, generation: u64) -> bool {
        lock(&self.inner).generation == generation
    }

    /// Raises the cue, restarting the timer if one is already pending.
    ///
    /// `on_expire` runs once, on the runtime, when this trigger's delay
    /// elapses without a later `trigger` or `cancel`. It receives the
    /// generation this trigger was assigned. Must be called from within a
    /// tokio runtime.
    pub fn trigger<F>(&self, on_expire: F)
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let mut inner = lock(&self.inner);

        if let Some(previous) = inner.task.take() {
            debug!("Restarting feedback cue");
            previous.abort();
        }

        inner.generation += 1;
        inner.active = true;

        let generation = inner.generation;
        let delay = self.delay;
        let shared = Arc::clone(&self.inner);

        inner.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let expired = {
                let mut inner = lock(&shared);
                if inner.generation == generation {
                    inner.active = false;
                    inner.task = None;
                    true
                } else {
                    false
                }
            };

            if expired {
                on_expire(generation);
            }
        }));
    }

    /// Lowers the cue immediately without running the pending callback.
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        inner.active = false;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }
}
