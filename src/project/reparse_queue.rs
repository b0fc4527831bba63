//! Debounced per-file reparse scheduling.
//!
//! Every edit pushes the file's deadline back by the configured delay. Only
//! the last edit of a burst survives: rescheduling cancels the token handed
//! out for the previous one. The caller drives the clock through
//! [`ReparseQueue::take_due`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug)]
struct PendingReparse {
    deadline: Instant,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct ReparseQueue {
    delay: Duration,
    /// Module name → pending entry, in scheduling order.
    pending: IndexMap<Arc<str>, PendingReparse>,
}

impl ReparseQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: IndexMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule `key` for `now + delay`, superseding any earlier request.
    ///
    /// The returned token is cancelled when a later edit replaces this one
    /// or the entry is dropped without running.
    pub fn schedule(&mut self, key: impl Into<Arc<str>>, now: Instant) -> CancellationToken {
        let key = key.into();
        let token = CancellationToken::new();
        let entry = PendingReparse {
            deadline: now + self.delay,
            token: token.clone(),
        };
        // Re-inserting keeps the original position; move it to the back so
        // iteration order follows deadlines.
        if let Some(previous) = self.pending.shift_remove(&key) {
            previous.token.cancel();
            trace!(module = %key, "superseded pending reparse");
        }
        self.pending.insert(key, entry);
        token
    }

    /// Drop a pending entry. Returns whether one existed.
    pub fn cancel(&mut self, key: &str) -> bool {
        match self.pending.shift_remove(key) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Remove and return every entry whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Vec<Arc<str>> {
        let mut due = Vec::new();
        self.pending.retain(|key, entry| {
            if entry.deadline <= now {
                due.push(key.clone());
                false
            } else {
                true
            }
        });
        due
    }

    /// Remove and return every entry regardless of deadline.
    pub fn drain_all(&mut self) -> Vec<Arc<str>> {
        self.pending.drain(..).map(|(key, _)| key).collect()
    }

    /// Cancel and drop everything.
    pub fn clear(&mut self) {
        for (_, entry) in self.pending.drain(..) {
            entry.token.cancel();
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|entry| entry.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
