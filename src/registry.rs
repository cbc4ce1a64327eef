//! Shared session registry.
//!
//! Process-wide store of every [`Session`] ever accepted, in insertion
//! order. Sessions are tombstoned rather than removed: a disconnected
//! session stays in the collection with its liveness flag down, and
//! lookups filter on that flag. This keeps concurrent iteration trivial at
//! the cost of unbounded growth over the process lifetime, which is an
//! accepted limit for this design.
//!
//! Name assignment is a monotonic counter, so a dead session's name is
//! never handed out again.

use crate::session::Session;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent store of all sessions, keyed by assigned name.
#[derive(Debug, Default)]
pub struct Registry {
    sessions: RwLock<Vec<Arc<Session>>>,
    next_user: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next default name: `user0`, `user1`, ...
    ///
    /// Atomic fetch-and-increment, so the contract holds even with more
    /// than one acceptor handing out names.
    pub fn next_name(&self) -> String {
        let n = self.next_user.fetch_add(1, Ordering::Relaxed);
        format!("user{n}")
    }

    /// Append a session to the shared collection.
    pub fn register(&self, session: Arc<Session>) {
        self.sessions.write().push(session);
    }

    /// Find the first live session with the given name, in insertion
    /// order. Tombstoned entries are skipped.
    pub fn find_active(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .iter()
            .find(|s| s.name() == name && s.is_active())
            .cloned()
    }

    /// Total number of sessions ever registered, dead ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Number of sessions still live.
    pub fn active_count(&self) -> usize {
        self.sessions.read().iter().filter(|s| s.is_active()).count()
    }
}
