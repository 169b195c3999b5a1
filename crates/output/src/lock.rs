//! Process-wide console serialization.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle serializing writes to the console. Clones share the lock.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLock(Arc<Mutex<()>>);

impl ConsoleLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the console is free. Released when the guard drops.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        // `()` has no state to poison.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
