//! Session history of results

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered, append-only log of results with a pointer to the latest one
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    current: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        History {
            entries: Vec::new(),
            current: None,
        }
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and make it current
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
        self.current = Some(self.entries.len() - 1);
    }

    /// Drop every entry and the current pointer
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Newest first, at most `cap` entries; the log itself keeps everything
    pub fn recent(&self, cap: usize) -> impl Iterator<Item = &T> {
        self.entries.iter().rev().take(cap)
    }
}

/// History shared between threads; append and clear are atomic
#[derive(Debug)]
pub struct SharedHistory<T> {
    inner: Arc<Mutex<History<T>>>,
}

impl<T> Clone for SharedHistory<T> {
    fn clone(&self) -> Self {
        SharedHistory {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedHistory<T> {
    fn default() -> Self {
        SharedHistory {
            inner: Arc::new(Mutex::new(History::new())),
        }
    }
}

impl<T> SharedHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a History half-updated,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, History<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, entry: T) {
        self.lock().push(entry);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` against a consistent view of the log
    pub fn with<R>(&self, f: impl FnOnce(&History<T>) -> R) -> R {
        f(&self.lock())
    }
}

impl<T: Clone> SharedHistory<T> {
    pub fn snapshot(&self) -> History<T> {
        self.lock().clone()
    }

    pub fn current(&self) -> Option<T> {
        self.lock().current().cloned()
    }
}
