//! Process-wide tables mapping opaque C handles to Rust values.
//!
//! Handles are integer tokens rather than heap addresses, so a stale or
//! foreign handle is detected by lookup instead of being dereferenced.
//! Token `0` is reserved for the null handle. Tokens come from one
//! process-wide counter, so a builder token is never also a live instance
//! token.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use stableset_core::{GraphBuilder, Instance, StableSetError};

/// Live builders, keyed by token.
pub(crate) static BUILDERS: LazyLock<HandleRegistry<GraphBuilder>> =
    LazyLock::new(HandleRegistry::new);

/// Live instances, keyed by token. Shared so a solve does not hold the lock.
pub(crate) static INSTANCES: LazyLock<HandleRegistry<Arc<Instance>>> =
    LazyLock::new(HandleRegistry::new);

/// Live result buffers, keyed by address, holding their length.
pub(crate) static BUFFERS: LazyLock<HandleRegistry<usize>> = LazyLock::new(HandleRegistry::new);

/// Source of every token handed out by [`HandleRegistry::insert`].
static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(1);

/// Mutex-guarded map from tokens to values of one kind.
#[derive(Debug)]
pub(crate) struct HandleRegistry<T> {
    entries: Mutex<HashMap<usize, T>>,
}

impl<T> HandleRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store `value` under a fresh, non-zero token unique across all
    /// registries.
    pub(crate) fn insert(&self, value: T) -> Result<usize, StableSetError> {
        let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        if token == 0 {
            return Err(StableSetError::ResourceExhausted { what: "handles" });
        }
        self.insert_at(token, value)?;
        Ok(token)
    }

    /// Store `value` under a caller-chosen key, replacing nothing.
    pub(crate) fn insert_at(&self, key: usize, value: T) -> Result<(), StableSetError> {
        let mut entries = self.lock();
        entries
            .try_reserve(1)
            .map_err(|_| StableSetError::ResourceExhausted { what: "handles" })?;
        entries.entry(key).or_insert(value);
        Ok(())
    }

    /// Run `f` on the value behind `token`, or return `None` if the token is
    /// unknown.
    pub(crate) fn with<R>(&self, token: usize, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.lock().get_mut(&token).map(f)
    }

    /// Remove and return the value behind `token`.
    pub(crate) fn remove(&self, token: usize) -> Option<T> {
        self.lock().remove(&token)
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, token: usize) -> bool {
        self.lock().contains_key(&token)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<usize, T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> HandleRegistry<T> {
    /// Clone the value behind `token`.
    pub(crate) fn get(&self, token: usize) -> Option<T> {
        self.lock().get(&token).cloned()
    }
}
