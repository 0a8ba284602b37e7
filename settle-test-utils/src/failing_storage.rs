// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Storage backend with switchable failures.
//!
//! Wraps a real backend and makes reads or writes fail on demand, standing in
//! for a browser that denies storage access or runs out of quota.

use settle_core::{Result, SettleError};
use settle_storage::{MemoryStorage, StorageBackend, StorageWatcher, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A [`StorageBackend`] whose reads and writes can be made to fail.
///
/// Clones share their failure switches.
///
/// # Example
///
/// ```rust
/// use settle_storage::StorageBackend;
/// use settle_test_utils::FailingStorage;
///
/// let storage = FailingStorage::new();
/// storage.fail_writes(true);
/// assert!(storage.set_item("key", "value").is_err());
///
/// storage.fail_writes(false);
/// assert!(storage.set_item("key", "value").is_ok());
/// ```
#[derive(Clone)]
pub struct FailingStorage<B = MemoryStorage> {
    inner: B,
    switches: Arc<Switches>,
}

#[derive(Default)]
struct Switches {
    reads: AtomicBool,
    writes: AtomicBool,
}

impl FailingStorage<MemoryStorage> {
    /// Wraps a tab onto a fresh in-memory area; nothing fails until asked to.
    pub fn new() -> Self {
        Self::wrap(MemoryStorage::new())
    }
}

impl Default for FailingStorage<MemoryStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: StorageBackend> FailingStorage<B> {
    pub fn wrap(inner: B) -> Self {
        Self {
            inner,
            switches: Arc::default(),
        }
    }

    /// Makes `get_item` fail while `fail` is set.
    pub fn fail_reads(&self, fail: bool) {
        self.switches.reads.store(fail, Ordering::SeqCst);
    }

    /// Makes `set_item`, `remove_item` and `clear` fail while `fail` is set.
    pub fn fail_writes(&self, fail: bool) {
        self.switches.writes.store(fail, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    fn check_write(&self) -> Result<()> {
        if self.switches.writes.load(Ordering::SeqCst) {
            return Err(SettleError::storage_error("injected write failure"));
        }
        Ok(())
    }
}

impl<B: StorageBackend> StorageBackend for FailingStorage<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.switches.reads.load(Ordering::SeqCst) {
            return Err(SettleError::storage_error("injected read failure"));
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.inner.remove_item(key)
    }

    fn clear(&self) -> Result<()> {
        self.check_write()?;
        self.inner.clear()
    }

    fn subscribe(&self, watcher: StorageWatcher) -> Subscription {
        self.inner.subscribe(watcher)
    }
}
