// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The host storage facility.

use crate::StorageEvent;
use core::fmt;
use settle_core::{MaybeSend, MaybeSync, Result};
use std::sync::Arc;

/// Callback receiving change events raised by other tabs.
#[cfg(not(target_arch = "wasm32"))]
pub type StorageWatcher = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

/// Callback receiving change events raised by other tabs.
#[cfg(target_arch = "wasm32")]
pub type StorageWatcher = Arc<dyn Fn(&StorageEvent)>;

#[cfg(not(target_arch = "wasm32"))]
type Unsubscribe = Box<dyn FnOnce() + Send + Sync>;

#[cfg(target_arch = "wasm32")]
type Unsubscribe = Box<dyn FnOnce()>;

/// String key-value store with change notifications, in the shape of
/// `window.localStorage`.
///
/// Every operation reports host failures (a missing storage object, a full
/// quota, an unwritable file) as [`settle_core::SettleError`].
pub trait StorageBackend: MaybeSend + MaybeSync + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Registers `watcher` for changes made through other handles onto the
    /// same storage. The registration lasts until the returned guard drops.
    fn subscribe(&self, watcher: StorageWatcher) -> Subscription;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn subscribe(&self, watcher: StorageWatcher) -> Subscription {
        (**self).subscribe(watcher)
    }
}

/// Guard for a watcher registration; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription that was never registered, for backends without events.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribes now instead of on drop.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
