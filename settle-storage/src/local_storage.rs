// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Typed handle onto one storage key.

use crate::backend::{StorageBackend, StorageWatcher, Subscription};
use crate::codec::{Deserializer, Serializer};
use crate::{DefaultValue, StorageEvent, StorageOptions};
use core::fmt;
use parking_lot::Mutex;
use settle_core::{error, MaybeSend, MaybeSync, Result, SettleError};
use std::sync::Arc;

/// Callback notified with the key's new value (`None` once removed).
pub type Listener<T> = Arc<dyn Fn(Option<&T>) -> Result<()> + Send + Sync>;

/// Identifies a registered listener for [`LocalStorage::remove_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Reads and writes one key of a [`StorageBackend`] as a typed value.
///
/// Writes made through the handle, and (with `storage_sync`) changes made by
/// other tabs, are fanned out to the registered listeners. Failures never
/// panic: reads fall back to the default value, and the last failure is kept
/// for [`LocalStorage::error`].
///
/// The key, codecs and default can be swapped on a live handle with
/// [`LocalStorage::set_key`] and [`LocalStorage::set_options`]; listeners and
/// the sync subscription carry over.
///
/// # Example
///
/// ```
/// use settle_storage::{LocalStorage, StorageArea, StorageBackend, StorageOptions};
///
/// let area = StorageArea::new();
/// let theme = LocalStorage::new(
///     "theme",
///     area.open_tab(),
///     StorageOptions::default().with_default("light".to_string()),
/// );
///
/// assert_eq!(theme.get().as_deref(), Some("light"));
/// theme.set(Some("dark".to_string())).unwrap();
/// assert_eq!(theme.get().as_deref(), Some("dark"));
///
/// // stored as JSON, visible to every tab of the area
/// assert_eq!(area.open_tab().get_item("theme").unwrap().as_deref(), Some("\"dark\""));
/// ```
pub struct LocalStorage<T, B> {
    inner: Arc<Inner<T, B>>,
    subscription: Mutex<Option<Subscription>>,
}

struct Inner<T, B> {
    backend: B,
    config: Mutex<Config<T>>,
    error: Mutex<Option<SettleError>>,
    listeners: Mutex<Listeners<T>>,
}

/// Per-handle settings that may change while the handle is live.
struct Config<T> {
    key: String,
    serializer: Serializer<T>,
    deserializer: Deserializer<T>,
    default_value: DefaultValue<T>,
}

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

impl<T, B> LocalStorage<T, B>
where
    T: Clone + MaybeSend + MaybeSync + 'static,
    B: StorageBackend,
{
    /// Creates the handle and, when `storage_sync` is set, starts following
    /// changes made by other tabs.
    pub fn new(key: impl Into<String>, backend: B, options: StorageOptions<T>) -> Self {
        let StorageOptions {
            serializer,
            deserializer,
            default_value,
            storage_sync,
        } = options;

        let inner = Arc::new(Inner {
            backend,
            config: Mutex::new(Config {
                key: key.into(),
                serializer,
                deserializer,
                default_value,
            }),
            error: Mutex::new(None),
            listeners: Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
        });

        let subscription = storage_sync.then(|| Inner::watch(&inner));

        Self {
            inner,
            subscription: Mutex::new(subscription),
        }
    }

    /// Current value, or the default when the key is absent.
    ///
    /// A read or decode failure is recorded and logged, and the default is
    /// returned instead.
    pub fn get(&self) -> Option<T> {
        let inner = &self.inner;
        let config = inner.config();
        let raw = match inner.backend.get_item(&config.key) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error reading storage key \"{}\": {}", config.key, e);
                inner.record(e);
                return config.default_value.resolve();
            }
        };

        let Some(raw) = raw else {
            return config.default_value.resolve();
        };

        match config.decode(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Error reading storage key \"{}\": {}", config.key, e);
                inner.record(e);
                config.default_value.resolve()
            }
        }
    }

    /// Stores `value`, or removes the key for `None`, then notifies listeners.
    ///
    /// # Errors
    /// Returns the serialization or storage failure, which is also recorded
    /// for [`LocalStorage::error`]. Listeners are not notified in that case.
    pub fn set(&self, value: Option<T>) -> Result<()> {
        let inner = &self.inner;
        let config = inner.config();
        if let Err(e) = inner.write(&config, value.as_ref()) {
            error!("Error setting storage key \"{}\": {}", config.key, e);
            inner.record(e.clone());
            return Err(e);
        }

        inner.clear_error();
        inner.notify(&config.key, value.as_ref());
        Ok(())
    }

    /// Points the handle at another key.
    ///
    /// Nothing is read or notified; the next `get`, `set` and sync event use
    /// the new key.
    pub fn set_key(&self, key: impl Into<String>) {
        self.inner.config.lock().key = key.into();
    }

    /// Replaces codecs, default value and sync setting.
    ///
    /// Listeners are kept. Turning `storage_sync` off drops the backend
    /// subscription; turning it on subscribes again.
    pub fn set_options(&self, options: StorageOptions<T>) {
        let StorageOptions {
            serializer,
            deserializer,
            default_value,
            storage_sync,
        } = options;

        {
            let mut config = self.inner.config.lock();
            config.serializer = serializer;
            config.deserializer = deserializer;
            config.default_value = default_value;
        }

        let mut subscription = self.subscription.lock();
        match (storage_sync, subscription.is_some()) {
            (true, false) => *subscription = Some(Inner::watch(&self.inner)),
            (false, true) => *subscription = None,
            _ => {}
        }
    }

    /// Registers a listener for every value written through this handle or
    /// synced from another tab.
    ///
    /// A listener returning an error is logged and skipped; the remaining
    /// listeners still run and the handle's error is untouched.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Option<&T>) -> Result<()> + Send + Sync + 'static,
    {
        let mut listeners = self.inner.listeners.lock();
        listeners.next_id += 1;
        let id = ListenerId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns whether the listener was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().entries.len()
    }

    /// The last recorded failure, cleared by the next successful write or sync.
    pub fn error(&self) -> Option<SettleError> {
        self.inner.error.lock().clone()
    }

    pub fn key(&self) -> String {
        self.inner.config.lock().key.clone()
    }

    /// Whether the handle follows changes made by other tabs.
    pub fn is_synced(&self) -> bool {
        self.subscription.lock().is_some()
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }
}

impl<T, B> Inner<T, B>
where
    T: Clone + MaybeSend + MaybeSync + 'static,
    B: StorageBackend,
{
    fn watch(inner: &Arc<Self>) -> Subscription {
        let watched = Arc::clone(inner);
        let watcher: StorageWatcher = Arc::new(move |event: &StorageEvent| {
            watched.on_storage_event(event);
        });
        inner.backend.subscribe(watcher)
    }

    fn config(&self) -> Config<T> {
        self.config.lock().clone()
    }

    fn write(&self, config: &Config<T>, value: Option<&T>) -> Result<()> {
        match value {
            None => self.backend.remove_item(&config.key),
            Some(value) => {
                let raw = (config.serializer)(value)
                    .map_err(|e| SettleError::serialization_error(&config.key, e))?;
                self.backend.set_item(&config.key, &raw)
            }
        }
    }

    fn on_storage_event(&self, event: &StorageEvent) {
        // The key is read per event so `set_key` takes effect at once.
        // Clear events carry no key and are ignored.
        let config = self.config();
        if event.key.as_deref() != Some(config.key.as_str()) {
            return;
        }

        let value = match event.new_value.as_deref().map(|raw| config.decode(raw)).transpose() {
            Ok(value) => value,
            Err(e) => {
                error!("Error processing storage event for key \"{}\": {}", config.key, e);
                self.record(e);
                return;
            }
        };

        self.clear_error();
        self.notify(&config.key, value.as_ref());
    }

    fn notify(&self, key: &str, value: Option<&T>) {
        // Snapshot so listeners may add or remove listeners
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            if let Err(e) = listener(value) {
                error!("Error in storage listener for key \"{}\": {}", key, e);
            }
        }
    }

    fn record(&self, error: SettleError) {
        *self.error.lock() = Some(error);
    }

    fn clear_error(&self) {
        *self.error.lock() = None;
    }
}

impl<T> Config<T> {
    fn decode(&self, raw: &str) -> Result<T> {
        (self.deserializer)(raw).map_err(|e| SettleError::deserialization_error(&self.key, e))
    }
}

impl<T: Clone> Clone for Config<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            serializer: Arc::clone(&self.serializer),
            deserializer: Arc::clone(&self.deserializer),
            default_value: self.default_value.clone(),
        }
    }
}

impl<T, B> fmt::Debug for LocalStorage<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStorage")
            .field("key", &self.inner.config.lock().key)
            .field("synced", &self.subscription.lock().is_some())
            .field("error", &*self.inner.error.lock())
            .finish_non_exhaustive()
    }
}
