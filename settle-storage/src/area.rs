// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! In-process storage areas.
//!
//! A [`StorageArea`] plays the part of one origin's `localStorage`: a single
//! string map shared by every tab of that origin. Each tab talks to the area
//! through its own [`MemoryStorage`] handle. As in the browser, a change made
//! through one tab raises a [`StorageEvent`] in every *other* tab; the tab that
//! made the change hears nothing.
//!
//! An area can also be backed by a JSON file, which is loaded when the area is
//! opened and rewritten after every mutation.

use crate::backend::{StorageBackend, StorageWatcher, Subscription};
use crate::StorageEvent;
use parking_lot::Mutex;
use settle_core::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

#[cfg(not(target_arch = "wasm32"))]
use settle_core::{debug, warn, ResultExt};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

type TabId = u64;
type WatcherId = u64;

/// Shared storage of one origin.
///
/// Cloning the area clones the handle, not the data.
#[derive(Clone, Default)]
pub struct StorageArea {
    inner: Arc<AreaInner>,
}

#[derive(Default)]
struct AreaInner {
    state: Mutex<AreaState>,
    #[cfg(not(target_arch = "wasm32"))]
    file: Option<PathBuf>,
}

#[derive(Default)]
struct AreaState {
    items: BTreeMap<String, String>,
    watchers: Vec<WatcherEntry>,
    next_tab: TabId,
    next_watcher: WatcherId,
}

struct WatcherEntry {
    id: WatcherId,
    tab: TabId,
    watcher: StorageWatcher,
}

impl StorageArea {
    /// Creates an empty area that lives only in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an area persisted in the JSON file at `path`.
    ///
    /// A missing file yields an empty area; the file is created by the first
    /// mutation.
    ///
    /// # Errors
    /// Returns `SettleError::Io` if the file exists but cannot be read, and
    /// `SettleError::Storage` if it does not hold a JSON object of strings.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn persistent(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<BTreeMap<String, String>>(&content)
                .with_storage_context(|| format!("invalid storage file {}", path.display()))?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };

        debug!("opened storage file {} with {} items", path.display(), items.len());

        Ok(Self {
            inner: Arc::new(AreaInner {
                state: Mutex::new(AreaState {
                    items,
                    ..AreaState::default()
                }),
                file: Some(path),
            }),
        })
    }

    /// Opens a new tab onto this area.
    pub fn open_tab(&self) -> MemoryStorage {
        let tab = {
            let mut state = self.inner.state.lock();
            state.next_tab += 1;
            state.next_tab
        };

        MemoryStorage {
            area: self.clone(),
            tab,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().items.is_empty()
    }

    /// Snapshot of the stored keys, in order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.state.lock().items.keys().cloned().collect()
    }

    /// Backing file, for persistent areas.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path(&self) -> Option<&Path> {
        self.inner.file.as_deref()
    }

    /// Number of registered watchers across all tabs.
    pub fn watcher_count(&self) -> usize {
        self.inner.state.lock().watchers.len()
    }

    /// Applies `mutation` on behalf of `origin` and notifies the other tabs.
    ///
    /// The mutation returns the event it caused, or `None` when nothing
    /// changed. Persistent areas mutate a copy and only keep it once the file
    /// has been written.
    fn mutate<M>(&self, origin: TabId, mutation: M) -> Result<()>
    where
        M: FnOnce(&mut BTreeMap<String, String>) -> Option<StorageEvent>,
    {
        let (event, watchers) = {
            let mut state = self.inner.state.lock();
            let event = if self.inner.is_persistent() {
                let mut items = state.items.clone();
                let Some(event) = mutation(&mut items) else {
                    return Ok(());
                };
                self.inner.persist(&items)?;
                state.items = items;
                event
            } else {
                let Some(event) = mutation(&mut state.items) else {
                    return Ok(());
                };
                event
            };

            let watchers: Vec<StorageWatcher> = state
                .watchers
                .iter()
                .filter(|entry| entry.tab != origin)
                .map(|entry| Arc::clone(&entry.watcher))
                .collect();
            (event, watchers)
        };

        // Watchers run unlocked so they can read the area back
        for watcher in watchers {
            watcher(&event);
        }

        Ok(())
    }

    fn register(&self, tab: TabId, watcher: StorageWatcher) -> Subscription {
        let id = {
            let mut state = self.inner.state.lock();
            state.next_watcher += 1;
            let id = state.next_watcher;
            state.watchers.push(WatcherEntry { id, tab, watcher });
            id
        };

        let area: Weak<AreaInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(area) = area.upgrade() {
                area.state.lock().watchers.retain(|entry| entry.id != id);
            }
        })
    }
}

impl AreaInner {
    #[cfg(not(target_arch = "wasm32"))]
    fn is_persistent(&self) -> bool {
        self.file.is_some()
    }

    #[cfg(target_arch = "wasm32")]
    fn is_persistent(&self) -> bool {
        false
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        use std::io::Write;

        let Some(path) = &self.file else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(items)
            .storage_context("failed to encode storage file")?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // Write beside the target, then swap it in
        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|error| {
            warn!("failed to replace storage file {}: {}", path.display(), error);
            error.error
        })?;

        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    fn persist(&self, _items: &BTreeMap<String, String>) -> Result<()> {
        Ok(())
    }
}

/// One tab's handle onto a [`StorageArea`].
#[derive(Clone)]
pub struct MemoryStorage {
    area: StorageArea,
    tab: TabId,
}

impl MemoryStorage {
    /// A tab onto a fresh, private in-memory area.
    pub fn new() -> Self {
        StorageArea::new().open_tab()
    }

    pub fn area(&self) -> &StorageArea {
        &self.area
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.area.inner.state.lock().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.area.mutate(self.tab, |items| {
            let old_value = items.insert(key.to_owned(), value.to_owned());
            (old_value.as_deref() != Some(value))
                .then(|| StorageEvent::set(key, old_value, value.to_owned()))
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.area.mutate(self.tab, |items| {
            items
                .remove(key)
                .map(|old_value| StorageEvent::removed(key, old_value))
        })
    }

    fn clear(&self) -> Result<()> {
        self.area.mutate(self.tab, |items| {
            if items.is_empty() {
                return None;
            }
            items.clear();
            Some(StorageEvent::cleared())
        })
    }

    fn subscribe(&self, watcher: StorageWatcher) -> Subscription {
        self.area.register(self.tab, watcher)
    }
}
