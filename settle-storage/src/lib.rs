// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Persisted key-value handles over `localStorage`-shaped storage.
//!
//! # Overview
//!
//! - **[`StorageBackend`]** - get/set/remove/clear plus cross-tab change events
//! - **[`StorageArea`] / [`MemoryStorage`]** - in-process origin storage with
//!   per-tab handles, optionally persisted to a JSON file
//! - **`WebStorage`** - `window.localStorage` (`wasm32` with the `web` feature)
//! - **[`LocalStorage`]** - typed handle for one key with listeners, error
//!   tracking and sync
//!
//! # Cross-tab sync
//!
//! ```
//! use settle_storage::{LocalStorage, StorageArea, StorageOptions};
//! use std::sync::{Arc, Mutex};
//!
//! let origin = StorageArea::new();
//! let tab_a = LocalStorage::<u32, _>::new("count", origin.open_tab(), StorageOptions::default());
//! let tab_b = LocalStorage::<u32, _>::new("count", origin.open_tab(), StorageOptions::default());
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! tab_b.add_listener(move |value| {
//!     sink.lock().unwrap().push(value.copied());
//!     Ok(())
//! });
//!
//! tab_a.set(Some(3)).unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec![Some(3)]);
//! assert_eq!(tab_b.get(), Some(3));
//! ```

mod area;
pub mod backend;
pub mod codec;
mod event;
mod local_storage;
mod options;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web;

pub use area::{MemoryStorage, StorageArea};
pub use backend::{StorageBackend, StorageWatcher, Subscription};
pub use codec::{CodecError, Deserializer, Serializer};
pub use event::StorageEvent;
pub use local_storage::{Listener, ListenerId, LocalStorage};
pub use options::{DefaultValue, StorageOptions};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web::WebStorage;
