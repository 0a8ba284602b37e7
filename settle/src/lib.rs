// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Settle
//!
//! Building blocks for interactive applications whose state should settle
//! before it is acted upon, and survive a reload once it has.
//!
//! ## Overview
//!
//! - [`Debouncer`] / [`DebounceValueExt`] - hold back a rapidly changing value
//!   until it has been quiet for a while, with an optional leading edge and a
//!   max-wait bound
//! - [`LocalStorage`] - a typed handle onto one key of a string store, kept in
//!   sync across tabs and fanned out to listeners
//! - [`StorageArea`] / [`MemoryStorage`] - in-process, optionally file-backed
//!   storage with browser-like cross-tab events
//!
//! ## Quick Start
//!
//! ```rust
//! use settle::prelude::*;
//! use settle::runtime::impls::tokio::TokioRuntime;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> settle::Result<()> {
//! let area = StorageArea::new();
//! let saved = LocalStorage::new("query", area.open_tab(), StorageOptions::<String>::default());
//! let query = Debouncer::<String, TokioRuntime>::new(String::new(), 300_u64);
//!
//! query.set("set".to_string());
//! query.set("settle".to_string());
//! tokio::time::sleep(Duration::from_millis(300)).await;
//!
//! saved.set(Some(query.value()))?;
//! assert_eq!(saved.get().as_deref(), Some("settle"));
//! # Ok(())
//! # }
//! ```

pub use settle_core::{Result, ResultExt, SettleError};

pub use settle_debounce::{DebounceMachine, DebounceOptions, DebounceValueExt, Debouncer, Outcome};

pub use settle_storage::{
    DefaultValue, ListenerId, LocalStorage, MemoryStorage, StorageArea, StorageBackend,
    StorageEvent, StorageOptions, Subscription,
};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use settle_storage::WebStorage;

pub use settle_runtime as runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use settle_debounce::prelude::*;
    pub use settle_storage::{
        LocalStorage, MemoryStorage, StorageArea, StorageBackend, StorageOptions,
    };
}
