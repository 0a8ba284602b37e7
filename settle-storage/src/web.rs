// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Browser `window.localStorage` backend.

use crate::backend::{StorageBackend, StorageWatcher, Subscription};
use crate::StorageEvent;
use settle_core::{error, Result, SettleError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const STORAGE_EVENT: &str = "storage";

/// The page's `localStorage`, with cross-tab changes delivered through the
/// window `storage` event.
#[derive(Debug, Clone)]
pub struct WebStorage {
    window: web_sys::Window,
    storage: web_sys::Storage,
}

impl WebStorage {
    /// Opens `window.localStorage`.
    ///
    /// # Errors
    /// Returns `SettleError::Storage` outside a window context, or when the
    /// browser denies access (private mode, disabled storage).
    pub fn local() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| SettleError::storage_error("no window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage access denied", &e))?
            .ok_or_else(|| SettleError::storage_error("localStorage is not available"))?;

        Ok(Self { window, storage })
    }
}

impl StorageBackend for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("getItem failed", &e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("setItem failed", &e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("removeItem failed", &e))
    }

    fn clear(&self) -> Result<()> {
        self.storage.clear().map_err(|e| js_error("clear failed", &e))
    }

    fn subscribe(&self, watcher: StorageWatcher) -> Subscription {
        let closure = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                watcher(&StorageEvent {
                    key: event.key(),
                    old_value: event.old_value(),
                    new_value: event.new_value(),
                });
            },
        );

        if let Err(e) = self
            .window
            .add_event_listener_with_callback(STORAGE_EVENT, closure.as_ref().unchecked_ref())
        {
            error!("failed to listen for storage events: {:?}", e);
            return Subscription::detached();
        }

        let window = self.window.clone();
        Subscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback(STORAGE_EVENT, closure.as_ref().unchecked_ref());
        })
    }
}

fn js_error(context: &str, value: &JsValue) -> SettleError {
    SettleError::storage_error(format!("{context}: {value:?}"))
}
