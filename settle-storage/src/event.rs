// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Change notification raised by a storage area for the other tabs of an origin.
///
/// Mirrors the browser `StorageEvent`: `key` is `None` when the whole area was
/// cleared, and `new_value` is `None` when the key was removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageEvent {
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl StorageEvent {
    /// A key was written.
    pub fn set(key: impl Into<String>, old_value: Option<String>, new_value: String) -> Self {
        Self {
            key: Some(key.into()),
            old_value,
            new_value: Some(new_value),
        }
    }

    /// A key was removed.
    pub fn removed(key: impl Into<String>, old_value: String) -> Self {
        Self {
            key: Some(key.into()),
            old_value: Some(old_value),
            new_value: None,
        }
    }

    /// The whole area was cleared.
    pub const fn cleared() -> Self {
        Self {
            key: None,
            old_value: None,
            new_value: None,
        }
    }

    pub const fn is_clear(&self) -> bool {
        self.key.is_none()
    }

    /// Whether the event may have changed `key`.
    pub fn affects(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |changed| changed == key)
    }
}
