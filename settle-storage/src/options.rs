// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::codec::{self, CodecError, Deserializer, Serializer};
use core::fmt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Value returned by reads when the key is absent or unreadable.
pub enum DefaultValue<T> {
    /// Reads yield `None`.
    None,
    /// Reads yield a clone of this value.
    Value(T),
    /// Reads yield a fresh value from the factory, called on every read.
    Factory(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> DefaultValue<T> {
    pub fn resolve(&self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Value(value) => Some(value.clone()),
            Self::Factory(factory) => Some(factory()),
        }
    }
}

impl<T> Default for DefaultValue<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T: Clone> Clone for DefaultValue<T> {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Value(value) => Self::Value(value.clone()),
            Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DefaultValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Configuration of a [`LocalStorage`](crate::LocalStorage) handle.
///
/// Serde types get JSON codecs by default:
///
/// ```
/// use settle_storage::StorageOptions;
///
/// let options = StorageOptions::<Vec<u32>>::default()
///     .with_default(Vec::new())
///     .with_storage_sync(false);
/// assert!(!options.storage_sync);
/// ```
pub struct StorageOptions<T> {
    pub serializer: Serializer<T>,
    pub deserializer: Deserializer<T>,
    pub default_value: DefaultValue<T>,
    /// Follow changes made by other tabs (default `true`)
    pub storage_sync: bool,
}

impl<T> StorageOptions<T> {
    /// Options with custom codecs, for types without serde support.
    pub fn with_codec<S, D>(serializer: S, deserializer: D) -> Self
    where
        S: Fn(&T) -> Result<String, CodecError> + Send + Sync + 'static,
        D: Fn(&str) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        Self {
            serializer: Arc::new(serializer),
            deserializer: Arc::new(deserializer),
            default_value: DefaultValue::None,
            storage_sync: true,
        }
    }

    #[must_use]
    pub fn with_serializer<S>(mut self, serializer: S) -> Self
    where
        S: Fn(&T) -> Result<String, CodecError> + Send + Sync + 'static,
    {
        self.serializer = Arc::new(serializer);
        self
    }

    #[must_use]
    pub fn with_deserializer<D>(mut self, deserializer: D) -> Self
    where
        D: Fn(&str) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        self.deserializer = Arc::new(deserializer);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: T) -> Self {
        self.default_value = DefaultValue::Value(value);
        self
    }

    #[must_use]
    pub fn with_default_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default_value = DefaultValue::Factory(Arc::new(factory));
        self
    }

    #[must_use]
    pub fn with_storage_sync(mut self, storage_sync: bool) -> Self {
        self.storage_sync = storage_sync;
        self
    }
}

impl<T: Serialize + DeserializeOwned + 'static> Default for StorageOptions<T> {
    fn default() -> Self {
        Self {
            serializer: codec::json_serializer(),
            deserializer: codec::json_deserializer(),
            default_value: DefaultValue::None,
            storage_sync: true,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StorageOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageOptions")
            .field("default_value", &self.default_value)
            .field("storage_sync", &self.storage_sync)
            .finish_non_exhaustive()
    }
}
