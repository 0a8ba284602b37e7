// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! String codecs between values and their stored form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Error returned by a codec; any error type converts into it.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Turns a value into the string stored under its key.
pub type Serializer<T> = Arc<dyn Fn(&T) -> Result<String, CodecError> + Send + Sync>;

/// Turns a stored string back into a value.
pub type Deserializer<T> = Arc<dyn Fn(&str) -> Result<T, CodecError> + Send + Sync>;

/// JSON encoding through `serde_json`.
pub fn json_serializer<T: Serialize + 'static>() -> Serializer<T> {
    Arc::new(|value: &T| serde_json::to_string(value).map_err(CodecError::from))
}

/// JSON decoding through `serde_json`.
pub fn json_deserializer<T: DeserializeOwned + 'static>() -> Deserializer<T> {
    Arc::new(|raw: &str| serde_json::from_str(raw).map_err(CodecError::from))
}

/// Stores plain strings as-is, without JSON quoting.
pub fn raw_string_serializer() -> Serializer<String> {
    Arc::new(|value: &String| Ok(value.clone()))
}

/// Reads stored strings as-is.
pub fn raw_string_deserializer() -> Deserializer<String> {
    Arc::new(|raw: &str| Ok(raw.to_owned()))
}
