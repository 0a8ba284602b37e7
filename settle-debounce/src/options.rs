// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Timing configuration for a debouncer.
///
/// A bare delay is the common case, so both `Duration` and a plain number of
/// milliseconds convert into options with every other field at its default:
///
/// ```
/// use settle_debounce::DebounceOptions;
/// use std::time::Duration;
///
/// let from_ms: DebounceOptions = 300_u64.into();
/// let explicit = DebounceOptions::new(Duration::from_millis(300));
/// assert_eq!(from_ms, explicit);
///
/// let search = DebounceOptions::new(Duration::from_millis(300))
///     .with_max_wait(Duration::from_secs(1))
///     .with_leading(true);
/// assert!(search.trailing);
/// ```
///
/// Options also deserialize from application configuration, with durations in
/// milliseconds:
///
/// ```
/// use settle_debounce::DebounceOptions;
///
/// let options: DebounceOptions =
///     serde_json::from_str(r#"{ "delay_ms": 250, "max_wait_ms": 1000 }"#).unwrap();
/// assert_eq!(options.max_wait.unwrap().as_millis(), 1000);
/// assert!(!options.leading);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DebounceConfig", into = "DebounceConfig")]
pub struct DebounceOptions {
    /// Quiet period that must pass after the last change before it is applied
    pub delay: Duration,
    /// Upper bound on how long a burst of changes may keep a value pending
    pub max_wait: Option<Duration>,
    /// Apply the first change of a burst immediately
    pub leading: bool,
    /// Apply the last change of a burst once the quiet period ends
    pub trailing: bool,
}

impl DebounceOptions {
    /// Trailing-only options with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            max_wait: None,
            leading: false,
            trailing: true,
        }
    }

    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    #[must_use]
    pub const fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Whether an expiring max-wait deadline may apply the pending value.
    pub(crate) const fn applies_on_max_wait(&self) -> bool {
        self.trailing || self.leading
    }
}

impl From<Duration> for DebounceOptions {
    fn from(delay: Duration) -> Self {
        Self::new(delay)
    }
}

impl From<u64> for DebounceOptions {
    fn from(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }
}

/// Serialized form of [`DebounceOptions`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DebounceConfig {
    delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_wait_ms: Option<u64>,
    #[serde(default)]
    leading: bool,
    #[serde(default = "default_trailing")]
    trailing: bool,
}

const fn default_trailing() -> bool {
    true
}

impl From<DebounceConfig> for DebounceOptions {
    fn from(config: DebounceConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            max_wait: config.max_wait_ms.map(Duration::from_millis),
            leading: config.leading,
            trailing: config.trailing,
        }
    }
}

impl From<DebounceOptions> for DebounceConfig {
    fn from(options: DebounceOptions) -> Self {
        Self {
            delay_ms: duration_to_ms(options.delay),
            max_wait_ms: options.max_wait.map(duration_to_ms),
            leading: options.leading,
            trailing: options.trailing,
        }
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
