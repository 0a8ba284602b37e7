// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::mutex::MutexLike;
use crate::timer::{CheckedAdd, Timer};
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Bundles a timer with the mutex and instant types that go with it.
pub trait Runtime: 'static {
    type Mutex<T: ?Sized>: MutexLike<T>;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Debug
        + CheckedAdd
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;
}
