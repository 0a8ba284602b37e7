// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Instants that can be moved forward without overflowing.
///
/// A deadline too far in the future to represent is `None`, which callers
/// treat as never expiring.
pub trait CheckedAdd: Sized {
    fn checked_add(&self, duration: Duration) -> Option<Self>;
}

impl CheckedAdd for std::time::Instant {
    fn checked_add(&self, duration: Duration) -> Option<Self> {
        std::time::Instant::checked_add(self, duration)
    }
}

pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()>;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + CheckedAdd
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Creates a future that completes once `duration` has elapsed.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Creates a future that completes at `deadline`, or right away if the
    /// deadline already passed.
    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        let now = self.now();
        let remaining = if deadline > now {
            deadline - now
        } else {
            Duration::ZERO
        };
        self.sleep_future(remaining)
    }
}
