// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::{sync::Arc, time::Duration};

#[cfg(feature = "runtime-tokio")]
use crate::{
    runtime::Runtime,
    timer::{CheckedAdd, Timer},
};

#[cfg(feature = "runtime-tokio")]
#[derive(Debug)]
pub struct TokioRuntime;

#[cfg(feature = "runtime-tokio")]
impl Runtime for TokioRuntime {
    type Mutex<T: ?Sized> = Arc<parking_lot::Mutex<T>>;
    type Timer = TokioTimer;
    type Instant = ::tokio::time::Instant;
}

#[cfg(feature = "runtime-tokio")]
impl CheckedAdd for ::tokio::time::Instant {
    fn checked_add(&self, duration: Duration) -> Option<Self> {
        ::tokio::time::Instant::checked_add(self, duration)
    }
}

/// Timer backed by the Tokio clock.
///
/// Uses `tokio::time::Instant` rather than `std::time::Instant` so that paused
/// test time (`tokio::time::pause`/`advance`) moves `now()` and the sleeps together.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

#[cfg(feature = "runtime-tokio")]
impl Timer for TokioTimer {
    type Sleep = ::tokio::time::Sleep;

    type Instant = ::tokio::time::Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        ::tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        ::tokio::time::Instant::now()
    }

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        ::tokio::time::sleep_until(deadline)
    }
}
