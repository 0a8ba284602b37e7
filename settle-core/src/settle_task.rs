// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic task spawning with cooperative cancellation.

use crate::CancellationToken;
use core::future::Future;

/// Background task handle that cancels its task on drop.
///
/// The spawned future receives a [`CancellationToken`] and is expected to
/// exit once it fires.
///
/// Native builds without `runtime-tokio` or `runtime-smol` cannot run the
/// task: it is logged, never started, and the handle reports itself cancelled.
///
/// # Runtime Support
///
/// - **Tokio**: `tokio::spawn` (default)
/// - **smol**: `smol::spawn`
/// - **WASM**: `wasm_bindgen_futures::spawn_local`
///
/// # Example
///
/// ```rust
/// use settle_core::SettleTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = SettleTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// drop(task); // signals the task to stop
/// # }
/// ```
#[derive(Debug)]
pub struct SettleTask {
    cancel: CancellationToken,
}

impl SettleTask {
    /// Spawn a background task with cancellation support.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let _future = f(cancel.clone());

        #[cfg(feature = "runtime-tokio")]
        tokio::spawn(_future);

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        smol::spawn(_future).detach();

        #[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
        {
            crate::error!("no runtime feature enabled, background task not started");
            drop(_future);
            cancel.cancel();
        }

        Self { cancel }
    }

    /// Spawn a background task with cancellation support (WASM version without
    /// `Send` bounds).
    #[cfg(target_arch = "wasm32")]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let cancel = CancellationToken::new();
        wasm_bindgen_futures::spawn_local(f(cancel.clone()));

        Self { cancel }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested via `cancel()` or drop.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for SettleTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
