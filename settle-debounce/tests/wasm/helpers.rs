// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc;
use futures::future::{self, Either};
use futures::{Stream, StreamExt};
use settle_runtime::impls::wasm::WasmTimer;
use settle_runtime::timer::Timer;
use std::time::Duration;

pub fn test_channel<T>() -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>) {
    mpsc::unbounded()
}

pub async fn sleep_ms(ms: u64) {
    WasmTimer.sleep_future(Duration::from_millis(ms)).await;
}

/// Waits up to `timeout_ms` for the next item, panicking on timeout or end.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match future::select(stream.next(), Box::pin(sleep_ms(timeout_ms))).await {
        Either::Left((Some(item), _)) => item,
        Either::Left((None, _)) => panic!("stream ended"),
        Either::Right(_) => panic!("no item within {timeout_ms}ms"),
    }
}
