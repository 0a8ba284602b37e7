// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::FutureExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Panics if the stream yields anything within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected item emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Waits up to `timeout_ms` for the next item.
///
/// # Panics
/// If the stream ends or the timeout elapses first.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected item but stream ended"),
        Err(_) => panic!("Timeout: No item received within {timeout_ms} ms"),
    }
}

/// Panics unless the stream ends within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected stream to end but got an item"),
        Err(_) => panic!("Timeout: Stream did not end within {timeout_ms} ms"),
    }
}

/// Polls the stream once, without letting time pass, and panics if it is
/// ready.
///
/// Paused-clock tests use this after feeding an operator: the poll hands the
/// input to the operator, which arms its timers at the current instant.
pub fn assert_pending<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
{
    match stream.next().now_or_never() {
        None => {}
        Some(Some(_)) => panic!("Expected no item yet, but one was emitted"),
        Some(None) => panic!("Expected no item yet, but the stream ended"),
    }
}
