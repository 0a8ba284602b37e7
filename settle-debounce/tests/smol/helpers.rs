// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc;
use futures::future::{self, Either};
use futures::{Stream, StreamExt};
use std::time::Duration;

pub fn test_channel<T>() -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>) {
    mpsc::unbounded()
}

/// Waits up to `timeout_ms` of real time for the next item.
pub async fn next_within<S, T>(stream: &mut S, timeout_ms: u64) -> anyhow::Result<T>
where
    S: Stream<Item = T> + Unpin,
{
    let timeout = smol::Timer::after(Duration::from_millis(timeout_ms));
    match future::select(stream.next(), timeout).await {
        Either::Left((Some(item), _)) => Ok(item),
        Either::Left((None, _)) => anyhow::bail!("stream ended"),
        Either::Right(_) => anyhow::bail!("no item within {timeout_ms}ms"),
    }
}

/// Waits up to `timeout_ms` of real time for the stream to end.
pub async fn ended_within<S, T>(stream: &mut S, timeout_ms: u64) -> anyhow::Result<()>
where
    S: Stream<Item = T> + Unpin,
{
    let timeout = smol::Timer::after(Duration::from_millis(timeout_ms));
    match future::select(stream.next(), timeout).await {
        Either::Left((None, _)) => Ok(()),
        Either::Left((Some(_), _)) => anyhow::bail!("unexpected item"),
        Either::Right(_) => anyhow::bail!("stream still open after {timeout_ms}ms"),
    }
}
