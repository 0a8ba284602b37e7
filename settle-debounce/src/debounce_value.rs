// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::machine::{DebounceMachine, EqualityFn};
use crate::DebounceOptions;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use pin_project::pin_project;
use settle_runtime::timer::Timer;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

#[cfg(any(
    feature = "runtime-tokio",
    feature = "runtime-smol",
    feature = "runtime-wasm"
))]
type DefaultTimer = <settle_runtime::DefaultRuntime as settle_runtime::runtime::Runtime>::Timer;

/// Extension trait providing the `debounce_value` operator for streams of
/// plain values.
///
/// Unlike a pure trailing debounce, the operator honours the full
/// [`DebounceOptions`]: leading and trailing edges, and a max-wait bound that
/// forces an emission during a continuous burst. Items equal to the latest
/// accepted item are ignored and do not restart the quiet window.
///
/// When the source ends, a pending item is emitted right away if either edge
/// is enabled, then the stream ends.
pub trait DebounceValueExt<T>: Stream<Item = T> + Sized
where
    T: Clone + PartialEq + 'static,
{
    /// Debounces the stream, measuring time with `timer`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use settle_debounce::{DebounceOptions, DebounceValueExt};
    /// use settle_runtime::impls::tokio::TokioTimer;
    /// use futures::{stream, StreamExt};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread", start_paused = true)]
    /// # async fn main() {
    /// let options = DebounceOptions::new(Duration::from_millis(100));
    /// let debounced = stream::iter(["s", "se", "sea"])
    ///     .debounce_value_with_timer(options, TokioTimer);
    ///
    /// // the burst collapses into its last item
    /// assert_eq!(debounced.collect::<Vec<_>>().await, vec!["sea"]);
    /// # }
    /// ```
    fn debounce_value_with_timer<TM>(
        self,
        options: impl Into<DebounceOptions>,
        timer: TM,
    ) -> impl Stream<Item = T> + Unpin
    where
        TM: Timer;

    /// Debounces the stream using the timer of the default runtime.
    #[cfg(any(
        feature = "runtime-tokio",
        feature = "runtime-smol",
        feature = "runtime-wasm"
    ))]
    fn debounce_value(self, options: impl Into<DebounceOptions>) -> impl Stream<Item = T> + Unpin;
}

impl<S, T> DebounceValueExt<T> for S
where
    S: Stream<Item = T>,
    T: Clone + PartialEq + 'static,
{
    fn debounce_value_with_timer<TM>(
        self,
        options: impl Into<DebounceOptions>,
        timer: TM,
    ) -> impl Stream<Item = T> + Unpin
    where
        TM: Timer,
    {
        Box::pin(DebounceValueStream {
            stream: self,
            options: options.into(),
            equality: Arc::new(|a: &T, b: &T| a == b),
            timer,
            machine: None,
            sleep: None,
            ready: VecDeque::new(),
            stream_ended: false,
        })
    }

    #[cfg(any(
        feature = "runtime-tokio",
        feature = "runtime-smol",
        feature = "runtime-wasm"
    ))]
    fn debounce_value(self, options: impl Into<DebounceOptions>) -> impl Stream<Item = T> + Unpin {
        self.debounce_value_with_timer(options, DefaultTimer::default())
    }
}

#[pin_project]
struct DebounceValueStream<S, T, TM>
where
    TM: Timer,
{
    #[pin]
    stream: S,
    options: DebounceOptions,
    equality: EqualityFn<T>,
    timer: TM,
    machine: Option<DebounceMachine<T, TM::Instant>>,
    #[pin]
    sleep: Option<TM::Sleep>,
    ready: VecDeque<T>,
    stream_ended: bool,
}

impl<S, T, TM> Stream for DebounceValueStream<S, T, TM>
where
    S: Stream<Item = T>,
    T: Clone,
    TM: Timer,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.ready.pop_front() {
                return Poll::Ready(Some(item));
            }

            if *this.stream_ended {
                // Source is done: the pending item is not worth waiting for
                let flushed = this.machine.take().and_then(|mut machine| {
                    let emit = machine.options().applies_on_max_wait();
                    machine.flush().filter(|_| emit)
                });
                this.sleep.set(None);
                return Poll::Ready(flushed);
            }

            if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
                if sleep.poll(cx).is_ready() {
                    this.sleep.set(None);
                    if let Some(machine) = this.machine.as_mut() {
                        if let Some(item) = machine.advance(this.timer.now()) {
                            this.ready.push_back(item);
                        }
                        this.sleep
                            .set(machine.next_deadline().map(|d| this.timer.sleep_until(d)));
                    }
                    continue;
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let now = this.timer.now();
                    match this.machine.as_mut() {
                        Some(machine) => {
                            if let Some(expired) = machine.advance(now) {
                                this.ready.push_back(expired);
                            }
                            if let Some(applied) = machine.on_input(item, now).applied() {
                                this.ready.push_back(applied);
                            }
                        }
                        None => {
                            let (machine, outcome) = DebounceMachine::from_first_input(
                                item,
                                now,
                                *this.options,
                                Arc::clone(this.equality),
                            );
                            if let Some(applied) = outcome.applied() {
                                this.ready.push_back(applied);
                            }
                            *this.machine = Some(machine);
                        }
                    }

                    // Restart the timer from the machine's current deadline
                    let deadline = this.machine.as_ref().and_then(DebounceMachine::next_deadline);
                    this.sleep.set(deadline.map(|d| this.timer.sleep_until(d)));
                    continue;
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                    continue;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
