// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Owned debounce handle with a background timer driver.
//!
//! A [`Debouncer`] is fed raw values with [`Debouncer::set`] and exposes the
//! debounced value, a pending flag and manual `flush`/`cancel` controls. A
//! driver task spawned on the runtime wakes at the machine's deadlines so
//! subscribers see applications as they happen; reads additionally catch up
//! with the clock themselves, so `value()` is exact even if the driver has not
//! been scheduled yet.
//!
//! Dropping the handle stops the driver and completes every subscription.

use crate::machine::{DebounceMachine, EqualityFn, Outcome};
use crate::DebounceOptions;
use core::pin::pin;
use event_listener::Event;
use futures::future::{self, Either};
use settle_core::{
    debug, CancellationToken, MaybeSend, MaybeSync, SettleError, SettleTask, Subject, SubjectStream,
};
use settle_runtime::mutex::MutexLike;
use settle_runtime::runtime::Runtime;
use settle_runtime::timer::Timer;
use std::sync::Arc;

type SharedMachine<T, R> = <R as Runtime>::Mutex<DebounceMachine<T, <R as Runtime>::Instant>>;

/// Debounces a changing value on runtime `R`.
///
/// # Example
///
/// ```rust
/// use settle_debounce::Debouncer;
/// use settle_runtime::impls::tokio::TokioRuntime;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let query = Debouncer::<String, TokioRuntime>::new(String::new(), 300_u64);
///
/// query.set("r".to_string());
/// query.set("ru".to_string());
/// query.set("rust".to_string());
/// assert!(query.is_pending());
/// assert_eq!(query.value(), "");
///
/// tokio::time::sleep(Duration::from_millis(300)).await;
/// assert_eq!(query.value(), "rust");
/// assert!(!query.is_pending());
/// # }
/// ```
pub struct Debouncer<T, R>
where
    T: Clone + Send + 'static,
    R: Runtime,
{
    state: SharedMachine<T, R>,
    wake: Arc<Event>,
    applied: Subject<T>,
    timer: R::Timer,
    _driver: SettleTask,
}

impl<T, R> Debouncer<T, R>
where
    T: Clone + Send + 'static,
    R: Runtime,
    SharedMachine<T, R>: MaybeSend + MaybeSync + 'static,
    <R::Timer as Timer>::Sleep: MaybeSend,
{
    /// Creates a debouncer exposing `initial`, comparing values with `==`.
    ///
    /// Must be called from within the runtime, which runs the timer driver.
    pub fn new(initial: T, options: impl Into<DebounceOptions>) -> Self
    where
        T: PartialEq,
    {
        Self::from_machine(DebounceMachine::new(initial, options))
    }

    /// Creates a debouncer with a custom equality check, for values whose
    /// `PartialEq` is too strict or missing.
    pub fn with_equality<F>(initial: T, options: impl Into<DebounceOptions>, equality: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let equality: EqualityFn<T> = Arc::new(equality);
        Self::from_machine(DebounceMachine::with_equality(initial, options, equality))
    }

    fn from_machine(machine: DebounceMachine<T, R::Instant>) -> Self {
        let state = <SharedMachine<T, R> as MutexLike<_>>::new(machine);
        let wake = Arc::new(Event::new());
        let applied = Subject::new();
        let timer = R::Timer::default();

        let driver = {
            let state = state.clone();
            let wake = Arc::clone(&wake);
            let applied = applied.clone();
            let timer = timer.clone();
            SettleTask::spawn(move |cancel| drive::<T, R>(state, wake, applied, timer, cancel))
        };

        Self {
            state,
            wake,
            applied,
            timer,
            _driver: driver,
        }
    }

    /// Feeds a new raw value.
    pub fn set(&self, value: T) -> Outcome<T> {
        let now = self.timer.now();
        let outcome = {
            // Published under the lock so subscribers see applications in order
            let mut machine = self.state.lock();
            self.publish(machine.advance(now));
            let outcome = machine.on_input(value, now);
            if let Outcome::Applied(value) = &outcome {
                self.publish(Some(value.clone()));
            }
            outcome
        };

        if !matches!(outcome, Outcome::Unchanged) {
            self.wake.notify(usize::MAX);
        }
        outcome
    }

    /// The debounced value.
    pub fn value(&self) -> T {
        self.catch_up();
        self.state.lock().value().clone()
    }

    /// Whether a value is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        self.catch_up();
        self.state.lock().is_pending()
    }

    /// Applies the pending value immediately. Returns it, if there was one.
    pub fn flush(&self) -> Option<T> {
        let flushed = {
            let mut machine = self.state.lock();
            let flushed = machine.flush();
            self.publish(flushed.clone());
            flushed
        };
        self.wake.notify(usize::MAX);
        flushed
    }

    /// Drops the pending value; the debounced value stays as it is.
    ///
    /// Returns whether a value was pending.
    pub fn cancel(&self) -> bool {
        let was_pending = self.state.lock().cancel();
        if was_pending {
            debug!("debounced update cancelled");
        }
        self.wake.notify(usize::MAX);
        was_pending
    }

    /// Stream of every value applied from now on.
    ///
    /// # Errors
    /// Returns `SettleError::Closed` if the debouncer is shutting down.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SettleError> {
        self.applied.subscribe()
    }

    pub fn options(&self) -> DebounceOptions {
        *self.state.lock().options()
    }

    /// Replaces the timing options. Timers already running keep their deadlines.
    pub fn set_options(&self, options: impl Into<DebounceOptions>) {
        self.state.lock().set_options(options);
        self.wake.notify(usize::MAX);
    }

    fn catch_up(&self) {
        let mut machine = self.state.lock();
        self.publish(machine.advance(self.timer.now()));
    }

    fn publish(&self, value: Option<T>) {
        if let Some(value) = value {
            let _ = self.applied.next(value);
        }
    }
}

impl<T, R> Drop for Debouncer<T, R>
where
    T: Clone + Send + 'static,
    R: Runtime,
{
    fn drop(&mut self) {
        self.applied.close();
    }
}

/// Sleeps until the machine's next deadline and applies what expired there.
///
/// Re-reads the deadline whenever the handle signals a change.
async fn drive<T, R>(
    state: SharedMachine<T, R>,
    wake: Arc<Event>,
    applied: Subject<T>,
    timer: R::Timer,
    cancel: CancellationToken,
) where
    T: Clone + Send + 'static,
    R: Runtime,
{
    loop {
        // Listen before reading the deadline so a concurrent change is not missed
        let changed = wake.listen();
        let deadline = state.lock().next_deadline();

        let sleep = pin!(async {
            match deadline {
                Some(deadline) => timer.sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        });
        let cancelled = pin!(cancel.cancelled());

        match future::select(cancelled, future::select(changed, sleep)).await {
            Either::Left(_) => break,
            Either::Right((Either::Left(_), _)) => continue,
            Either::Right((Either::Right(_), _)) => {
                let mut machine = state.lock();
                if let Some(value) = machine.advance(timer.now()) {
                    if applied.next(value).is_err() {
                        break;
                    }
                }
            }
        }
    }
}
