// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer-free debounce state machine.
//!
//! [`DebounceMachine`] never sleeps. It records deadlines and is told what
//! time it is by its driver, which makes it usable with any clock (and
//! trivially testable with a fake one). Drivers follow one rule: call
//! [`DebounceMachine::advance`] with the current instant before feeding a new
//! input, and again whenever [`DebounceMachine::next_deadline`] passes.
//!
//! # States
//!
//! | state   | window | pending | meaning                                   |
//! |---------|--------|---------|-------------------------------------------|
//! | idle    | closed | no      | nothing to do                             |
//! | cooling | open   | no      | last change already applied (leading)     |
//! | waiting | open   | yes     | a change awaits the end of the quiet window |
//!
//! The max-wait deadline is armed by the first deferred input of a burst and
//! is independent of the quiet window: further inputs push the window back
//! but never the max-wait deadline.

use crate::DebounceOptions;
use core::fmt;
use settle_core::debug;
use settle_runtime::timer::CheckedAdd;
use std::sync::Arc;

/// Predicate deciding whether an input is the same as the latest one.
pub type EqualityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Result of feeding one input to a [`DebounceMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The input equals the latest accepted input; nothing changed.
    Unchanged,
    /// The input was accepted and is waiting for a timer.
    Deferred,
    /// The input was applied right away (leading edge).
    Applied(T),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The applied value, if the input was applied immediately.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }
}

pub struct DebounceMachine<T, I> {
    options: DebounceOptions,
    equality: EqualityFn<T>,
    current: T,
    latest: T,
    pending: bool,
    window_deadline: Option<I>,
    max_wait_deadline: Option<I>,
}

impl<T, I> DebounceMachine<T, I>
where
    T: Clone,
    I: Copy + Ord + CheckedAdd,
{
    /// Creates an idle machine exposing `initial`, comparing inputs with `==`.
    pub fn new(initial: T, options: impl Into<DebounceOptions>) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_equality(initial, options, Arc::new(|a: &T, b: &T| a == b))
    }

    /// Creates an idle machine exposing `initial` with a custom equality check.
    pub fn with_equality(
        initial: T,
        options: impl Into<DebounceOptions>,
        equality: EqualityFn<T>,
    ) -> Self {
        Self {
            options: options.into(),
            equality,
            current: initial.clone(),
            latest: initial,
            pending: false,
            window_deadline: None,
            max_wait_deadline: None,
        }
    }

    /// Creates a machine whose first input is `first`, arriving at `now`.
    ///
    /// Used where there is no initial value to compare against, such as a
    /// stream whose first item has just arrived: the input is always treated
    /// as a change.
    pub fn from_first_input(
        first: T,
        now: I,
        options: impl Into<DebounceOptions>,
        equality: EqualityFn<T>,
    ) -> (Self, Outcome<T>) {
        let mut machine = Self::with_equality(first, options, equality);
        let outcome = machine.accept(now);
        (machine, outcome)
    }

    /// Feeds a new input arriving at `now`.
    pub fn on_input(&mut self, value: T, now: I) -> Outcome<T> {
        if (self.equality)(&self.latest, &value) {
            return Outcome::Unchanged;
        }

        self.latest = value;
        self.accept(now)
    }

    fn accept(&mut self, now: I) -> Outcome<T> {
        let window_open = self.window_deadline.is_some_and(|deadline| deadline > now);

        // Inputs arriving while a leading window is open are deferred; with
        // trailing off they are dropped when that window closes
        if self.options.leading && !window_open {
            self.window_deadline = now.checked_add(self.options.delay);
            self.max_wait_deadline = None;
            return Outcome::Applied(self.apply());
        }

        self.pending = true;
        // An unrepresentable deadline stays unarmed
        self.window_deadline = now.checked_add(self.options.delay);

        if let Some(max_wait) = self.options.max_wait {
            if self.max_wait_deadline.is_none() {
                self.max_wait_deadline = now.checked_add(max_wait);
            }
        }

        Outcome::Deferred
    }

    /// Processes every deadline that has passed at `now`.
    ///
    /// Returns the newly applied value, if any. At most one value is applied
    /// per call.
    pub fn advance(&mut self, now: I) -> Option<T> {
        let mut applied = None;

        if self.max_wait_deadline.is_some_and(|deadline| deadline <= now) {
            self.max_wait_deadline = None;
            if self.pending && self.options.applies_on_max_wait() {
                applied = Some(self.apply());
            }
        }

        if self.window_deadline.is_some_and(|deadline| deadline <= now) {
            self.window_deadline = None;
            self.max_wait_deadline = None;
            if self.pending {
                if self.options.trailing {
                    applied = Some(self.apply());
                } else {
                    debug!("debounce window closed, dropping pending value (trailing disabled)");
                    self.pending = false;
                }
            }
        }

        applied
    }

    /// The earliest armed deadline, if any.
    pub fn next_deadline(&self) -> Option<I> {
        match (self.window_deadline, self.max_wait_deadline) {
            (Some(window), Some(max_wait)) => Some(window.min(max_wait)),
            (window, max_wait) => window.or(max_wait),
        }
    }

    /// Applies the pending value immediately and disarms all deadlines.
    pub fn flush(&mut self) -> Option<T> {
        self.clear_deadlines();
        self.pending.then(|| self.apply())
    }

    /// Drops the pending value and disarms all deadlines.
    ///
    /// The debounced value is untouched. Returns whether a value was pending.
    pub fn cancel(&mut self) -> bool {
        self.clear_deadlines();
        core::mem::replace(&mut self.pending, false)
    }

    /// The debounced value.
    pub fn value(&self) -> &T {
        &self.current
    }

    /// The latest accepted input.
    pub fn latest(&self) -> &T {
        &self.latest
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether any deadline is armed.
    pub fn has_deadlines(&self) -> bool {
        self.window_deadline.is_some() || self.max_wait_deadline.is_some()
    }

    pub fn options(&self) -> &DebounceOptions {
        &self.options
    }

    /// Replaces the timing options. Armed deadlines keep their instants.
    pub fn set_options(&mut self, options: impl Into<DebounceOptions>) {
        self.options = options.into();
    }

    fn apply(&mut self) -> T {
        self.current = self.latest.clone();
        self.pending = false;
        self.current.clone()
    }

    fn clear_deadlines(&mut self) {
        self.window_deadline = None;
        self.max_wait_deadline = None;
    }
}

impl<T: fmt::Debug, I: fmt::Debug> fmt::Debug for DebounceMachine<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceMachine")
            .field("options", &self.options)
            .field("current", &self.current)
            .field("latest", &self.latest)
            .field("pending", &self.pending)
            .field("window_deadline", &self.window_deadline)
            .field("max_wait_deadline", &self.max_wait_deadline)
            .finish_non_exhaustive()
    }
}
