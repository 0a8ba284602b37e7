// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber broadcast of plain values.
//!
//! A [`Subject`] hands each value to all subscribers that exist at send time.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers only see values sent after subscribing.
//! - **Unbounded**: backed by unbounded `async-channel` queues (no backpressure).
//! - **Cheap to clone**: all clones share the same subscriber list.
//!
//! ## Example
//!
//! ```
//! use settle_core::Subject;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = Subject::<i32>::new();
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.next(1).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(1));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::SettleError;
use async_channel::{Receiver, Sender};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use parking_lot::Mutex;
use std::sync::Arc;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<Sender<T>>,
}

/// Subscriber side of a [`Subject`]. Ends when the subject is closed or dropped.
pub struct SubjectStream<T> {
    rx: Pin<Box<Receiver<T>>>,
}

impl<T> Stream for SubjectStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.as_mut().poll_next(cx)
    }
}

/// A hot, unbounded subject that broadcasts values to all current subscribers.
pub struct Subject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe and receive every value sent from now on.
    ///
    /// # Errors
    /// Returns `SettleError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SettleError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SettleError::Closed);
        }

        let (tx, rx) = async_channel::unbounded();
        state.senders.push(tx);
        Ok(SubjectStream { rx: Box::pin(rx) })
    }

    /// Send a value to all active subscribers, pruning the ones that went away.
    ///
    /// # Errors
    /// Returns `SettleError::Closed` if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SettleError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SettleError::Closed);
        }

        state
            .senders
            .retain(|tx| tx.try_send(value.clone()).is_ok());
        Ok(())
    }

    /// Closes the subject, completing all subscriber streams. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers still attached.
    ///
    /// Dropped subscribers are only pruned on the next `next()` call.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
