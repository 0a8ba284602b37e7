// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the settle workspace.
//!
//! This crate is for development and testing only.
//!
//! - [`person`] - a serde-enabled `Person` fixture with ready-made values
//! - [`helpers`] - timed stream assertions for paused-clock tests
//! - [`test_channel`] - an unbounded channel exposed as a stream
//! - [`FailingStorage`] - a storage backend whose reads and writes can be made to fail
//! - [`ListenerRecorder`] - collects the values a storage listener was called with
//!
//! # Example
//!
//! ```rust
//! use settle_test_utils::{assert_no_element_emitted, test_channel};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (_tx, mut stream) = test_channel::<i32>();
//! assert_no_element_emitted(&mut stream, 10).await;
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod failing_storage;
pub mod helpers;
pub mod listener_recorder;
pub mod person;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use failing_storage::FailingStorage;
pub use helpers::{assert_no_element_emitted, assert_pending, assert_stream_ended, unwrap_stream};
pub use listener_recorder::ListenerRecorder;
pub use person::{person_alice, person_bob, person_charlie, person_diane, Person};

/// Creates an unbounded channel whose receiving side is a stream.
///
/// Lets a test push values imperatively into an operator that consumes a
/// stream.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
