// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Shared building blocks for the settle utilities.
//!
//! - [`SettleError`] - root error type used by every settle crate
//! - [`CancellationToken`] / [`SettleTask`] - runtime-agnostic background tasks
//! - [`Subject`] - hot broadcast of values to any number of stream subscribers
//! - logging shim macros (`error!`, `warn!`, `debug!`) backed by `tracing`

pub mod cancellation_token;
pub mod error;
pub mod logging;
pub mod maybe_send;
pub mod settle_task;
pub mod subject;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{Result, ResultExt, SettleError};
pub use self::maybe_send::{MaybeSend, MaybeSync};
pub use self::settle_task::SettleTask;
pub use self::subject::{Subject, SubjectStream};

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "tracing")]
    pub use tracing;
}
