// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value debouncing with leading, trailing and max-wait semantics.
//!
//! # Overview
//!
//! - **[`DebounceOptions`]** - delay, max-wait bound and edge selection
//! - **[`DebounceMachine`]** - the timer-free state machine every other piece drives
//! - **[`Debouncer`]** - owned handle that debounces a changing value on a runtime
//! - **[`DebounceValueExt`]** - `.debounce_value(options)` operator for plain streams
//!
//! # Runtime Support
//!
//! Enable runtime-specific features in your `Cargo.toml`:
//! - `runtime-tokio` (default) - Tokio timers and `tokio::spawn`
//! - `runtime-smol` - smol timers and `smol::spawn`
//! - `runtime-wasm` - browser timers and `spawn_local`
//!
//! # Example
//!
//! ```rust
//! use settle_debounce::prelude::*;
//! use settle_runtime::impls::tokio::TokioRuntime;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let options = DebounceOptions::new(Duration::from_millis(200))
//!     .with_max_wait(Duration::from_millis(500));
//! let position = Debouncer::<(i32, i32), TokioRuntime>::new((0, 0), options);
//!
//! position.set((10, 4));
//! tokio::time::sleep(Duration::from_millis(200)).await;
//! assert_eq!(position.value(), (10, 4));
//! # }
//! ```

mod debounce_value;
mod debouncer;
pub mod machine;
mod options;
pub mod prelude;

pub use debounce_value::DebounceValueExt;
pub use debouncer::Debouncer;
pub use machine::{DebounceMachine, EqualityFn, Outcome};
pub use options::DebounceOptions;

/// [`Debouncer`] on the runtime selected by cargo features.
#[cfg(any(
    feature = "runtime-tokio",
    feature = "runtime-smol",
    feature = "runtime-wasm"
))]
pub type DefaultDebouncer<T> = Debouncer<T, settle_runtime::DefaultRuntime>;
