// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Host timer facility for the settle utilities.
//!
//! [`timer::Timer`] is the only thing the debounce state machine needs from its
//! environment: a sleep future and a monotonic clock. [`runtime::Runtime`]
//! bundles a timer with the matching instant and mutex types so handles can be
//! generic over one parameter.

pub mod impls;
pub mod mutex;
pub mod runtime;
pub mod timer;

#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = impls::tokio::TokioRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = impls::smol::SmolRuntime;

#[cfg(all(
    feature = "runtime-wasm",
    not(feature = "runtime-tokio"),
    not(feature = "runtime-smol")
))]
pub type DefaultRuntime = impls::wasm::WasmRuntime;
