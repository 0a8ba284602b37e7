// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod debounce_value_tests;

// The driver task goes through `smol::spawn` only when tokio is off
#[cfg(not(feature = "runtime-tokio"))]
pub mod debouncer_tests;
