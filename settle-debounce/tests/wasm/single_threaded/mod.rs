// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod debounce_value_tests;

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
pub mod debouncer_tests;
