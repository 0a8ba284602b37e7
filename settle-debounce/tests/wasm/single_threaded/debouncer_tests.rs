// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::wasm::helpers::{sleep_ms, unwrap_stream};
use futures::StreamExt;
use settle_debounce::{Debouncer, Outcome};
use settle_runtime::impls::wasm::WasmRuntime;
use wasm_bindgen_test::*;

type WasmDebouncer<T> = Debouncer<T, WasmRuntime>;

#[wasm_bindgen_test]
async fn test_wasm_debouncer_applies_after_delay() {
    // Arrange
    let debouncer = WasmDebouncer::new(0, 50_u64);

    // Act
    let outcome = debouncer.set(3);

    // Assert
    assert_eq!(outcome, Outcome::Deferred);
    assert_eq!(debouncer.value(), 0);

    sleep_ms(80).await;
    assert_eq!(debouncer.value(), 3);
    assert!(!debouncer.is_pending());
}

#[wasm_bindgen_test]
async fn test_wasm_debouncer_driver_publishes_applied_values() {
    // Arrange
    let debouncer = WasmDebouncer::new(0, 30_u64);
    let mut applied = debouncer.subscribe().unwrap();

    // Act
    debouncer.set(1);
    debouncer.set(2);

    // Assert
    assert_eq!(unwrap_stream(&mut applied, 500).await, 2);
}

#[wasm_bindgen_test]
async fn test_wasm_debouncer_drop_ends_subscription() {
    // Arrange
    let debouncer = WasmDebouncer::new(0, 30_u64);
    let mut applied = debouncer.subscribe().unwrap();

    // Act
    drop(debouncer);

    // Assert
    assert_eq!(applied.next().await, None);
}
