// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::wasm::helpers::{sleep_ms, test_channel, unwrap_stream};
use futures::StreamExt;
use settle_debounce::{DebounceOptions, DebounceValueExt};
use settle_runtime::impls::wasm::WasmTimer;
use std::time::Duration;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
async fn test_debounce_value_wasm_emits_last_of_burst() {
    // Arrange
    let (tx, rx) = test_channel();
    let mut debounced = rx.debounce_value_with_timer(Duration::from_millis(50), WasmTimer);

    // Act
    tx.unbounded_send("s").unwrap();
    tx.unbounded_send("se").unwrap();
    sleep_ms(10).await;
    tx.unbounded_send("sea").unwrap();

    // Assert
    assert_eq!(unwrap_stream(&mut debounced, 500).await, "sea");
}

#[wasm_bindgen_test]
async fn test_debounce_value_wasm_leading_edge_is_immediate() {
    // Arrange
    let (tx, rx) = test_channel();
    let options = DebounceOptions::new(Duration::from_secs(10)).with_leading(true);
    let mut debounced = rx.debounce_value_with_timer(options, WasmTimer);

    // Act
    tx.unbounded_send(1).unwrap();

    // Assert
    assert_eq!(unwrap_stream(&mut debounced, 500).await, 1);
}

#[wasm_bindgen_test]
async fn test_debounce_value_wasm_flushes_pending_on_source_end() {
    // Arrange
    let (tx, rx) = test_channel();
    let mut debounced = rx.debounce_value_with_timer(Duration::from_secs(10), WasmTimer);

    // Act
    tx.unbounded_send(7).unwrap();
    drop(tx);

    // Assert
    assert_eq!(debounced.collect::<Vec<_>>().await, vec![7]);
}
