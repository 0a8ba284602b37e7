// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::smol::helpers::{next_within, test_channel};
use settle_debounce::{DebounceOptions, DebounceValueExt};
use settle_runtime::impls::smol::SmolTimer;
use std::time::Duration;

#[test]
fn test_debounce_value_smol_multi_threaded() -> anyhow::Result<()> {
    let executor = smol::Executor::new();
    futures::executor::block_on(executor.run(async {
        // Arrange
        let (tx, rx) = test_channel();
        let mut debounced = rx.debounce_value_with_timer(Duration::from_millis(50), SmolTimer);

        // Act
        executor
            .spawn(async move {
                for value in 0..5_u32 {
                    let _ = tx.unbounded_send(value);
                    smol::Timer::after(Duration::from_millis(5)).await;
                }
                smol::Timer::after(Duration::from_secs(5)).await;
            })
            .detach();

        // Assert
        assert_eq!(next_within(&mut debounced, 2_000).await?, 4);

        Ok(())
    }))
}

#[test]
fn test_debounce_value_smol_max_wait_emits_during_burst() -> anyhow::Result<()> {
    let executor = smol::Executor::new();
    futures::executor::block_on(executor.run(async {
        // Arrange
        let (tx, rx) = test_channel();
        let options = DebounceOptions::new(Duration::from_millis(100))
            .with_max_wait(Duration::from_millis(150));
        let mut debounced = rx.debounce_value_with_timer(options, SmolTimer);
        let last = 40_u32;

        // Act
        executor
            .spawn(async move {
                for value in 0..=last {
                    let _ = tx.unbounded_send(value);
                    smol::Timer::after(Duration::from_millis(20)).await;
                }
                smol::Timer::after(Duration::from_secs(5)).await;
            })
            .detach();

        // Assert
        let first = next_within(&mut debounced, 2_000).await?;
        assert!(first < last, "expected an emission before the burst ended, got {first}");

        Ok(())
    }))
}
