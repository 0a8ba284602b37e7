// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::smol::helpers::{ended_within, next_within, test_channel};
use settle_debounce::{DebounceOptions, DebounceValueExt};
use settle_runtime::impls::smol::SmolTimer;
use settle_test_utils::{person_alice, person_bob, person_charlie};
use std::time::{Duration, Instant};

#[test]
fn test_debounce_value_smol_emits_last_of_burst() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = test_channel();
        let mut debounced = rx.debounce_value_with_timer(Duration::from_millis(50), SmolTimer);
        let start = Instant::now();

        // Act
        tx.unbounded_send(person_alice())?;
        tx.unbounded_send(person_bob())?;
        smol::Timer::after(Duration::from_millis(10)).await;
        tx.unbounded_send(person_charlie())?;

        // Assert
        assert_eq!(next_within(&mut debounced, 1_000).await?, person_charlie());
        assert!(start.elapsed() >= Duration::from_millis(50));

        Ok(())
    })
}

#[test]
fn test_debounce_value_smol_leading_edge_is_immediate() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = test_channel();
        let options = DebounceOptions::new(Duration::from_secs(10)).with_leading(true);
        let mut debounced = rx.debounce_value_with_timer(options, SmolTimer);

        // Act
        tx.unbounded_send(person_alice())?;

        // Assert
        assert_eq!(next_within(&mut debounced, 1_000).await?, person_alice());

        Ok(())
    })
}

#[test]
fn test_debounce_value_smol_flushes_pending_on_source_end() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = test_channel();
        let mut debounced = rx.debounce_value_with_timer(Duration::from_secs(10), SmolTimer);

        // Act
        tx.unbounded_send(person_bob())?;
        drop(tx);

        // Assert
        assert_eq!(next_within(&mut debounced, 1_000).await?, person_bob());
        ended_within(&mut debounced, 1_000).await?;

        Ok(())
    })
}
