// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::smol::helpers::{ended_within, next_within};
use settle_debounce::{DebounceOptions, Debouncer, Outcome};
use settle_runtime::impls::smol::SmolRuntime;
use settle_test_utils::{person_alice, person_bob, person_charlie};
use std::time::Duration;

type SmolDebouncer<T> = Debouncer<T, SmolRuntime>;

#[test]
fn test_smol_debouncer_applies_after_delay() {
    smol::block_on(async {
        // Arrange
        let debouncer = SmolDebouncer::new(person_alice(), 50_u64);

        // Act
        let outcome = debouncer.set(person_bob());

        // Assert
        assert_eq!(outcome, Outcome::Deferred);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.value(), person_alice());

        smol::Timer::after(Duration::from_millis(80)).await;
        assert_eq!(debouncer.value(), person_bob());
        assert!(!debouncer.is_pending());
    });
}

#[test]
fn test_smol_debouncer_driver_publishes_without_reads() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let debouncer = SmolDebouncer::new(person_alice(), 30_u64);
        let mut applied = debouncer.subscribe()?;

        // Act
        debouncer.set(person_bob());
        debouncer.set(person_charlie());

        // Assert
        assert_eq!(next_within(&mut applied, 1_000).await?, person_charlie());

        Ok(())
    })
}

#[test]
fn test_smol_debouncer_leading_edge() {
    smol::block_on(async {
        // Arrange
        let options = DebounceOptions::new(Duration::from_secs(10))
            .with_leading(true)
            .with_trailing(false);
        let debouncer = SmolDebouncer::new(0, options);

        // Act
        let first = debouncer.set(1);
        let second = debouncer.set(2);

        // Assert
        assert_eq!(first, Outcome::Applied(1));
        assert_eq!(second, Outcome::Deferred);
        assert_eq!(debouncer.value(), 1);
    });
}

#[test]
fn test_smol_debouncer_drop_ends_subscription() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let debouncer = SmolDebouncer::new(person_alice(), 30_u64);
        let mut applied = debouncer.subscribe()?;

        // Act
        drop(debouncer);

        // Assert
        ended_within(&mut applied, 1_000).await?;

        Ok(())
    })
}
