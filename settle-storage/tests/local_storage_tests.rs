// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(not(target_arch = "wasm32"))]

use settle_core::SettleError;
use settle_storage::{LocalStorage, MemoryStorage, StorageArea, StorageBackend, StorageOptions};
use settle_test_utils::{
    person_alice, person_bob, FailingStorage, ListenerRecorder, Person,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn person_handle<B: StorageBackend>(backend: B) -> LocalStorage<Person, B> {
    LocalStorage::new("user", backend, StorageOptions::default())
}

#[test]
fn test_get_absent_key_returns_none() {
    // Arrange
    let user = person_handle(MemoryStorage::new());

    // Act & Assert
    assert_eq!(user.get(), None);
    assert_eq!(user.error(), None);
    assert_eq!(user.key(), "user");
}

#[test]
fn test_get_absent_key_returns_default_value() {
    // Arrange
    let user = LocalStorage::new(
        "user",
        MemoryStorage::new(),
        StorageOptions::default().with_default(person_alice()),
    );

    // Act & Assert
    assert_eq!(user.get(), Some(person_alice()));
}

#[test]
fn test_default_factory_runs_on_every_read() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let visits = LocalStorage::new(
        "visits",
        MemoryStorage::new(),
        StorageOptions::<u32>::default().with_default_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            7
        }),
    );

    // Act
    let first = visits.get();
    let second = visits.get();

    // Assert
    assert_eq!((first, second), (Some(7), Some(7)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_set_stores_json_and_notifies_listeners() -> anyhow::Result<()> {
    // Arrange
    let storage = MemoryStorage::new();
    let user = person_handle(storage.clone());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    user.set(Some(person_alice()))?;

    // Assert
    assert_eq!(user.get(), Some(person_alice()));
    assert_eq!(
        storage.get_item("user")?.as_deref(),
        Some(r#"{"name":"Alice","age":25}"#)
    );
    assert_eq!(recorder.values(), vec![Some(person_alice())]);
    Ok(())
}

#[test]
fn test_set_none_removes_key() -> anyhow::Result<()> {
    // Arrange
    let storage = MemoryStorage::new();
    let user = person_handle(storage.clone());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());
    user.set(Some(person_alice()))?;

    // Act
    user.set(None)?;

    // Assert
    assert_eq!(storage.get_item("user")?, None);
    assert_eq!(recorder.values(), vec![Some(person_alice()), None]);
    Ok(())
}

#[test]
fn test_decode_failure_records_error_and_returns_default() -> anyhow::Result<()> {
    // Arrange
    let storage = MemoryStorage::new();
    storage.set_item("user", "{broken")?;
    let user = LocalStorage::new(
        "user",
        storage,
        StorageOptions::default().with_default(person_bob()),
    );

    // Act
    let value = user.get();

    // Assert
    assert_eq!(value, Some(person_bob()));
    let error = user.error().ok_or_else(|| anyhow::anyhow!("expected an error"))?;
    assert!(matches!(error, SettleError::Deserialization { .. }));
    assert_eq!(error.key(), Some("user"));
    Ok(())
}

#[test]
fn test_read_failure_records_error_and_returns_default() {
    // Arrange
    let storage = FailingStorage::new();
    storage.fail_reads(true);
    let user = LocalStorage::new(
        "user",
        storage,
        StorageOptions::default().with_default(person_alice()),
    );

    // Act
    let value = user.get();

    // Assert
    assert_eq!(value, Some(person_alice()));
    assert_eq!(
        user.error(),
        Some(SettleError::storage_error("injected read failure"))
    );
}

#[test]
fn test_write_failure_is_recorded_and_skips_listeners() {
    // Arrange
    let storage = FailingStorage::new();
    let user = person_handle(storage.clone());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());
    storage.fail_writes(true);

    // Act
    let result = user.set(Some(person_alice()));

    // Assert
    assert!(result.is_err());
    assert_eq!(user.error(), result.err());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_successful_set_clears_recorded_error() -> anyhow::Result<()> {
    // Arrange
    let storage = FailingStorage::new();
    let user = person_handle(storage.clone());
    storage.fail_writes(true);
    let _ = user.set(Some(person_alice()));
    assert!(user.error().is_some());

    // Act
    storage.fail_writes(false);
    user.set(Some(person_bob()))?;

    // Assert
    assert_eq!(user.error(), None);
    Ok(())
}

#[test]
fn test_serializer_failure_is_a_serialization_error() {
    // Arrange
    let count = LocalStorage::new(
        "count",
        MemoryStorage::new(),
        StorageOptions::<u32>::default().with_serializer(|value: &u32| {
            if *value > 100 {
                Err("too large".into())
            } else {
                Ok(value.to_string())
            }
        }),
    );

    // Act
    let result = count.set(Some(500));

    // Assert
    assert_eq!(
        result,
        Err(SettleError::serialization_error("count", "too large"))
    );
    assert_eq!(count.get(), None);
}

#[test]
fn test_failing_listener_does_not_stop_fan_out() -> anyhow::Result<()> {
    // Arrange
    let user = person_handle(MemoryStorage::new());
    let before = ListenerRecorder::<Person>::new();
    let after = ListenerRecorder::<Person>::new();
    user.add_listener(before.listener());
    user.add_listener(|_value: Option<&Person>| Err(SettleError::listener_error("boom")));
    user.add_listener(after.listener());

    // Act
    user.set(Some(person_alice()))?;

    // Assert
    assert_eq!(before.count(), 1);
    assert_eq!(after.count(), 1);
    assert_eq!(user.error(), None);
    Ok(())
}

#[test]
fn test_remove_listener() -> anyhow::Result<()> {
    // Arrange
    let user = person_handle(MemoryStorage::new());
    let recorder = ListenerRecorder::<Person>::new();
    let id = user.add_listener(recorder.listener());

    // Act
    let removed = user.remove_listener(id);
    let removed_again = user.remove_listener(id);
    user.set(Some(person_alice()))?;

    // Assert
    assert!(removed);
    assert!(!removed_again);
    assert_eq!(user.listener_count(), 0);
    assert_eq!(recorder.count(), 0);
    Ok(())
}

#[test]
fn test_sync_event_from_other_tab_notifies_listeners() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let tab_a = person_handle(area.open_tab());
    let tab_b = person_handle(area.open_tab());
    let recorder_a = ListenerRecorder::<Person>::new();
    let recorder_b = ListenerRecorder::<Person>::new();
    tab_a.add_listener(recorder_a.listener());
    tab_b.add_listener(recorder_b.listener());

    // Act
    tab_a.set(Some(person_alice()))?;
    tab_a.set(None)?;

    // Assert
    assert_eq!(recorder_a.values(), vec![Some(person_alice()), None]);
    assert_eq!(recorder_b.values(), vec![Some(person_alice()), None]);
    assert_eq!(tab_b.get(), None);
    Ok(())
}

#[test]
fn test_sync_ignores_other_keys() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    area.open_tab().set_item("theme", "\"dark\"")?;

    // Assert
    assert_eq!(recorder.count(), 0);
    Ok(())
}

#[test]
fn test_sync_ignores_clear_events() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let other = area.open_tab();
    other.set_item("user", r#"{"name":"Bob","age":30}"#)?;
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    other.clear()?;

    // Assert
    assert_eq!(recorder.count(), 0);
    assert_eq!(user.get(), None);
    Ok(())
}

#[test]
fn test_sync_decode_failure_records_error() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    area.open_tab().set_item("user", "{broken")?;

    // Assert
    assert_eq!(recorder.count(), 0);
    assert!(matches!(
        user.error(),
        Some(SettleError::Deserialization { .. })
    ));

    // a later valid event clears it
    area.open_tab()
        .set_item("user", r#"{"name":"Alice","age":25}"#)?;
    assert_eq!(user.error(), None);
    assert_eq!(recorder.values(), vec![Some(person_alice())]);
    Ok(())
}

#[test]
fn test_storage_sync_disabled_ignores_other_tabs() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let user = LocalStorage::new(
        "user",
        area.open_tab(),
        StorageOptions::<Person>::default().with_storage_sync(false),
    );
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    person_handle(area.open_tab()).set(Some(person_alice()))?;

    // Assert
    assert!(!user.is_synced());
    assert_eq!(recorder.count(), 0);
    assert_eq!(user.get(), Some(person_alice()));
    Ok(())
}

#[test]
fn test_dropping_handle_unsubscribes() {
    // Arrange
    let area = StorageArea::new();
    let user = person_handle(area.open_tab());
    assert_eq!(area.watcher_count(), 1);

    // Act
    drop(user);

    // Assert
    assert_eq!(area.watcher_count(), 0);
}

#[test]
fn test_handle_is_usable_across_threads() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let user = Arc::new(person_handle(area.open_tab()));
    let writer = Arc::clone(&user);

    // Act
    std::thread::spawn(move || writer.set(Some(person_bob())))
        .join()
        .map_err(|_| anyhow::anyhow!("writer thread panicked"))??;

    // Assert
    assert_eq!(user.get(), Some(person_bob()));
    Ok(())
}

#[test]
fn test_listeners_survive_key_change() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());
    user.set(Some(person_alice()))?;

    // Act
    user.set_key("admin");
    user.set(Some(person_bob()))?;

    // Assert
    assert_eq!(user.key(), "admin");
    assert_eq!(user.get(), Some(person_bob()));
    assert_eq!(
        recorder.values(),
        vec![Some(person_alice()), Some(person_bob())]
    );
    assert_eq!(
        area.open_tab().get_item("user")?.as_deref(),
        Some(r#"{"name":"Alice","age":25}"#)
    );
    Ok(())
}

#[test]
fn test_sync_follows_key_change() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let other = area.open_tab();
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act
    user.set_key("admin");
    other.set_item("user", r#"{"name":"Alice","age":25}"#)?;
    other.set_item("admin", r#"{"name":"Bob","age":30}"#)?;

    // Assert
    assert!(user.is_synced());
    assert_eq!(recorder.values(), vec![Some(person_bob())]);
    Ok(())
}

#[test]
fn test_set_options_swaps_codec_and_default() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let name = LocalStorage::new("name", area.open_tab(), StorageOptions::<String>::default());
    let recorder = ListenerRecorder::<String>::new();
    name.add_listener(recorder.listener());

    // Act
    name.set_options(
        StorageOptions::with_codec(
            |value: &String| Ok(value.to_uppercase()),
            |raw: &str| Ok(raw.to_lowercase()),
        )
        .with_default("nobody".to_string()),
    );
    let before_write = name.get();
    name.set(Some("alice".to_string()))?;

    // Assert
    assert_eq!(before_write.as_deref(), Some("nobody"));
    assert_eq!(area.open_tab().get_item("name")?.as_deref(), Some("ALICE"));
    assert_eq!(name.get().as_deref(), Some("alice"));
    assert_eq!(recorder.values(), vec![Some("alice".to_string())]);
    Ok(())
}

#[test]
fn test_set_options_toggles_sync() -> anyhow::Result<()> {
    // Arrange
    let area = StorageArea::new();
    let other = area.open_tab();
    let user = person_handle(area.open_tab());
    let recorder = ListenerRecorder::<Person>::new();
    user.add_listener(recorder.listener());

    // Act & Assert
    user.set_options(StorageOptions::default().with_storage_sync(false));
    assert!(!user.is_synced());
    assert_eq!(area.watcher_count(), 0);
    other.set_item("user", r#"{"name":"Alice","age":25}"#)?;
    assert_eq!(recorder.count(), 0);

    user.set_options(StorageOptions::default());
    assert!(user.is_synced());
    assert_eq!(area.watcher_count(), 1);
    other.set_item("user", r#"{"name":"Bob","age":30}"#)?;
    assert_eq!(recorder.values(), vec![Some(person_bob())]);
    Ok(())
}
