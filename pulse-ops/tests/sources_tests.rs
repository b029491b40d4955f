// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Producer, PulseError};
use pulse_ops::{defer, empty, from_iter, never, of, throw_error, Empty};
use pulse_test_utils::{test_error, Notification, RecordingConsumer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_of_emits_values_then_completes() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingConsumer::new();

    // Act
    let teardown = of(vec!["a", "b"]).subscribe(recorder.shared())?;

    // Assert
    assert_eq!(
        recorder.events(),
        [
            Notification::Next("a"),
            Notification::Next("b"),
            Notification::Complete
        ]
    );
    assert!(teardown.is_closed());
    Ok(())
}

#[test]
fn test_from_iter_replays_for_every_subscription() -> anyhow::Result<()> {
    // Arrange
    let numbers = from_iter(1..4);
    let first = RecordingConsumer::new();
    let second = RecordingConsumer::new();

    // Act
    numbers.subscribe(first.shared())?;
    numbers.subscribe(second.shared())?;

    // Assert
    assert_eq!(first.values(), [1, 2, 3]);
    assert_eq!(second.values(), [1, 2, 3]);
    assert!(second.is_completed());
    Ok(())
}

#[test]
fn test_empty_only_completes() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingConsumer::<u8>::new();

    // Act
    empty().subscribe(recorder.shared())?;

    // Assert
    assert_eq!(recorder.events(), [Notification::Complete]);
    Ok(())
}

#[test]
fn test_never_stays_open_until_unsubscribed() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingConsumer::<u8>::new();

    // Act
    let teardown = never().subscribe(recorder.shared())?;

    // Assert
    assert!(recorder.is_empty());
    assert!(!teardown.is_closed());
    teardown.unsubscribe();
    assert!(teardown.is_closed());
    assert!(recorder.is_empty());
    Ok(())
}

#[test]
fn test_throw_error_delivers_error_immediately() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingConsumer::<u8>::new();

    // Act
    throw_error(test_error("boom")).subscribe(recorder.shared())?;

    // Assert
    assert_eq!(recorder.events(), [Notification::Error(test_error("boom"))]);
    Ok(())
}

#[test]
fn test_defer_builds_fresh_producer_per_subscription() -> anyhow::Result<()> {
    // Arrange
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let deferred = defer(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(of(vec![n]))
    });
    let first = RecordingConsumer::new();
    let second = RecordingConsumer::new();

    // Act
    deferred.subscribe(first.shared())?;
    deferred.subscribe(second.shared())?;

    // Assert
    assert_eq!(builds.load(Ordering::SeqCst), 2);
    assert_eq!(first.values(), [0]);
    assert_eq!(second.values(), [1]);
    Ok(())
}

#[test]
fn test_defer_factory_error_is_returned_from_subscribe() {
    // Arrange
    let deferred =
        defer(|| Err::<Empty<i32>, _>(PulseError::subscription_error("factory refused")));
    let recorder = RecordingConsumer::<i32>::new();

    // Act
    let result = deferred.subscribe(recorder.shared());

    // Assert
    assert!(matches!(result, Err(PulseError::SubscriptionError { .. })));
    assert!(recorder.is_empty());
}
