// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Consumer, Subscriber};
use pulse_test_utils::{test_error, Notification, RecordingConsumer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[test]
fn test_subscriber_forwards_values_then_completion() {
    // Arrange
    let recorder = RecordingConsumer::new();
    let subscriber = Subscriber::new(recorder.shared());

    // Act
    subscriber.next(1);
    subscriber.next(2);
    subscriber.complete();

    // Assert
    assert_eq!(
        recorder.events(),
        [
            Notification::Next(1),
            Notification::Next(2),
            Notification::Complete
        ]
    );
    assert!(subscriber.is_closed());
    assert!(subscriber.teardown().is_closed());
}

#[test]
fn test_subscriber_ignores_signals_after_error() {
    // Arrange
    let recorder = RecordingConsumer::new();
    let subscriber = Subscriber::new(recorder.shared());

    // Act
    subscriber.error(test_error("boom"));
    subscriber.next(1);
    subscriber.complete();
    subscriber.error(test_error("again"));

    // Assert
    assert_eq!(recorder.events(), [Notification::Error(test_error("boom"))]);
}

#[test]
fn test_subscriber_ignores_signals_after_complete() {
    let recorder = RecordingConsumer::new();
    let subscriber = Subscriber::new(recorder.shared());

    subscriber.complete();
    subscriber.error(test_error("late"));
    subscriber.next(5);

    assert_eq!(recorder.events(), [Notification::Complete]);
}

#[test]
fn test_unsubscribed_subscriber_is_silent() {
    // Arrange
    let recorder = RecordingConsumer::<i32>::new();
    let subscriber = Subscriber::new(recorder.shared());

    // Act
    subscriber.unsubscribe();
    subscriber.next(1);
    subscriber.complete();

    // Assert
    assert!(recorder.is_empty());
}

#[test]
fn test_terminal_signal_tears_down_children() {
    // Arrange
    let recorder = RecordingConsumer::<i32>::new();
    let subscriber = Subscriber::new(recorder.shared());
    let released = Arc::new(AtomicBool::new(false));
    let flag = released.clone();
    subscriber.add_fn(move || flag.store(true, Ordering::SeqCst));

    // Act
    subscriber.complete();

    // Assert
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_reentrant_complete_from_destination_delivers_once() {
    // Arrange
    let recorder = RecordingConsumer::<i32>::new();
    let slot: Arc<parking_lot::Mutex<Option<Subscriber<i32>>>> = Arc::default();
    let reentry = slot.clone();
    let inner = recorder.clone();
    let destination = pulse_core::CallbackConsumer::new(move |v: i32| inner.next(v)).on_complete({
        let recorder = recorder.clone();
        move || {
            recorder.complete();
            if let Some(subscriber) = reentry.lock().clone() {
                subscriber.complete();
            }
        }
    });
    let subscriber = Subscriber::new(Arc::new(destination));
    *slot.lock() = Some(subscriber.clone());

    // Act
    subscriber.complete();

    // Assert
    assert_eq!(recorder.terminal_count(), 1);
    slot.lock().take();
}

#[test]
fn test_subscriber_reports_closed_once_destination_closes() {
    // Arrange
    let recorder = RecordingConsumer::<i32>::new();
    let downstream = Subscriber::new(recorder.shared());
    let upstream = Subscriber::new(Arc::new(downstream.clone()));

    // Act
    downstream.unsubscribe();
    upstream.next(1);

    // Assert
    assert!(upstream.is_closed());
    assert!(recorder.is_empty());
}
