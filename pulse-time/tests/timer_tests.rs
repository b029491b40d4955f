// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::Producer;
use pulse_test_utils::{Notification, RecordingConsumer};
use pulse_time::{timer, TokioTimer};
use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::{advance, pause};

/// tokio rounds sleep deadlines up to the next millisecond tick.
const TICK: Duration = Duration::from_millis(1);

async fn settle() {
    for _ in 0..4 {
        yield_now().await;
    }
}

#[tokio::test]
async fn test_timer_emits_once_after_duration() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = RecordingConsumer::new();
    let teardown = timer(Duration::from_millis(100), TokioTimer).subscribe(recorder.shared())?;
    settle().await;

    // Act
    advance(Duration::from_millis(99)).await;
    settle().await;
    let early = recorder.is_empty();
    advance(Duration::from_millis(1) + TICK).await;
    settle().await;

    // Assert
    assert!(early);
    assert_eq!(
        recorder.events(),
        [Notification::Next(0), Notification::Complete]
    );
    assert!(teardown.is_closed());
    Ok(())
}

#[tokio::test]
async fn test_unsubscribing_cancels_pending_timer() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = RecordingConsumer::<u64>::new();
    let teardown = timer(Duration::from_millis(50), TokioTimer).subscribe(recorder.shared())?;
    settle().await;

    // Act
    teardown.unsubscribe();
    advance(Duration::from_millis(100)).await;
    settle().await;

    // Assert
    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_each_subscription_runs_its_own_timer() -> anyhow::Result<()> {
    // Arrange
    pause();
    let one_shot = timer(Duration::from_millis(30), TokioTimer);
    let first = RecordingConsumer::new();
    let second = RecordingConsumer::new();
    one_shot.subscribe(first.shared())?;
    advance(Duration::from_millis(20)).await;
    one_shot.subscribe(second.shared())?;
    settle().await;

    // Act
    advance(Duration::from_millis(10)).await;
    settle().await;
    let second_early = second.is_empty();
    advance(Duration::from_millis(20) + TICK).await;
    settle().await;

    // Assert
    assert_eq!(first.values(), [0]);
    assert!(second_early);
    assert_eq!(second.values(), [0]);
    Ok(())
}
