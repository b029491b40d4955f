// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse::prelude::*;
use pulse::{compose, Adapter, TokioTimer};
use pulse_test_utils::{Counted, ManualProducer, Notification, RecordingConsumer};
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

fn doubled<P>(source: P) -> impl Producer<i32>
where
    P: Producer<i32> + 'static,
{
    compose(source, |source: &P, destination: &Subscriber<i32>| {
        let out = destination.clone();
        Adapter::builder(destination, move |v: i32| {
            out.next(v * 2);
            Ok(())
        })
        .subscribe_to(source)?;
        Ok(())
    })
}

#[tokio::test]
async fn test_timer_gates_release_in_deadline_order() -> anyhow::Result<()> {
    // Arrange
    pause();
    let source = ManualProducer::<u64>::new();
    let recorder = RecordingConsumer::new();
    source
        .clone()
        .timed_gate(|ms: &u64, _| Ok(timer(Duration::from_millis(*ms), TokioTimer)))
        .subscribe(recorder.shared())?;

    // Act
    source.emit(30);
    source.emit(10);
    source.finish();
    settle().await;
    advance(Duration::from_millis(10) + TICK).await;
    settle().await;
    let after_fast = recorder.events();
    advance(Duration::from_millis(20)).await;
    settle().await;

    // Assert
    assert_eq!(after_fast, [Notification::Next(10)]);
    assert_eq!(
        recorder.events(),
        [
            Notification::Next(10),
            Notification::Next(30),
            Notification::Complete
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_start_signal_timer_defers_source_subscription() -> anyhow::Result<()> {
    // Arrange
    pause();
    let source = Counted::new(of(vec![1, 2]));
    let recorder = RecordingConsumer::new();
    source
        .clone()
        .timed_gate_with_start(
            |_: &i32, _| Ok(empty::<()>()),
            timer(Duration::from_millis(100), TokioTimer),
        )
        .subscribe(recorder.shared())?;
    settle().await;
    let subscribed_early = source.subscription_count();

    // Act
    advance(Duration::from_millis(100) + TICK).await;
    settle().await;

    // Assert
    assert_eq!(subscribed_early, 0);
    assert_eq!(source.subscription_count(), 1);
    assert_eq!(
        recorder.events(),
        [
            Notification::Next(1),
            Notification::Next(2),
            Notification::Complete
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_unsubscribing_pipeline_stops_pending_timers() -> anyhow::Result<()> {
    // Arrange
    pause();
    let source = ManualProducer::<i32>::new();
    let recorder = RecordingConsumer::new();
    let teardown = doubled(source.clone())
        .delay(Duration::from_millis(50), TokioTimer)
        .subscribe(recorder.shared())?;
    source.emit(1);
    settle().await;

    // Act
    teardown.unsubscribe();
    advance(Duration::from_millis(100)).await;
    settle().await;

    // Assert
    assert!(recorder.is_empty());
    assert_eq!(source.active_count(), 0);
    Ok(())
}

#[test]
fn test_custom_stage_chains_with_timed_gate() -> anyhow::Result<()> {
    // Arrange
    let gate = ManualProducer::<()>::new();
    let selector_gate = gate.clone();
    let recorder = RecordingConsumer::new();

    // Act
    of(vec![1, 2, 3])
        .pipe(doubled)
        .timed_gate(move |_: &i32, _| Ok(selector_gate.clone()))
        .take_first()
        .subscribe(recorder.shared())?;
    gate.emit(());

    // Assert
    assert_eq!(
        recorder.events(),
        [Notification::Next(2), Notification::Complete]
    );
    assert_eq!(gate.active_count(), 0);
    Ok(())
}
