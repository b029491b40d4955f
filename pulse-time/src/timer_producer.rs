// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot timer producer.

use crate::timer::Timer;
use crate::CancellationToken;
use core::time::Duration;
use futures::future::{select, Either};
use pulse_core::{Consumer, Producer, Result, SharedConsumer, Subscriber, Teardown};

/// Producer returned by [`timer`].
#[derive(Clone, Debug)]
pub struct TimerProducer<TM> {
    duration: Duration,
    timer: TM,
}

impl<TM> TimerProducer<TM> {
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<TM: Timer> Producer<u64> for TimerProducer<TM> {
    fn subscribe(&self, consumer: SharedConsumer<u64>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        let token = CancellationToken::new();

        let cancel = token.clone();
        subscriber.add_fn(move || cancel.cancel());

        let sleep = self.timer.sleep_future(self.duration);
        let fire = subscriber.clone();
        self.timer.spawn(async move {
            let cancelled = token.cancelled();
            futures::pin_mut!(sleep);
            futures::pin_mut!(cancelled);
            match select(sleep, cancelled).await {
                Either::Left(((), _)) => {
                    fire.next(0);
                    fire.complete();
                }
                Either::Right(((), _)) => trace!("timer cancelled before firing"),
            }
        });

        Ok(subscriber.teardown().clone())
    }
}

/// Emits `0` once `duration` has elapsed, then completes.
///
/// Every subscription starts its own sleep on `timer`. Unsubscribing before
/// the deadline cancels the sleeping task, and nothing is emitted.
pub fn timer<TM: Timer>(duration: Duration, timer: TM) -> TimerProducer<TM> {
    TimerProducer { duration, timer }
}
