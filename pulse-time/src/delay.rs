// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delay stages built on the timed gate.

use crate::timer::Timer;
use crate::timer_producer::timer;
use core::time::Duration;
use pulse_core::{Producer, SharedProducer};
use pulse_ops::TimedGate;

/// Extension trait providing time-based delays for any [`Producer`].
///
/// Both methods gate every value on a one-shot [`timer`](crate::timer).
/// Errors are not delayed, and completion is delivered once the last delayed
/// value has been emitted.
pub trait DelayExt<T>: Producer<T> + Sized
where
    T: Send + 'static,
{
    /// Delays each value by `duration`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use pulse_ops::of;
    /// use pulse_time::{DelayExt, TokioTimer};
    /// use pulse_ops::ProducerExt;
    /// use std::time::Duration;
    ///
    /// # async fn example() {
    /// let delayed = of(vec![1, 2, 3]).delay(Duration::from_millis(100), TokioTimer);
    /// delayed.subscribe_with(|v| println!("{v}")).unwrap();
    /// # }
    /// ```
    fn delay<TM: Timer>(self, duration: Duration, timer: TM) -> SharedProducer<T>
    where
        Self: 'static;

    /// Delays each value by the duration `duration_of(&value)` returns.
    ///
    /// A value with a shorter delay overtakes earlier values still waiting.
    fn delay_by<TM, D>(self, duration_of: D, timer: TM) -> SharedProducer<T>
    where
        Self: 'static,
        TM: Timer,
        D: Fn(&T) -> Duration + Send + Sync + 'static;
}

impl<P, T> DelayExt<T> for P
where
    P: Producer<T>,
    T: Send + 'static,
{
    fn delay<TM: Timer>(self, duration: Duration, tm: TM) -> SharedProducer<T>
    where
        Self: 'static,
    {
        TimedGate::new(move |_: &T, _| Ok(timer(duration, tm.clone()))).apply(self)
    }

    fn delay_by<TM, D>(self, duration_of: D, tm: TM) -> SharedProducer<T>
    where
        Self: 'static,
        TM: Timer,
        D: Fn(&T) -> Duration + Send + Sync + 'static,
    {
        TimedGate::new(move |value: &T, _| Ok(timer(duration_of(value), tm.clone()))).apply(self)
    }
}
