// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Method-call syntax for the stages of this crate.

use crate::TimedGate;
use pulse_core::{CallbackConsumer, Producer, Result, SharedProducer, Teardown};
use std::sync::Arc;

/// Extension trait chaining stages onto any [`Producer`].
///
/// # Example
///
/// ```
/// use pulse_core::Producer;
/// use pulse_ops::{empty, of, ProducerExt};
/// use pulse_test_utils::RecordingConsumer;
///
/// let recorder = RecordingConsumer::new();
/// of(vec![1, 2, 3])
///     .timed_gate(|_: &i32, _| Ok(empty::<()>()))
///     .take_first()
///     .subscribe(recorder.shared())
///     .unwrap();
///
/// assert_eq!(recorder.values(), [1]);
/// ```
pub trait ProducerExt<T>: Producer<T> + Sized {
    /// Subscribes a consumer that only handles values.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Producer::subscribe`].
    fn subscribe_with(&self, on_next: impl Fn(T) + Send + Sync + 'static) -> Result<Teardown>
    where
        T: 'static;

    /// Erases the concrete producer type.
    fn shared(self) -> SharedProducer<T>
    where
        Self: 'static;

    /// Applies `stage` to this producer.
    fn pipe<P>(self, stage: impl FnOnce(Self) -> P) -> P;

    /// See [`take_first`](crate::take_first).
    fn take_first(self) -> impl Producer<T>
    where
        T: Send + 'static;

    /// See [`discard_values`](crate::discard_values).
    fn discard_values<U: 'static>(self) -> impl Producer<U>
    where
        T: 'static;

    /// Continues with `next` once this producer completes. See [`sequence`](crate::sequence).
    fn then<B>(self, next: B) -> impl Producer<T>
    where
        T: Send + 'static,
        B: Producer<T> + 'static;

    /// Gates every value on the producer `duration_selector` returns for it.
    ///
    /// See [`timed_gate`](crate::timed_gate) for the full semantics.
    fn timed_gate<F, G, V>(self, duration_selector: F) -> SharedProducer<T>
    where
        Self: 'static,
        T: Send + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static;

    /// Like [`timed_gate`](Self::timed_gate), but subscribes to this producer
    /// only once `start_signal` emits or completes.
    fn timed_gate_with_start<F, G, V, S, W>(
        self,
        duration_selector: F,
        start_signal: S,
    ) -> SharedProducer<T>
    where
        Self: 'static,
        T: Send + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static,
        S: Producer<W> + 'static,
        W: Send + 'static;
}

impl<T, P> ProducerExt<T> for P
where
    P: Producer<T>,
{
    fn subscribe_with(&self, on_next: impl Fn(T) + Send + Sync + 'static) -> Result<Teardown>
    where
        T: 'static,
    {
        self.subscribe(Arc::new(CallbackConsumer::new(on_next)))
    }

    fn shared(self) -> SharedProducer<T>
    where
        Self: 'static,
    {
        Arc::new(self)
    }

    fn pipe<Q>(self, stage: impl FnOnce(Self) -> Q) -> Q {
        stage(self)
    }

    fn take_first(self) -> impl Producer<T>
    where
        T: Send + 'static,
    {
        crate::take_first::<T, _>(self)
    }

    fn discard_values<U: 'static>(self) -> impl Producer<U>
    where
        T: 'static,
    {
        crate::discard_values::<T, U, _>(self)
    }

    fn then<B>(self, next: B) -> impl Producer<T>
    where
        T: Send + 'static,
        B: Producer<T> + 'static,
    {
        crate::sequence(self, next)
    }

    fn timed_gate<F, G, V>(self, duration_selector: F) -> SharedProducer<T>
    where
        Self: 'static,
        T: Send + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static,
    {
        TimedGate::new(duration_selector).apply(self)
    }

    fn timed_gate_with_start<F, G, V, S, W>(
        self,
        duration_selector: F,
        start_signal: S,
    ) -> SharedProducer<T>
    where
        Self: 'static,
        T: Send + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static,
        S: Producer<W> + 'static,
        W: Send + 'static,
    {
        TimedGate::new(duration_selector)
            .with_start_signal(start_signal)
            .apply(self)
    }
}
