// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The producer half of the producer/consumer contract.

use crate::consumer::SharedConsumer;
use crate::{Result, Subscriber, Teardown};
use std::sync::Arc;

/// A lazy source of values over time.
///
/// Nothing happens until [`subscribe`](Self::subscribe) is called. Each call
/// starts an independent subscription that emits zero or more values and then
/// at most one terminal signal, and returns the [`Teardown`] cancelling it.
///
/// # Errors
///
/// `subscribe` returns `Err` only when the subscription cannot be constructed.
/// Failures that happen while the subscription is running are delivered
/// through [`Consumer::error`](crate::Consumer::error).
pub trait Producer<T>: Send + Sync {
    /// Starts a new subscription delivering to `consumer`.
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown>;
}

/// Type-erased, shareable producer.
pub type SharedProducer<T> = Arc<dyn Producer<T>>;

impl<T, P> Producer<T> for Arc<P>
where
    P: Producer<T> + ?Sized,
{
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        (**self).subscribe(consumer)
    }
}

impl<T, P> Producer<T> for Box<P>
where
    P: Producer<T> + ?Sized,
{
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        (**self).subscribe(consumer)
    }
}

/// Producer built from a subscribe closure. See [`create`].
pub struct Create<F> {
    on_subscribe: F,
}

impl<T, F> Producer<T> for Create<F>
where
    T: 'static,
    F: Fn(&Subscriber<T>) -> Result<()> + Send + Sync,
{
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        if let Err(error) = (self.on_subscribe)(&subscriber) {
            subscriber.unsubscribe();
            return Err(error);
        }
        Ok(subscriber.teardown().clone())
    }
}

/// Builds a producer from a closure run once per subscription.
///
/// The closure receives the [`Subscriber`] of the new subscription. It emits
/// through the subscriber, either right away or later from anything it hands
/// the subscriber to, and registers its own cleanup with
/// [`Subscriber::add_fn`]. Returning `Err` aborts the subscription and hands
/// the error to the caller of `subscribe`.
///
/// # Example
///
/// ```
/// use pulse_core::{create, CallbackConsumer, Consumer, Producer, Subscriber};
/// use std::sync::Arc;
///
/// let numbers = create(|subscriber: &Subscriber<i32>| {
///     subscriber.next(1);
///     subscriber.next(2);
///     subscriber.complete();
///     Ok(())
/// });
///
/// let teardown = numbers
///     .subscribe(Arc::new(CallbackConsumer::new(|v: i32| println!("{v}"))))
///     .unwrap();
/// assert!(teardown.is_closed());
/// ```
pub fn create<T, F>(on_subscribe: F) -> Create<F>
where
    T: 'static,
    F: Fn(&Subscriber<T>) -> Result<()> + Send + Sync,
{
    Create { on_subscribe }
}
