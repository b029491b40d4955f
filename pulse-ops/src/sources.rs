// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Elementary producers.
//!
//! | source          | emits                                   |
//! |-----------------|-----------------------------------------|
//! | [`of`]          | the given values, then completes        |
//! | [`from_iter`]   | the items of a cloneable iterable       |
//! | [`empty`]       | completes immediately                   |
//! | [`never`]       | nothing, ever                           |
//! | [`throw_error`] | errors immediately                      |
//! | [`defer`]       | whatever a fresh producer from a factory emits |
//!
//! `of`, `from_iter`, `empty` and `throw_error` are synchronous: they finish
//! inside `subscribe` and return a closed [`Teardown`].

use core::marker::PhantomData;
use pulse_core::{Consumer, Producer, PulseError, Result, SharedConsumer, Subscriber, Teardown};

/// Producer returned by [`of`] and [`from_iter`].
#[derive(Clone)]
pub struct FromIter<I> {
    items: I,
}

impl<I> Producer<I::Item> for FromIter<I>
where
    I: IntoIterator + Clone + Send + Sync,
    I::Item: 'static,
{
    fn subscribe(&self, consumer: SharedConsumer<I::Item>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        for item in self.items.clone() {
            if subscriber.is_closed() {
                break;
            }
            subscriber.next(item);
        }
        subscriber.complete();
        Ok(subscriber.teardown().clone())
    }
}

/// Emits every item of `items` on each subscription, then completes.
pub fn from_iter<I>(items: I) -> FromIter<I>
where
    I: IntoIterator + Clone + Send + Sync,
{
    FromIter { items }
}

/// Emits `values` in order on each subscription, then completes.
///
/// # Example
///
/// ```
/// use pulse_core::Producer;
/// use pulse_ops::of;
/// use pulse_test_utils::RecordingConsumer;
///
/// let recorder = RecordingConsumer::new();
/// of(vec![1, 2, 3]).subscribe(recorder.shared()).unwrap();
/// assert_eq!(recorder.values(), [1, 2, 3]);
/// assert!(recorder.is_completed());
/// ```
pub fn of<T>(values: Vec<T>) -> FromIter<Vec<T>>
where
    T: Clone + Send + Sync,
{
    FromIter { items: values }
}

/// Producer returned by [`empty`].
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Producer<T> for Empty<T> {
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        subscriber.complete();
        Ok(subscriber.teardown().clone())
    }
}

/// Completes immediately without emitting.
pub fn empty<T>() -> Empty<T> {
    Empty {
        _marker: PhantomData,
    }
}

/// Producer returned by [`never`].
pub struct Never<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Producer<T> for Never<T> {
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        Ok(Subscriber::new(consumer).teardown().clone())
    }
}

/// Never emits, never terminates; only unsubscribing ends the subscription.
pub fn never<T>() -> Never<T> {
    Never {
        _marker: PhantomData,
    }
}

/// Producer returned by [`throw_error`].
pub struct ThrowError<T> {
    error: PulseError,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Producer<T> for ThrowError<T> {
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        subscriber.error(self.error.clone());
        Ok(subscriber.teardown().clone())
    }
}

/// Delivers `error` immediately on each subscription.
pub fn throw_error<T>(error: PulseError) -> ThrowError<T> {
    ThrowError {
        error,
        _marker: PhantomData,
    }
}

/// Producer returned by [`defer`].
pub struct Defer<F> {
    factory: F,
}

impl<T, F, P> Producer<T> for Defer<F>
where
    F: Fn() -> Result<P> + Send + Sync,
    P: Producer<T>,
{
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        (self.factory)()?.subscribe(consumer)
    }
}

/// Builds a fresh producer per subscription.
///
/// An `Err` from `factory` is returned from `subscribe`.
pub fn defer<T, F, P>(factory: F) -> Defer<F>
where
    F: Fn() -> Result<P> + Send + Sync,
    P: Producer<T>,
{
    Defer { factory }
}
