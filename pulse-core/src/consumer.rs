// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The consumer half of the producer/consumer contract.

use crate::PulseError;
use std::sync::Arc;

/// Three-callback sink receiving the signals of one subscription.
///
/// A producer delivers zero or more [`next`](Self::next) calls followed by at
/// most one terminal signal, either [`error`](Self::error) or
/// [`complete`](Self::complete). Methods take `&self` because a consumer may be
/// re-entered while one of its own callbacks is still running; implementations
/// keep mutable state behind their own locks and must not hold them while
/// calling out.
pub trait Consumer<T>: Send + Sync {
    /// Receives the next value.
    fn next(&self, value: T);

    /// Receives the terminal error.
    fn error(&self, error: PulseError);

    /// Receives the terminal completion signal.
    fn complete(&self);

    /// Returns `true` once this consumer accepts no further signals.
    ///
    /// Synchronous producers poll it between emissions so that a downstream
    /// close stops them even while they are still inside `subscribe`.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Type-erased, shareable consumer.
pub type SharedConsumer<T> = Arc<dyn Consumer<T>>;

impl<T, C> Consumer<T> for Arc<C>
where
    C: Consumer<T> + ?Sized,
{
    fn next(&self, value: T) {
        (**self).next(value);
    }

    fn error(&self, error: PulseError) {
        (**self).error(error);
    }

    fn complete(&self) {
        (**self).complete();
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

type NextFn<T> = Box<dyn Fn(T) + Send + Sync>;
type ErrorFn = Box<dyn Fn(PulseError) + Send + Sync>;
type CompleteFn = Box<dyn Fn() + Send + Sync>;

/// Consumer assembled from closures.
///
/// Missing error and completion callbacks are no-ops. The callback consumer
/// performs no bookkeeping of its own: producers wrap every consumer they
/// receive in a [`Subscriber`](crate::Subscriber), which enforces the
/// single-terminal-signal grammar.
///
/// # Example
///
/// ```
/// use pulse_core::{CallbackConsumer, Consumer};
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let total = Arc::new(AtomicI32::new(0));
/// let sum = total.clone();
/// let consumer = CallbackConsumer::new(move |v: i32| {
///     sum.fetch_add(v, Ordering::SeqCst);
/// });
///
/// consumer.next(2);
/// consumer.next(3);
/// assert_eq!(total.load(Ordering::SeqCst), 5);
/// ```
pub struct CallbackConsumer<T> {
    on_next: NextFn<T>,
    on_error: Option<ErrorFn>,
    on_complete: Option<CompleteFn>,
}

impl<T> CallbackConsumer<T> {
    /// Creates a consumer that handles values only.
    pub fn new(on_next: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            on_next: Box::new(on_next),
            on_error: None,
            on_complete: None,
        }
    }

    /// Sets the error callback.
    #[must_use]
    pub fn on_error(mut self, on_error: impl Fn(PulseError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn on_complete(mut self, on_complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }
}

impl<T> Consumer<T> for CallbackConsumer<T> {
    fn next(&self, value: T) {
        (self.on_next)(value);
    }

    fn error(&self, error: PulseError) {
        if let Some(on_error) = &self.on_error {
            on_error(error);
        }
    }

    fn complete(&self) {
        if let Some(on_complete) = &self.on_complete {
            on_complete();
        }
    }
}
