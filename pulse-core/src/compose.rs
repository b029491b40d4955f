// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stage-composition primitive.
//!
//! [`compose`] is how every stage in this workspace is built: it pairs a
//! source producer with a per-subscription transform and takes care of the
//! teardown wiring. Each subscription to the composed producer creates a fresh
//! [`Subscriber`] whose [`Teardown`] is the one returned to the caller; the
//! transform subscribes to the source through an [`Adapter`](crate::Adapter)
//! (or anything else it links into that subscriber), so unsubscribing the
//! output always reaches the inner subscription.

use crate::consumer::SharedConsumer;
use crate::{Producer, Result, Subscriber, Teardown};

/// Producer returned by [`compose`].
pub struct Composed<S, F> {
    source: S,
    transform: F,
}

impl<S, F> Composed<S, F> {
    /// The wrapped source producer.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, F, U> Producer<U> for Composed<S, F>
where
    U: 'static,
    S: Send + Sync,
    F: Fn(&S, &Subscriber<U>) -> Result<()> + Send + Sync,
{
    fn subscribe(&self, consumer: SharedConsumer<U>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        if let Err(error) = (self.transform)(&self.source, &subscriber) {
            subscriber.unsubscribe();
            return Err(error);
        }
        Ok(subscriber.teardown().clone())
    }
}

/// Builds a producer by wrapping `source` in a per-subscription `transform`.
///
/// `transform(source, destination)` runs once for every subscription to the
/// returned producer. An `Err` from the transform aborts that subscription and
/// is returned from `subscribe`.
pub fn compose<S, F, U>(source: S, transform: F) -> Composed<S, F>
where
    U: 'static,
    S: Send + Sync,
    F: Fn(&S, &Subscriber<U>) -> Result<()> + Send + Sync,
{
    Composed { source, transform }
}
