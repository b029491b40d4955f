// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Producer, Result, SharedConsumer, Teardown};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counters {
    subscribed: AtomicUsize,
    released: AtomicUsize,
}

/// Wraps a producer and counts subscriptions made to it and released by it.
///
/// Clones share counters, so a test can keep one clone and hand another to
/// the code under test.
pub struct Counted<P> {
    inner: Arc<P>,
    counters: Arc<Counters>,
}

impl<P> Counted<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Subscriptions made so far.
    pub fn subscription_count(&self) -> usize {
        self.counters.subscribed.load(Ordering::SeqCst)
    }

    /// Subscriptions whose teardown has not run yet.
    pub fn active_count(&self) -> usize {
        self.subscription_count() - self.counters.released.load(Ordering::SeqCst)
    }
}

impl<P> Clone for Counted<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            counters: self.counters.clone(),
        }
    }
}

impl<T, P> Producer<T> for Counted<P>
where
    P: Producer<T>,
{
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        let teardown = self.inner.subscribe(consumer)?;
        self.counters.subscribed.fetch_add(1, Ordering::SeqCst);

        let counters = self.counters.clone();
        teardown.add_fn(move || {
            counters.released.fetch_add(1, Ordering::SeqCst);
        });
        Ok(teardown)
    }
}
