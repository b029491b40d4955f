// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Safe outer consumer owning one subscription's [`Teardown`].

use crate::consumer::{Consumer, SharedConsumer};
use crate::{PulseError, Teardown};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct Inner<T> {
    destination: Mutex<Option<SharedConsumer<T>>>,
    teardown: Teardown,
    stopped: AtomicBool,
}

impl<T> Inner<T> {
    fn destination(&self) -> Option<SharedConsumer<T>> {
        self.destination.lock().clone()
    }
}

/// The consumer a producer actually talks to.
///
/// Wraps a destination [`Consumer`] together with the [`Teardown`] of the
/// subscription and enforces the contract on the producer's behalf:
///
/// - once `error` or `complete` has been delivered, or the teardown has fired,
///   every further signal is silently ignored;
/// - `error` and `complete` are delivered first, then the teardown runs;
/// - the teardown releases the destination, so nothing reachable only through
///   this subscription outlives it.
///
/// Cheap to clone; clones refer to the same subscription.
pub struct Subscriber<T> {
    inner: Arc<Inner<T>>,
}

impl<T: 'static> Subscriber<T> {
    /// Wraps `destination` in a fresh, open subscription.
    pub fn new(destination: SharedConsumer<T>) -> Self {
        let inner = Arc::new(Inner {
            destination: Mutex::new(Some(destination)),
            teardown: Teardown::new(),
            stopped: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&inner);
        inner.teardown.add_fn(move || {
            if let Some(inner) = weak.upgrade() {
                inner.stopped.store(true, Ordering::SeqCst);
                inner.destination.lock().take();
            }
        });

        Self { inner }
    }
}

impl<T> Subscriber<T> {
    /// The teardown handle of this subscription.
    #[must_use]
    pub fn teardown(&self) -> &Teardown {
        &self.inner.teardown
    }

    /// Attaches a child teardown to this subscription.
    pub fn add(&self, child: Teardown) {
        self.inner.teardown.add(child);
    }

    /// Attaches a callback run when this subscription tears down.
    pub fn add_fn(&self, callback: impl FnOnce() + Send + 'static) {
        self.inner.teardown.add_fn(callback);
    }

    /// Detaches a child teardown without running it.
    pub fn remove(&self, child: &Teardown) {
        self.inner.teardown.remove(child);
    }

    /// Tears the subscription down without delivering a terminal signal.
    pub fn unsubscribe(&self) {
        self.inner.teardown.unsubscribe();
    }

    /// Returns `true` once a terminal signal was delivered, the teardown fired,
    /// or the destination itself reports closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
            || self.inner.teardown.is_closed()
            || self
                .inner
                .destination()
                .is_some_and(|destination| destination.is_closed())
    }

    fn stop(&self) -> bool {
        !self.inner.stopped.swap(true, Ordering::SeqCst) && !self.inner.teardown.is_closed()
    }
}

impl<T> Consumer<T> for Subscriber<T> {
    fn next(&self, value: T) {
        if self.is_closed() {
            return;
        }
        if let Some(destination) = self.inner.destination() {
            destination.next(value);
        }
    }

    fn error(&self, error: PulseError) {
        if !self.stop() {
            return;
        }
        if let Some(destination) = self.inner.destination() {
            destination.error(error);
        }
        self.inner.teardown.unsubscribe();
    }

    fn complete(&self) {
        if !self.stop() {
            return;
        }
        if let Some(destination) = self.inner.destination() {
            destination.complete();
        }
        self.inner.teardown.unsubscribe();
    }

    fn is_closed(&self) -> bool {
        Subscriber::is_closed(self)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("closed", &self.is_closed())
            .field("teardown", &self.inner.teardown)
            .finish()
    }
}
