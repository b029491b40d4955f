// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reusable consumer for authoring stages.
//!
//! An [`Adapter`] sits between an upstream producer and the [`Subscriber`] of
//! the stage's output. The stage supplies only the callbacks it cares about;
//! everything else is forwarded to the destination:
//!
//! | signal     | handler supplied        | no handler                 | afterwards        |
//! |------------|-------------------------|----------------------------|-------------------|
//! | `next`     | `on_next(value)`        | forwarded (`forwarding`)   | -                 |
//! | `error`    | `on_error(error)`       | forwarded to destination   | adapter tears down|
//! | `complete` | `on_complete()`         | forwarded to destination   | adapter tears down|
//!
//! Handlers return [`Result`]. An `Err` from any handler is a handler fault:
//! it is delivered to the destination's `error` and the adapter tears itself
//! down, so one failing callback cannot leave the pipeline half alive.
//!
//! The adapter marks itself closed *before* it runs a terminal handler, so a
//! handler that re-enters the adapter is ignored. Handlers are `Fn`; state
//! they mutate lives in an explicit record behind its own lock.
//!
//! # Example
//!
//! ```
//! use pulse_core::{compose, create, Adapter, CallbackConsumer, Consumer, Producer, Subscriber};
//! use std::sync::Arc;
//!
//! let source = create(|s: &Subscriber<i32>| {
//!     s.next(1);
//!     s.next(2);
//!     s.complete();
//!     Ok(())
//! });
//!
//! let doubled = compose(source, |source, destination: &Subscriber<i32>| {
//!     let out = destination.clone();
//!     Adapter::builder(destination, move |v: i32| {
//!         out.next(v * 2);
//!         Ok(())
//!     })
//!     .subscribe_to(source)?;
//!     Ok(())
//! });
//!
//! doubled
//!     .subscribe(Arc::new(CallbackConsumer::new(|v: i32| assert!(v % 2 == 0))))
//!     .unwrap();
//! ```

use crate::consumer::{Consumer, SharedConsumer};
use crate::{Producer, PulseError, Result, Subscriber, Teardown};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type NextHandler<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;
type ErrorHandler = Box<dyn Fn(PulseError) -> Result<()> + Send + Sync>;
type CompleteHandler = Box<dyn Fn() -> Result<()> + Send + Sync>;

struct Handlers<T> {
    on_next: NextHandler<T>,
    on_error: Option<ErrorHandler>,
    on_complete: Option<CompleteHandler>,
}

/// Configures an [`Adapter`] before it is subscribed.
pub struct AdapterBuilder<T, U> {
    destination: Subscriber<U>,
    teardown: Option<Teardown>,
    handlers: Handlers<T>,
}

impl<T: 'static, U: 'static> AdapterBuilder<T, U> {
    /// Handles the upstream error instead of forwarding it.
    #[must_use]
    pub fn on_error(
        mut self,
        on_error: impl Fn(PulseError) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.on_error = Some(Box::new(on_error));
        self
    }

    /// Handles the upstream completion instead of forwarding it.
    #[must_use]
    pub fn on_complete(mut self, on_complete: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        self.handlers.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Uses `teardown` as the adapter's subscription handle.
    ///
    /// Lets a stage hold on to the handle before the adapter exists, e.g. to
    /// unsubscribe it from inside one of the adapter's own handlers.
    #[must_use]
    pub fn teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = Some(teardown);
        self
    }

    /// Finishes configuration.
    pub fn build(self) -> Arc<Adapter<T, U>> {
        let adapter = Arc::new(Adapter {
            destination: self.destination,
            teardown: self.teardown.unwrap_or_default(),
            stopped: AtomicBool::new(false),
            handlers: Mutex::new(Some(Arc::new(self.handlers))),
        });

        let weak = Arc::downgrade(&adapter);
        adapter.teardown.add_fn(move || {
            if let Some(adapter) = weak.upgrade() {
                adapter.stopped.store(true, Ordering::SeqCst);
                adapter.handlers.lock().take();
            }
        });

        adapter
    }

    /// Builds the adapter and subscribes it to `source`.
    ///
    /// # Errors
    ///
    /// Returns the error of `source.subscribe`; the adapter is torn down.
    pub fn subscribe_to<P>(self, source: &P) -> Result<Teardown>
    where
        P: Producer<T> + ?Sized,
    {
        self.build().subscribe_to(source)
    }
}

/// Stage consumer forwarding to a destination [`Subscriber`].
///
/// See the [module documentation](self).
pub struct Adapter<T, U> {
    destination: Subscriber<U>,
    teardown: Teardown,
    stopped: AtomicBool,
    handlers: Mutex<Option<Arc<Handlers<T>>>>,
}

impl<T: 'static, U: 'static> Adapter<T, U> {
    /// Starts an adapter whose values go to `on_next`.
    pub fn builder(
        destination: &Subscriber<U>,
        on_next: impl Fn(T) -> Result<()> + Send + Sync + 'static,
    ) -> AdapterBuilder<T, U> {
        AdapterBuilder {
            destination: destination.clone(),
            teardown: None,
            handlers: Handlers {
                on_next: Box::new(on_next),
                on_error: None,
                on_complete: None,
            },
        }
    }

    /// Links the adapter into its destination and subscribes it to `source`.
    ///
    /// The adapter's teardown becomes a child of the destination's, and the
    /// upstream teardown a child of the adapter's, so unsubscribing the
    /// output reaches `source`.
    ///
    /// # Errors
    ///
    /// Returns the error of `source.subscribe`; the adapter is torn down.
    pub fn subscribe_to<P>(self: &Arc<Self>, source: &P) -> Result<Teardown>
    where
        P: Producer<T> + ?Sized,
    {
        self.destination.add(self.teardown.clone());
        let consumer: SharedConsumer<T> = self.clone();
        match source.subscribe(consumer) {
            Ok(upstream) => {
                self.teardown.add(upstream);
                Ok(self.teardown.clone())
            }
            Err(error) => {
                self.teardown.unsubscribe();
                Err(error)
            }
        }
    }
}

impl<T: Send + 'static> Adapter<T, T> {
    /// Starts an adapter that forwards values unchanged.
    pub fn forwarding(destination: &Subscriber<T>) -> AdapterBuilder<T, T> {
        let forward = destination.clone();
        Self::builder(destination, move |value| {
            forward.next(value);
            Ok(())
        })
    }
}

impl<T, U> Adapter<T, U> {
    /// The adapter's own subscription handle.
    #[must_use]
    pub fn teardown(&self) -> &Teardown {
        &self.teardown
    }

    /// Returns `true` once the adapter stopped, was torn down, or its
    /// destination closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
            || self.teardown.is_closed()
            || self.destination.is_closed()
    }

    fn handlers(&self) -> Option<Arc<Handlers<T>>> {
        self.handlers.lock().clone()
    }

    fn stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::SeqCst) && !self.teardown.is_closed()
    }

    fn fault(&self, error: PulseError) {
        warn!("stage handler failed: {error}");
        self.stopped.store(true, Ordering::SeqCst);
        self.destination.error(error);
        self.teardown.unsubscribe();
    }
}

impl<T, U> Consumer<T> for Adapter<T, U> {
    fn next(&self, value: T) {
        if self.is_closed() {
            return;
        }
        let Some(handlers) = self.handlers() else {
            return;
        };
        if let Err(error) = (handlers.on_next)(value) {
            self.fault(error);
        }
    }

    fn error(&self, error: PulseError) {
        if !self.stop() {
            return;
        }
        let handlers = self.handlers();
        match handlers.as_ref().and_then(|h| h.on_error.as_ref()) {
            Some(on_error) => {
                if let Err(fault) = on_error(error) {
                    warn!("stage error handler failed: {fault}");
                    self.destination.error(fault);
                }
            }
            None => self.destination.error(error),
        }
        self.teardown.unsubscribe();
    }

    fn complete(&self) {
        if !self.stop() {
            return;
        }
        let handlers = self.handlers();
        match handlers.as_ref().and_then(|h| h.on_complete.as_ref()) {
            Some(on_complete) => {
                if let Err(fault) = on_complete() {
                    warn!("stage completion handler failed: {fault}");
                    self.destination.error(fault);
                }
            }
            None => self.destination.complete(),
        }
        self.teardown.unsubscribe();
    }

    fn is_closed(&self) -> bool {
        Adapter::is_closed(self)
    }
}
