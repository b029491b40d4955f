// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-value timed gate.
//!
//! The timed gate holds back every source value until a *gate* producer,
//! chosen per value by a duration selector, fires. It is the stage every
//! delay-like behaviour in this workspace is built on.
//!
//! # Behavior
//!
//! - For each source value `v` with running index `i`, `duration_selector(&v, i)`
//!   returns a gate producer, which is subscribed immediately.
//! - The first value *or* the completion of the gate releases `v`. Completion
//!   releasing the value is kept for compatibility with older callers; new
//!   stages should not rely on it.
//! - Each value is released exactly once, even when its gate emits and
//!   completes synchronously inside `subscribe`.
//! - Values are released in the order their gates fire, not in source order:
//!   a later value with a faster gate overtakes an earlier one.
//! - Source completion is held back until every outstanding gate has fired.
//! - An error from the source, from any gate, or from the selector fails the
//!   whole output and tears down every outstanding gate.
//!
//! # Start signal
//!
//! [`TimedGate::with_start_signal`] keeps the older two-step form: the source
//! is not subscribed until the start signal emits its first value or
//! completes. An error from the start signal fails the output without the
//! source ever being subscribed.
//!
//! # Example
//!
//! ```
//! use pulse_core::Producer;
//! use pulse_ops::{of, TimedGate};
//! use pulse_test_utils::{ManualProducer, RecordingConsumer};
//!
//! let gates = vec![ManualProducer::<()>::new(), ManualProducer::<()>::new()];
//! let selector_gates = gates.clone();
//! let gated = TimedGate::new(move |_: &&str, index: usize| Ok(selector_gates[index].clone()))
//!     .apply(of(vec!["a", "b"]));
//!
//! let recorder = RecordingConsumer::new();
//! gated.subscribe(recorder.shared()).unwrap();
//!
//! gates[1].emit(());
//! gates[0].emit(());
//!
//! assert_eq!(recorder.values(), ["b", "a"]);
//! assert!(recorder.is_completed());
//! ```

use crate::{discard_values, sequence, take_first};
use parking_lot::Mutex;
use pulse_core::{
    compose, Adapter, Consumer, Producer, Result, SharedProducer, Subscriber, Teardown,
};
use std::sync::Arc;

/// Per-subscription bookkeeping of the gate stage.
#[derive(Debug, Default)]
struct GateState {
    index: usize,
    completion_pending: bool,
    active: usize,
}

impl GateState {
    fn should_complete(&self) -> bool {
        self.completion_pending && self.active == 0
    }
}

enum Release<T> {
    Pending(T),
    Notified,
}

/// One held-back value and the subscription to its gate.
struct GateSlot<T> {
    release: Mutex<Release<T>>,
    teardown: Teardown,
}

impl<T> GateSlot<T> {
    fn new(value: T) -> Self {
        Self {
            release: Mutex::new(Release::Pending(value)),
            teardown: Teardown::new(),
        }
    }

    /// Releases the held value; only the first call has any effect.
    fn notify(&self, destination: &Subscriber<T>, state: &Mutex<GateState>) {
        let value = match core::mem::replace(&mut *self.release.lock(), Release::Notified) {
            Release::Pending(value) => value,
            Release::Notified => return,
        };

        destination.next(value);
        self.teardown.unsubscribe();

        let complete = {
            let mut state = state.lock();
            state.active -= 1;
            state.should_complete()
        };
        if complete {
            trace!("last gate fired after source completion");
            destination.complete();
        }
    }
}

fn open_gate<T, V, F, G>(
    destination: &Subscriber<T>,
    state: &Arc<Mutex<GateState>>,
    duration_selector: &F,
    value: T,
) -> Result<()>
where
    T: Send + 'static,
    V: 'static,
    F: Fn(&T, usize) -> Result<G>,
    G: Producer<V>,
{
    let index = {
        let mut state = state.lock();
        let index = state.index;
        state.index += 1;
        index
    };
    let gate = duration_selector(&value, index)?;

    let slot = Arc::new(GateSlot::new(value));
    // The gate may fire inside `subscribe_to`, so it must already count as active.
    state.lock().active += 1;

    let notify = {
        let slot = slot.clone();
        let state = state.clone();
        let destination = destination.clone();
        move || {
            slot.notify(&destination, &state);
            Ok(())
        }
    };
    let on_value = notify.clone();

    Adapter::builder(destination, move |_: V| on_value())
        .on_complete(notify)
        .teardown(slot.teardown.clone())
        .subscribe_to(&gate)?;
    Ok(())
}

fn gate_values<T, V, P, F, G>(source: P, duration_selector: Arc<F>) -> impl Producer<T>
where
    T: Send + 'static,
    V: 'static,
    P: Producer<T>,
    F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
    G: Producer<V>,
{
    compose(source, move |source: &P, destination: &Subscriber<T>| {
        let state = Arc::new(Mutex::new(GateState::default()));

        let on_next = {
            let state = state.clone();
            let destination = destination.clone();
            let duration_selector = duration_selector.clone();
            move |value: T| {
                open_gate::<T, V, F, G>(&destination, &state, &*duration_selector, value)
            }
        };
        let on_complete = {
            let destination = destination.clone();
            move || {
                let complete = {
                    let mut state = state.lock();
                    state.completion_pending = true;
                    state.should_complete()
                };
                if complete {
                    destination.complete();
                }
                Ok(())
            }
        };

        Adapter::builder(destination, on_next)
            .on_complete(on_complete)
            .subscribe_to(source)?;
        Ok(())
    })
}

/// Configuration of a timed gate: a duration selector and an optional start signal.
///
/// See the [module documentation](self) for the semantics.
pub struct TimedGate<T, F> {
    duration_selector: Arc<F>,
    start_signal: Option<SharedProducer<T>>,
}

impl<T, F> TimedGate<T, F>
where
    T: Send + 'static,
{
    /// Gates every value on the producer returned by `duration_selector(&value, index)`.
    pub fn new<G>(duration_selector: F) -> Self
    where
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
    {
        Self {
            duration_selector: Arc::new(duration_selector),
            start_signal: None,
        }
    }

    /// Delays subscribing to the source until `start_signal` emits or completes.
    ///
    /// Kept for compatibility with the older two-argument form.
    #[must_use]
    pub fn with_start_signal<S, W>(mut self, start_signal: S) -> Self
    where
        S: Producer<W> + 'static,
        W: Send + 'static,
    {
        let trigger = discard_values::<W, T, _>(take_first::<W, _>(start_signal));
        self.start_signal = Some(Arc::new(trigger));
        self
    }

    /// Returns `true` if a start signal is configured.
    #[must_use]
    pub fn has_start_signal(&self) -> bool {
        self.start_signal.is_some()
    }

    /// Applies the gate to `source`.
    pub fn apply<P, G, V>(&self, source: P) -> SharedProducer<T>
    where
        P: Producer<T> + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static,
    {
        let gated = gate_values::<T, V, P, F, G>(source, self.duration_selector.clone());
        match &self.start_signal {
            None => Arc::new(gated),
            Some(start_signal) => Arc::new(sequence(start_signal.clone(), gated)),
        }
    }

    /// Turns the configuration into a reusable stage.
    pub fn into_stage<P, G, V>(self) -> impl Fn(P) -> SharedProducer<T>
    where
        P: Producer<T> + 'static,
        F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
        G: Producer<V> + 'static,
        V: 'static,
    {
        move |source| self.apply(source)
    }
}

impl<T, F> Clone for TimedGate<T, F> {
    fn clone(&self) -> Self {
        Self {
            duration_selector: self.duration_selector.clone(),
            start_signal: self.start_signal.clone(),
        }
    }
}

/// Starts a timed-gate configuration.
///
/// Apply it directly with [`TimedGate::apply`], add the start signal with
/// [`TimedGate::with_start_signal`], or turn it into a reusable stage with
/// [`TimedGate::into_stage`].
///
/// # Example
///
/// ```
/// use pulse_core::Producer;
/// use pulse_ops::{empty, never, of, timed_gate};
/// use pulse_test_utils::RecordingConsumer;
///
/// let stage = timed_gate(|_: &i32, _| Ok(empty::<()>()))
///     .with_start_signal(never::<()>())
///     .into_stage();
///
/// let recorder = RecordingConsumer::new();
/// stage(of(vec![1, 2])).subscribe(recorder.shared()).unwrap();
/// assert!(recorder.is_empty());
/// ```
pub fn timed_gate<T, F, G>(duration_selector: F) -> TimedGate<T, F>
where
    T: Send + 'static,
    F: Fn(&T, usize) -> Result<G> + Send + Sync + 'static,
{
    TimedGate::new(duration_selector)
}
