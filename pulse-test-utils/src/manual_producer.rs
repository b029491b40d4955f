// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use pulse_core::{Consumer, Producer, PulseError, Result, SharedConsumer, Subscriber, Teardown};
use std::sync::Arc;

struct State<T> {
    next_id: usize,
    subscriptions: usize,
    subscribers: Vec<(usize, Subscriber<T>)>,
}

/// Hot source pushed by the test.
///
/// Every signal goes synchronously to the subscribers active at that moment.
/// The producer tracks how many subscriptions it ever accepted and how many
/// are still live, which is how tests observe that teardown reached it.
pub struct ManualProducer<T> {
    state: Arc<Mutex<State<T>>>,
}

impl<T: Clone + Send + 'static> ManualProducer<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_id: 0,
                subscriptions: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Sends `value` to every active subscriber.
    pub fn emit(&self, value: T) {
        for subscriber in self.snapshot() {
            subscriber.next(value.clone());
        }
    }

    /// Terminates every active subscriber with `error`.
    pub fn fail(&self, error: PulseError) {
        for subscriber in self.snapshot() {
            subscriber.error(error.clone());
        }
    }

    /// Completes every active subscriber.
    pub fn finish(&self) {
        for subscriber in self.snapshot() {
            subscriber.complete();
        }
    }

    /// Subscriptions accepted since creation.
    pub fn subscription_count(&self) -> usize {
        self.state.lock().subscriptions
    }

    /// Subscriptions not yet terminated or torn down.
    pub fn active_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    fn snapshot(&self) -> Vec<Subscriber<T>> {
        self.state
            .lock()
            .subscribers
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect()
    }
}

impl<T: Clone + Send + 'static> Default for ManualProducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ManualProducer<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Producer<T> for ManualProducer<T> {
    fn subscribe(&self, consumer: SharedConsumer<T>) -> Result<Teardown> {
        let subscriber = Subscriber::new(consumer);
        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscriptions += 1;
            state.subscribers.push((id, subscriber.clone()));
            id
        };

        let state = Arc::downgrade(&self.state);
        subscriber.add_fn(move || {
            if let Some(state) = state.upgrade() {
                state.lock().subscribers.retain(|(other, _)| *other != id);
            }
        });

        Ok(subscriber.teardown().clone())
    }
}
