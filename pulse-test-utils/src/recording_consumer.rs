// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Notification;
use parking_lot::Mutex;
use pulse_core::{Consumer, PulseError, SharedConsumer};
use std::sync::Arc;

/// Consumer that records every signal in arrival order.
///
/// It records faithfully, including signals that break the contract (a second
/// terminal signal, a value after completion), so tests can assert that the
/// pipeline never produces them.
pub struct RecordingConsumer<T> {
    events: Arc<Mutex<Vec<Notification<T>>>>,
}

impl<T: Clone + Send + 'static> RecordingConsumer<T> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A shared handle to hand to `Producer::subscribe`.
    pub fn shared(&self) -> SharedConsumer<T> {
        Arc::new(self.clone())
    }

    /// All recorded signals.
    pub fn events(&self) -> Vec<Notification<T>> {
        self.events.lock().clone()
    }

    /// Values delivered through `next`.
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Notification::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of terminal signals received.
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_terminal())
            .count()
    }

    pub fn is_completed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Notification::Complete))
    }

    /// The first recorded error, if any.
    pub fn terminal_error(&self) -> Option<PulseError> {
        self.events.lock().iter().find_map(|event| match event {
            Notification::Error(error) => Some(error.clone()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    fn record(&self, event: Notification<T>) {
        self.events.lock().push(event);
    }
}

impl<T: Clone + Send + 'static> Default for RecordingConsumer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingConsumer<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Consumer<T> for RecordingConsumer<T> {
    fn next(&self, value: T) {
        self.record(Notification::Next(value));
    }

    fn error(&self, error: PulseError) {
        self.record(Notification::Error(error));
    }

    fn complete(&self) {
        self.record(Notification::Complete);
    }
}
