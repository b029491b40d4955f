// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Truncates a producer to its first value.

use pulse_core::{compose, Adapter, Consumer, Producer, Subscriber};

/// Emits the first value of `source`, then completes and unsubscribes it.
///
/// If `source` terminates before emitting, its error or completion is
/// forwarded unchanged.
///
/// # Example
///
/// ```
/// use pulse_core::Producer;
/// use pulse_ops::{of, take_first};
/// use pulse_test_utils::RecordingConsumer;
///
/// let recorder = RecordingConsumer::new();
/// take_first(of(vec![7, 8, 9])).subscribe(recorder.shared()).unwrap();
/// assert_eq!(recorder.values(), [7]);
/// assert!(recorder.is_completed());
/// ```
pub fn take_first<T, S>(source: S) -> impl Producer<T>
where
    T: Send + 'static,
    S: Producer<T>,
{
    compose(source, |source: &S, destination: &Subscriber<T>| {
        let out = destination.clone();
        Adapter::builder(destination, move |value: T| {
            out.next(value);
            out.complete();
            Ok(())
        })
        .subscribe_to(source)?;
        Ok(())
    })
}
