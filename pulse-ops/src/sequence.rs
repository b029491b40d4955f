// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential composition of two producers.

use pulse_core::{compose, Adapter, Producer, Subscriber};
use std::sync::Arc;

/// Forwards `first`, then subscribes to `second` once `first` completes.
///
/// An error from `first` terminates the output and `second` is never
/// subscribed. Unsubscribing the output tears down whichever of the two is
/// currently running.
///
/// # Example
///
/// ```
/// use pulse_core::Producer;
/// use pulse_ops::{of, sequence};
/// use pulse_test_utils::RecordingConsumer;
///
/// let recorder = RecordingConsumer::new();
/// sequence(of(vec![1, 2]), of(vec![3])).subscribe(recorder.shared()).unwrap();
/// assert_eq!(recorder.values(), [1, 2, 3]);
/// ```
pub fn sequence<T, A, B>(first: A, second: B) -> impl Producer<T>
where
    T: Send + 'static,
    A: Producer<T>,
    B: Producer<T> + 'static,
{
    compose(
        (first, Arc::new(second)),
        |(first, second): &(A, Arc<B>), destination: &Subscriber<T>| {
            let second = second.clone();
            let out = destination.clone();
            Adapter::forwarding(destination)
                .on_complete(move || {
                    trace!("sequence switching to second producer");
                    Adapter::forwarding(&out).subscribe_to(&*second)?;
                    Ok(())
                })
                .subscribe_to(first)?;
            Ok(())
        },
    )
}
