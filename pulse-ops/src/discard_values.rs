// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Suppresses values, keeping only the terminal signal.

use pulse_core::{compose, Adapter, Producer, Subscriber};

/// Drops every value of `source` and passes its error or completion through.
///
/// The output value type is free, so the result can sit in front of any
/// producer in a [`sequence`](crate::sequence).
pub fn discard_values<V, T, S>(source: S) -> impl Producer<T>
where
    V: 'static,
    T: 'static,
    S: Producer<V>,
{
    compose(source, |source: &S, destination: &Subscriber<T>| {
        Adapter::builder(destination, |_: V| Ok(())).subscribe_to(source)?;
        Ok(())
    })
}
