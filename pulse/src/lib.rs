// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Pulse
//!
//! A push-based reactive stream pipeline.
//!
//! ## Overview
//!
//! A [`Producer`] pushes values into a [`Consumer`] and hands back a
//! [`Teardown`] that cancels the subscription. Stages are plain functions
//! from producer to producer, built with [`compose`] and [`Adapter`], so
//! unsubscribing the end of a pipeline always reaches every producer inside
//! it, including the per-value gates of [`timed_gate`].
//!
//! | crate        | contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | `pulse-core` | the producer/consumer contract, teardown, adapter, errors |
//! | `pulse-ops`  | sources, `take_first`, `discard_values`, `sequence`, `timed_gate` |
//! | `pulse-time` | `Timer`, the `timer` producer and the `delay` stages      |
//!
//! ## Quick Start
//!
//! ```rust
//! use pulse::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = seen.clone();
//!
//! of(vec![1, 2, 3])
//!     .timed_gate(|_: &i32, _| Ok(empty::<()>()))
//!     .subscribe_with(move |v| log.lock().unwrap().push(v))
//!     .unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), [1, 2, 3]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub use pulse_core::{
    compose, create, Adapter, AdapterBuilder, CallbackConsumer, Composed, Consumer, Create,
    Producer, PulseError, Result, ResultExt, SharedConsumer, SharedProducer, Subscriber,
    Teardown,
};
pub use pulse_ops::{
    defer, discard_values, empty, from_iter, never, of, sequence, take_first, throw_error,
    timed_gate, ProducerExt, TimedGate,
};
pub use pulse_time::{timer, CancellationToken, DelayExt};

#[cfg(feature = "runtime-tokio")]
pub use pulse_time::TokioTimer;

/// Timer abstraction, see [`pulse_time::timer::Timer`].
pub use pulse_time::timer::Timer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use pulse_core::{Consumer, Producer, PulseError, Subscriber, Teardown};
    pub use pulse_ops::prelude::*;
    pub use pulse_time::prelude::*;
}
