// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sources and stages for the pulse push-based stream pipeline.
//!
//! # Sources
//!
//! [`of`], [`from_iter`], [`empty`], [`never`], [`throw_error`] and [`defer`].
//!
//! # Stages
//!
//! | stage              | behaviour                                                   |
//! |--------------------|-------------------------------------------------------------|
//! | [`take_first`]     | first value, then completes                                 |
//! | [`discard_values`] | drops values, keeps the terminal signal                     |
//! | [`sequence`]       | runs a second producer after the first completes            |
//! | [`timed_gate`]     | holds each value until a per-value gate producer fires      |
//!
//! Every stage is a plain function from producer to producer, and each is
//! also available as a method through [`ProducerExt`].
//!
//! # Example
//!
//! ```
//! use pulse_core::Producer;
//! use pulse_ops::prelude::*;
//! use pulse_test_utils::{ManualProducer, RecordingConsumer};
//!
//! let gate = ManualProducer::<()>::new();
//! let selector_gate = gate.clone();
//! let recorder = RecordingConsumer::new();
//!
//! of(vec![1, 2])
//!     .timed_gate(move |_: &i32, _| Ok(selector_gate.clone()))
//!     .subscribe(recorder.shared())
//!     .unwrap();
//! assert!(recorder.is_empty());
//!
//! gate.emit(());
//! assert_eq!(recorder.values(), [1, 2]);
//! assert!(recorder.is_completed());
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod discard_values;
pub mod prelude;
pub mod producer_ext;
pub mod sequence;
pub mod sources;
pub mod take_first;
pub mod timed_gate;

pub use self::discard_values::discard_values;
pub use self::producer_ext::ProducerExt;
pub use self::sequence::sequence;
pub use self::sources::{
    defer, empty, from_iter, never, of, throw_error, Defer, Empty, FromIter, Never, ThrowError,
};
pub use self::take_first::take_first;
pub use self::timed_gate::{timed_gate, TimedGate};
