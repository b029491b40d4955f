// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test doubles for the pulse reactive pipeline.
//!
//! Designed for use in development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`ManualProducer`] - a hot, synchronous source driven by the test; counts
//!   subscriptions so tests can prove that teardown reached it
//! - [`Counted`] - wraps any producer and counts its subscriptions
//! - [`RecordingConsumer`] - records every signal it receives as a [`Notification`]
//!
//! # Example
//!
//! ```rust
//! use pulse_core::Producer;
//! use pulse_test_utils::{ManualProducer, Notification, RecordingConsumer};
//!
//! let source = ManualProducer::<i32>::new();
//! let recorder = RecordingConsumer::new();
//!
//! let teardown = source.subscribe(recorder.shared()).unwrap();
//! source.emit(1);
//! source.finish();
//!
//! assert_eq!(recorder.events(), [Notification::Next(1), Notification::Complete]);
//! assert!(teardown.is_closed());
//! assert_eq!(source.active_count(), 0);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod counted;
pub mod helpers;
pub mod manual_producer;
pub mod notification;
pub mod recording_consumer;

pub use counted::Counted;
pub use helpers::{fault, test_error};
pub use manual_producer::ManualProducer;
pub use notification::Notification;
pub use recording_consumer::RecordingConsumer;
