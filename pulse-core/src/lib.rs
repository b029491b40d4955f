// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core contracts of the pulse push-based stream pipeline.
//!
//! - [`Producer`] / [`Consumer`]: the contract every stream and every sink implements
//! - [`Teardown`]: composable, idempotent cancellation handle
//! - [`Subscriber`]: the safe outer consumer of one subscription
//! - [`Adapter`]: reusable consumer for writing stages
//! - [`compose`]: stage-composition primitive wiring teardown through a stage
//!
//! Execution is single-threaded cooperative: signals may re-enter the same
//! call chain synchronously, but no lock is ever held across a callback, so
//! producers may also be driven from an async task.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod adapter;
pub mod compose;
pub mod consumer;
pub mod error;
pub mod producer;
pub mod subscriber;
pub mod teardown;

pub use self::adapter::{Adapter, AdapterBuilder};
pub use self::compose::{compose, Composed};
pub use self::consumer::{CallbackConsumer, Consumer, SharedConsumer};
pub use self::error::{PulseError, Result, ResultExt};
pub use self::producer::{create, Create, Producer, SharedProducer};
pub use self::subscriber::Subscriber;
pub use self::teardown::Teardown;
