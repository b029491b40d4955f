// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer-backed producers for the pulse pipeline.
//!
//! # Overview
//!
//! - **`Timer` trait** - Runtime-agnostic clock, sleep and spawn abstraction
//! - **`timer(duration, timer)`** - One-shot producer emitting `0` after `duration`
//! - **`DelayExt`** - `.delay(duration, timer)` and `.delay_by(f, timer)` stages
//! - **`CancellationToken`** - Lets a teardown stop the task behind a timer
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioTimer`] on the tokio time driver
//!
//! # Example
//!
//! ```rust,no_run
//! use pulse_core::Producer;
//! use pulse_ops::{of, ProducerExt};
//! use pulse_time::prelude::*;
//! use pulse_time::TokioTimer;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let gated = of(vec!["slow", "fast"])
//!     .delay_by(|v: &&str| Duration::from_millis(v.len() as u64 * 10), TokioTimer);
//! gated.subscribe_with(|v| println!("{v}")).unwrap();
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

mod cancellation_token;
mod delay;
pub mod prelude;
pub mod runtimes;
pub mod timer;
mod timer_producer;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::delay::DelayExt;
pub use self::timer_producer::{timer, TimerProducer};

#[cfg(feature = "runtime-tokio")]
pub use self::runtimes::TokioTimer;
