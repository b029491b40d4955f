// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic timer abstraction.

use core::future::Future;
use core::time::Duration;
use std::fmt::Debug;

/// The sleep and task-spawning capabilities a timer-backed producer needs.
pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send;

    /// Creates a future that completes once `duration` has elapsed.
    ///
    /// The deadline is fixed when the future is created, not when it is first polled.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    /// Runs `task` to completion in the background.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
