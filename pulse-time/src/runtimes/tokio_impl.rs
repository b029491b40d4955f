// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
pub mod tokio_implementation {
    use crate::timer::Timer;
    use core::future::Future;
    use std::time::Duration;
    use tokio::time::sleep;

    /// [`Timer`] backed by the tokio time driver.
    ///
    /// Uses tokio's clock, so paused-time tests can drive it with
    /// `tokio::time::advance`. Must be used from inside a tokio runtime.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TokioTimer;

    impl Timer for TokioTimer {
        type Sleep = tokio::time::Sleep;

        fn sleep_future(&self, duration: Duration) -> Self::Sleep {
            sleep(duration)
        }

        fn spawn<F>(&self, task: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            drop(tokio::spawn(task));
        }
    }
}
