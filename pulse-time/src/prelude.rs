// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting the time-based extension trait and the timer abstraction.

pub use crate::delay::DelayExt;
pub use crate::timer::Timer;
pub use crate::timer_producer::timer;
