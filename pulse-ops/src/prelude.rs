// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting the sources, stages and the extension trait.
//!
//! ```
//! use pulse_ops::prelude::*;
//! ```

pub use crate::ProducerExt;
pub use crate::TimedGate;
pub use crate::{defer, empty, from_iter, never, of, throw_error};
pub use crate::{discard_values, sequence, take_first, timed_gate};
