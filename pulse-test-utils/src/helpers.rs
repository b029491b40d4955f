// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::PulseError;

/// A stream error carrying `context`, for injecting failures.
pub fn test_error(context: &str) -> PulseError {
    PulseError::stream_error(context)
}

/// A handler error carrying `context`, for failing callbacks.
pub fn fault(context: &str) -> PulseError {
    PulseError::handler_error(context)
}
