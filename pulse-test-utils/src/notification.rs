// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::PulseError;

/// One recorded signal.
///
/// Errors compare equal when their rendered messages match, which is what
/// assertions on recorded sequences need.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    Next(T),
    Error(PulseError),
    Complete,
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Complete`.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Notification::Error(_) | Notification::Complete)
    }
}

impl<T: PartialEq> PartialEq for Notification<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Notification::Next(a), Notification::Next(b)) => a == b,
            (Notification::Error(a), Notification::Error(b)) => a.to_string() == b.to_string(),
            (Notification::Complete, Notification::Complete) => true,
            _ => false,
        }
    }
}
