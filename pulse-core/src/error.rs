// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the pulse reactive pipeline
//!
//! Every failure that travels through a pipeline is a [`PulseError`]. Errors
//! raised while a subscription is being *constructed* are returned from
//! [`Producer::subscribe`](crate::Producer::subscribe); errors raised while a
//! subscription is *running* are delivered through
//! [`Consumer::error`](crate::Consumer::error) and terminate it.
//!
//! # Examples
//!
//! ```
//! use pulse_core::{PulseError, Result};
//!
//! fn open_feed() -> Result<()> {
//!     Err(PulseError::subscription_error("feed not ready"))
//! }
//! ```

use std::sync::Arc;

/// Root error type for all pulse operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum PulseError {
    /// A producer failed while emitting.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong while emitting
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wrapped in an `Arc` so the error can be delivered to every consumer of
    /// a shared producer.
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A subscription could not be constructed.
    #[error("Subscription error: {context}")]
    SubscriptionError {
        /// What prevented the subscription from starting
        context: String,
    },

    /// A user-supplied callback reported a fault.
    ///
    /// Adapters turn a failing handler into this kind of error delivery
    /// followed by teardown.
    #[error("Handler error: {context}")]
    HandlerError {
        /// Description of the failing callback
        context: String,
    },
}

impl PulseError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a subscription error with the given context
    pub fn subscription_error(context: impl Into<String>) -> Self {
        Self::SubscriptionError {
            context: context.into(),
        }
    }

    /// Create a handler error with the given context
    pub fn handler_error(context: impl Into<String>) -> Self {
        Self::HandlerError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Returns `true` if the error was produced by a user callback.
    #[must_use]
    pub const fn is_handler_fault(&self) -> bool {
        matches!(self, Self::HandlerError { .. } | Self::UserError(_))
    }
}

/// Specialized Result type for pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(PulseError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(PulseError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PulseError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach_context(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach_context(f(), e.into()))
    }
}

fn attach_context(context: String, error: PulseError) -> PulseError {
    match error {
        PulseError::UserError(inner) => PulseError::StreamProcessingError {
            context: format!("{context}: {inner}"),
        },
        PulseError::HandlerError { context: inner } => PulseError::HandlerError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}
