// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Composable, idempotent cancellation handle.
//!
//! Every call to [`Producer::subscribe`](crate::Producer::subscribe) returns a
//! [`Teardown`]. A teardown owns zero or more child actions (callbacks or
//! nested teardowns) and runs all of them exactly once when it is
//! unsubscribed.
//!
//! ## Characteristics
//!
//! - **Idempotent**: the handle is marked closed *before* any child runs, so a
//!   child that re-enters [`Teardown::unsubscribe`] observes `is_closed() == true`
//!   and returns immediately.
//! - **Never drops work**: [`Teardown::add`] on a closed handle runs the action
//!   on the spot.
//! - **FIFO**: children run in the order they were added.
//! - **Self-pruning**: a nested teardown that is unsubscribed on its own
//!   removes itself from every parent holding it.
//! - **Explicit**: dropping the last clone of a handle does *not* unsubscribe.
//!
//! ## Example
//!
//! ```
//! use pulse_core::Teardown;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let runs = Arc::new(AtomicUsize::new(0));
//! let parent = Teardown::new();
//! let child = Teardown::new();
//!
//! let counter = runs.clone();
//! child.add_fn(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! parent.add(child.clone());
//!
//! parent.unsubscribe();
//! parent.unsubscribe();
//!
//! assert!(child.is_closed());
//! assert_eq!(runs.load(Ordering::SeqCst), 1);
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

type Callback = Box<dyn FnOnce() + Send>;

enum Action {
    Callback(Callback),
    Nested(Teardown),
}

impl Action {
    fn run(self) {
        match self {
            Self::Callback(callback) => callback(),
            Self::Nested(teardown) => teardown.unsubscribe(),
        }
    }
}

#[derive(Default)]
struct State {
    closed: bool,
    children: Vec<Action>,
    parents: Vec<Weak<Inner>>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
}

impl Inner {
    fn detach_child(&self, child: &Arc<Inner>) {
        self.state.lock().children.retain(|action| match action {
            Action::Nested(teardown) => !Arc::ptr_eq(&teardown.inner, child),
            Action::Callback(_) => true,
        });
    }

    fn forget_parent(&self, parent: &Arc<Inner>) {
        self.state
            .lock()
            .parents
            .retain(|weak| !core::ptr::eq(weak.as_ptr(), Arc::as_ptr(parent)));
    }
}

/// Cancellation handle returned by every subscription.
///
/// Cheap to clone; all clones share the same state. See the
/// [module documentation](self) for the full contract.
#[derive(Clone, Default)]
pub struct Teardown {
    inner: Arc<Inner>,
}

impl Teardown {
    /// Creates an open teardown with no children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a teardown that is already closed.
    ///
    /// Anything added to it runs immediately. Useful for producers that finish
    /// synchronously inside `subscribe`.
    #[must_use]
    pub fn closed() -> Self {
        let teardown = Self::new();
        teardown.inner.state.lock().closed = true;
        teardown
    }

    /// Creates an open teardown owning a single callback.
    #[must_use]
    pub fn from_fn(callback: impl FnOnce() + Send + 'static) -> Self {
        let teardown = Self::new();
        teardown.add_fn(callback);
        teardown
    }

    /// Attaches a nested teardown, unsubscribed when this one is.
    ///
    /// If this teardown is already closed, `child` is unsubscribed immediately.
    /// Adding a handle to itself, or adding an already closed child, is a no-op.
    pub fn add(&self, child: Teardown) {
        if Arc::ptr_eq(&self.inner, &child.inner) {
            return;
        }

        {
            let mut child_state = child.inner.state.lock();
            if child_state.closed {
                return;
            }
            child_state.parents.push(Arc::downgrade(&self.inner));
        }

        let mut state = self.inner.state.lock();
        if state.closed {
            drop(state);
            child.unsubscribe();
            return;
        }
        state.children.push(Action::Nested(child));
    }

    /// Attaches a callback, run when this teardown is unsubscribed.
    ///
    /// If this teardown is already closed, the callback runs immediately.
    pub fn add_fn(&self, callback: impl FnOnce() + Send + 'static) {
        let mut state = self.inner.state.lock();
        if state.closed {
            drop(state);
            callback();
            return;
        }
        state.children.push(Action::Callback(Box::new(callback)));
    }

    /// Detaches a nested teardown without unsubscribing it.
    pub fn remove(&self, child: &Teardown) {
        self.inner.detach_child(&child.inner);
        child.inner.forget_parent(&self.inner);
    }

    /// Runs every owned action once and marks this teardown closed.
    ///
    /// The closed flag is set before the first child runs; calls made after
    /// that, including reentrant ones from a child, return immediately.
    pub fn unsubscribe(&self) {
        let (children, parents) = {
            let mut state = self.inner.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            (
                core::mem::take(&mut state.children),
                core::mem::take(&mut state.parents),
            )
        };

        trace!("teardown closing with {} children", children.len());

        for parent in parents.iter().filter_map(Weak::upgrade) {
            parent.detach_child(&self.inner);
        }

        for action in children {
            action.run();
        }
    }

    /// Returns `true` once [`unsubscribe`](Self::unsubscribe) has started.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Number of actions still waiting to run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().children.len()
    }

    /// Returns `true` if no actions are waiting to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Teardown) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Teardown")
            .field("closed", &state.closed)
            .field("children", &state.children.len())
            .finish()
    }
}
