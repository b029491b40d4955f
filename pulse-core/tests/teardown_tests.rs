// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use pulse_core::Teardown;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let clone = count.clone();
    (count, move || {
        clone.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_new_teardown_is_open() {
    let teardown = Teardown::new();
    assert!(!teardown.is_closed());
    assert!(teardown.is_empty());
}

#[test]
fn test_unsubscribe_runs_callback_once() {
    // Arrange
    let (count, callback) = counter();
    let teardown = Teardown::from_fn(callback);

    // Act
    teardown.unsubscribe();
    teardown.unsubscribe();
    teardown.clone().unsubscribe();

    // Assert
    assert!(teardown.is_closed());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_add_after_close_runs_immediately() {
    // Arrange
    let teardown = Teardown::new();
    teardown.unsubscribe();
    let (count, callback) = counter();

    // Act
    teardown.add_fn(callback);

    // Assert
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_add_nested_after_close_unsubscribes_child() {
    let parent = Teardown::closed();
    let child = Teardown::new();

    parent.add(child.clone());

    assert!(child.is_closed());
}

#[test]
fn test_children_run_in_insertion_order() {
    // Arrange
    let order = Arc::new(Mutex::new(Vec::new()));
    let teardown = Teardown::new();
    for index in 0..3 {
        let order = order.clone();
        teardown.add_fn(move || order.lock().push(index));
    }
    let nested = Teardown::new();
    let nested_order = order.clone();
    nested.add_fn(move || nested_order.lock().push(3));
    teardown.add(nested);

    // Act
    teardown.unsubscribe();

    // Assert
    assert_eq!(*order.lock(), [0, 1, 2, 3]);
}

#[test]
fn test_child_observes_parent_closed_while_running() {
    // Arrange
    let parent = Teardown::new();
    let observed = Arc::new(Mutex::new(None));
    let probe = parent.clone();
    let slot = observed.clone();
    parent.add_fn(move || *slot.lock() = Some(probe.is_closed()));

    // Act
    parent.unsubscribe();

    // Assert
    assert_eq!(*observed.lock(), Some(true));
}

#[test]
fn test_reentrant_unsubscribe_from_child_does_not_double_run() {
    // Arrange
    let parent = Teardown::new();
    let (count, callback) = counter();
    let reentrant = parent.clone();
    parent.add_fn(move || reentrant.unsubscribe());
    parent.add_fn(callback);

    // Act
    parent.unsubscribe();

    // Assert
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nested_dag_shared_child_runs_once() {
    // Arrange
    let root = Teardown::new();
    let left = Teardown::new();
    let right = Teardown::new();
    let shared = Teardown::new();
    let (count, callback) = counter();
    shared.add_fn(callback);
    left.add(shared.clone());
    right.add(shared.clone());
    root.add(left);
    root.add(right);

    // Act
    root.unsubscribe();

    // Assert
    assert!(shared.is_closed());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_child_closed_alone_is_pruned_from_all_parents() {
    // Arrange
    let first = Teardown::new();
    let second = Teardown::new();
    let child = Teardown::new();
    first.add(child.clone());
    second.add(child.clone());

    // Act
    child.unsubscribe();

    // Assert
    assert!(first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn test_remove_detaches_without_running() {
    // Arrange
    let parent = Teardown::new();
    let child = Teardown::new();
    parent.add(child.clone());

    // Act
    parent.remove(&child);
    parent.unsubscribe();

    // Assert
    assert!(!child.is_closed());
}

#[test]
fn test_adding_closed_child_is_noop() {
    let parent = Teardown::new();
    let child = Teardown::closed();

    parent.add(child);

    assert!(parent.is_empty());
}

#[test]
fn test_clones_share_state() {
    let teardown = Teardown::new();
    let clone = teardown.clone();

    clone.unsubscribe();

    assert!(teardown.is_closed());
    assert!(teardown.ptr_eq(&clone));
}

#[test]
fn test_dropping_handle_does_not_unsubscribe() {
    // Arrange
    let (count, callback) = counter();
    let teardown = Teardown::from_fn(callback);

    // Act
    drop(teardown);

    // Assert
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
