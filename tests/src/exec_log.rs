use crate::DriverOp;

use std::{
    fmt,
    sync::{Arc, Mutex},
};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog<O, R> {
    ops: Arc<Mutex<Vec<DriverOp<O, R>>>>,
}

impl<O: Clone, R: Clone> ExecLog<O, R> {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp<O, R>>>>) -> Self {
        Self { ops }
    }

    pub(crate) fn handle(&self) -> Arc<Mutex<Vec<DriverOp<O, R>>>> {
        self.ops.clone()
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Check if any operation matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&O) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|op| predicate(&op.operation))
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&O) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    /// The logged operations, oldest first.
    pub fn operations(&self) -> Vec<O> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }

    pub fn last(&self) -> Option<O> {
        self.ops.lock().unwrap().last().map(|op| op.operation.clone())
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first operation from the log
    pub fn pop(&self) -> Option<DriverOp<O, R>> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }
}

impl<O, R> Clone for ExecLog<O, R> {
    fn clone(&self) -> Self {
        Self {
            ops: self.ops.clone(),
        }
    }
}

impl<O, R> fmt::Debug for ExecLog<O, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecLog").finish_non_exhaustive()
    }
}
