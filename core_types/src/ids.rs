//! Identifiers for simulated entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable position of a task within its task set.
///
/// Indices are assigned from the task-set order at construction time and
/// never change for the lifetime of a simulation. They are used for display
/// and for deterministic tie-breaking between equal-priority tasks; they
/// carry no scheduling priority of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskIndex(usize);

impl TaskIndex {
    /// Creates a task index from a position in the task set
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the position as a plain usize
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}
