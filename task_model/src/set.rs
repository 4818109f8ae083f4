//! Validated, ordered task sets

use crate::task::{Task, TaskParams};
use core_types::TaskIndex;
use std::collections::HashSet;
use thiserror::Error;

/// Validation failures raised when a [`TaskSet`] is built.
///
/// These are the only errors the simulator produces: the dispatch loop runs
/// over an already-validated set and cannot fail mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskSetError {
    /// Execution time of zero can never make progress
    #[error("task `{name}`: execution time must be positive")]
    ZeroExecution { name: String },

    /// A zero relative deadline is missed before the instance can start
    #[error("task `{name}`: relative deadline must be positive")]
    ZeroDeadline { name: String },

    /// A zero period would re-activate the task within the same tick
    #[error("task `{name}`: period must be positive")]
    ZeroPeriod { name: String },

    /// The instance could never finish before its own rollover
    #[error("task `{name}`: execution time {execution} exceeds period {period}")]
    ExecutionExceedsPeriod {
        name: String,
        execution: u64,
        period: u64,
    },

    /// Constrained-deadline model: the deadline may not outlive the period
    #[error("task `{name}`: relative deadline {relative_deadline} exceeds period {period}")]
    DeadlineExceedsPeriod {
        name: String,
        relative_deadline: u64,
        period: u64,
    },

    /// Task names identify timeline rows and must be unique
    #[error("duplicate task name `{name}`")]
    DuplicateName { name: String },
}

/// An ordered sequence of tasks, fixed for the whole run.
///
/// Set order is used for stable tie-breaking and display, never for
/// scheduling priority itself. Construction validates every descriptor;
/// an empty set is legal and simply produces idle ticks.
#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Builds a task set, validating each descriptor and name uniqueness.
    ///
    /// Indices are assigned from position in `params`. Note that
    /// `execution > relative_deadline` is allowed: a task guaranteed to miss
    /// is a legitimate input for demonstrating miss reporting.
    pub fn new(params: Vec<TaskParams>) -> Result<Self, TaskSetError> {
        let mut seen = HashSet::new();
        for p in &params {
            if p.execution == 0 {
                return Err(TaskSetError::ZeroExecution {
                    name: p.name.clone(),
                });
            }
            if p.relative_deadline == 0 {
                return Err(TaskSetError::ZeroDeadline {
                    name: p.name.clone(),
                });
            }
            if p.period == 0 {
                return Err(TaskSetError::ZeroPeriod {
                    name: p.name.clone(),
                });
            }
            if p.execution > p.period {
                return Err(TaskSetError::ExecutionExceedsPeriod {
                    name: p.name.clone(),
                    execution: p.execution,
                    period: p.period,
                });
            }
            if p.relative_deadline > p.period {
                return Err(TaskSetError::DeadlineExceedsPeriod {
                    name: p.name.clone(),
                    relative_deadline: p.relative_deadline,
                    period: p.period,
                });
            }
            if !seen.insert(p.name.clone()) {
                return Err(TaskSetError::DuplicateName {
                    name: p.name.clone(),
                });
            }
        }

        let tasks = params
            .into_iter()
            .enumerate()
            .map(|(position, p)| Task::new(TaskIndex::new(position), p))
            .collect();
        Ok(Self { tasks })
    }

    /// Number of tasks in the set
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the set has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in set order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task by index
    pub fn get(&self, index: TaskIndex) -> Option<&Task> {
        self.tasks.get(index.as_usize())
    }

    /// Mutable task by index; used by the dispatcher only
    pub fn get_mut(&mut self, index: TaskIndex) -> Option<&mut Task> {
        self.tasks.get_mut(index.as_usize())
    }

    /// Iterates tasks in set order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Iterates tasks mutably in set order; used by the dispatcher only
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.iter_mut()
    }
}
