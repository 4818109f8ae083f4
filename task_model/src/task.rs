//! Periodic task parameters and per-instance state

use core_types::{TaskIndex, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static parameters of a periodic task.
///
/// All four timing parameters are in ticks. An instance of the task becomes
/// eligible at `release`, needs `execution` ticks of processor time, must
/// finish within `relative_deadline` ticks of its activation, and activates
/// again every `period` ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    /// Display name, unique within a task set
    pub name: String,
    /// First activation tick
    pub release: Tick,
    /// Ticks of work per instance
    pub execution: u64,
    /// Ticks after activation by which an instance must finish
    pub relative_deadline: u64,
    /// Ticks between successive activations
    pub period: u64,
}

impl TaskParams {
    /// Creates a task parameter block
    pub fn new(
        name: impl Into<String>,
        release: Tick,
        execution: u64,
        relative_deadline: u64,
        period: u64,
    ) -> Self {
        Self {
            name: name.into(),
            release,
            execution,
            relative_deadline,
            period,
        }
    }
}

/// A periodic task: static parameters plus the dynamic state of its current
/// instance.
///
/// Dynamic state is mutated only by the dispatcher, through
/// [`record_execution_tick`](Task::record_execution_tick),
/// [`check_and_rollover`](Task::check_and_rollover) and
/// [`check_deadline`](Task::check_deadline). Two invariants hold at all
/// times: `consumed <= execution`, and
/// `absolute_deadline == period_start + relative_deadline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    index: TaskIndex,
    params: TaskParams,
    /// Execution ticks already granted to the current instance
    consumed: u64,
    /// Absolute tick at which the current instance became eligible
    period_start: Tick,
    /// Absolute tick by which the current instance must finish
    absolute_deadline: Tick,
    /// Latched once the current instance's miss has been reported
    miss_reported: bool,
}

impl Task {
    /// Builds a task at its initial state. Indices are assigned by
    /// [`TaskSet`](crate::TaskSet) from set order.
    pub(crate) fn new(index: TaskIndex, params: TaskParams) -> Self {
        let period_start = params.release;
        let absolute_deadline = period_start + params.relative_deadline;
        Self {
            index,
            params,
            consumed: 0,
            period_start,
            absolute_deadline,
            miss_reported: false,
        }
    }

    /// Stable position of this task within its set
    pub fn index(&self) -> TaskIndex {
        self.index
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Static parameters
    pub fn params(&self) -> &TaskParams {
        &self.params
    }

    /// Activation period in ticks
    pub fn period(&self) -> u64 {
        self.params.period
    }

    /// Relative deadline in ticks
    pub fn relative_deadline(&self) -> u64 {
        self.params.relative_deadline
    }

    /// Ticks of work per instance
    pub fn execution(&self) -> u64 {
        self.params.execution
    }

    /// Execution ticks already granted to the current instance
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Ticks of work the current instance still needs
    pub fn remaining(&self) -> u64 {
        self.params.execution - self.consumed
    }

    /// Absolute tick at which the current instance became eligible
    pub fn period_start(&self) -> Tick {
        self.period_start
    }

    /// Absolute tick by which the current instance must finish
    pub fn absolute_deadline(&self) -> Tick {
        self.absolute_deadline
    }

    /// Returns true if this task is eligible for selection at tick `t`.
    ///
    /// A task stays eligible from its period start until it completes and
    /// rolls over; there is no de-release.
    pub fn is_ready(&self, t: Tick) -> bool {
        t >= self.period_start
    }

    /// Grants one tick of execution to the current instance.
    ///
    /// Called at most once per tick, only on the dispatched task.
    pub fn record_execution_tick(&mut self) {
        debug_assert!(self.consumed < self.params.execution);
        self.consumed += 1;
    }

    /// Advances to the next instance if the current one just completed.
    ///
    /// This is the only place the period and deadline move. Returns true if
    /// the rollover fired.
    pub fn check_and_rollover(&mut self) -> bool {
        if self.consumed == self.params.execution {
            self.consumed = 0;
            self.period_start += self.params.period;
            self.absolute_deadline = self.period_start + self.params.relative_deadline;
            self.miss_reported = false;
            true
        } else {
            false
        }
    }

    /// Returns true if the current instance cannot finish by its deadline.
    ///
    /// The condition is remaining-work-aware slack: the instance has missed
    /// once `absolute_deadline - t < execution - consumed`, i.e. the work
    /// left no longer fits before the deadline even if the task runs every
    /// remaining tick. Instances not yet released cannot miss.
    pub fn deadline_missed(&self, t: Tick) -> bool {
        if !self.is_ready(t) {
            return false;
        }
        // t may already be past the deadline, so compare in signed space.
        (self.absolute_deadline as i64 - t as i64) < self.remaining() as i64
    }

    /// Checks the deadline at tick `t`, latching the result.
    ///
    /// Returns true only the first time the current instance is found to
    /// have missed; the latch clears when the instance rolls over, so each
    /// miss is reported exactly once.
    pub fn check_deadline(&mut self, t: Tick) -> bool {
        if self.miss_reported || !self.deadline_missed(t) {
            return false;
        }
        self.miss_reported = true;
        true
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (consumed {}/{}, period start {}, deadline {})",
            self.params.name,
            self.consumed,
            self.params.execution,
            self.period_start,
            self.absolute_deadline
        )
    }
}
