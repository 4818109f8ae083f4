//! Scheduling events for the audit trail

use core_types::{TaskIndex, Tick};
use serde::{Deserialize, Serialize};

/// One observable step of the simulation.
///
/// The dispatcher appends these to its audit log as they happen; the same
/// information reaches live observers through
/// [`SimObserver`](crate::SimObserver). Events for tick `t` are fully
/// recorded before tick `t + 1` begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    /// A task received one tick of execution
    TaskDispatched {
        task: TaskIndex,
        timestamp_ticks: Tick,
    },
    /// A task instance was found unable to finish by its deadline.
    /// Reported exactly once per instance.
    DeadlineMissed {
        task: TaskIndex,
        /// Absolute deadline of the missed instance
        deadline_tick: Tick,
        timestamp_ticks: Tick,
    },
    /// No task was eligible this tick
    IdleTick { timestamp_ticks: Tick },
}

impl ScheduleEvent {
    /// Tick at which the event occurred
    pub fn timestamp_ticks(&self) -> Tick {
        match self {
            ScheduleEvent::TaskDispatched {
                timestamp_ticks, ..
            }
            | ScheduleEvent::DeadlineMissed {
                timestamp_ticks, ..
            }
            | ScheduleEvent::IdleTick { timestamp_ticks } => *timestamp_ticks,
        }
    }
}
