//! # Scheduling Contract Tests
//!
//! Cross-crate "golden" tests for the simulator: hand-derived schedules for
//! the classic demo task set, overload behavior, and replay determinism.
//!
//! ## Philosophy
//!
//! - **Schedules as contracts**: The exact dispatch sequence each policy
//!   produces for a known task set is part of the simulator's contract.
//!   These tests fail when the selection or rollover semantics drift.
//! - **Derived by hand**: Every expected sequence here was worked out on
//!   paper from the policy definitions, not captured from a previous run.

pub mod determinism;
pub mod scenarios;

/// Common helpers for driving full simulation runs
pub mod test_helpers {
    use dispatcher::{Dispatcher, NullObserver, ScheduleEvent};
    use sched_policy::Policy;
    use task_model::{TaskParams, TaskSet};

    /// The demo set: A(r0 e1 d3 p3), B(r0 e1 d4 p4), C(r1 e2 d5 p5).
    /// Total utilization 1/3 + 1/4 + 2/5 < 1.
    pub fn demo_set() -> TaskSet {
        TaskSet::new(vec![
            TaskParams::new("A", 0, 1, 3, 3),
            TaskParams::new("B", 0, 1, 4, 4),
            TaskParams::new("C", 1, 2, 5, 5),
        ])
        .expect("demo set is valid")
    }

    /// Runs a full simulation and returns the finished dispatcher
    pub fn run_simulation(tasks: TaskSet, policy: Policy, runtime: u64) -> Dispatcher {
        let mut dispatcher = Dispatcher::new(tasks, policy, runtime);
        dispatcher.run(&mut NullObserver);
        dispatcher
    }

    /// Per-tick outcome as a string of task names, `.` for idle ticks
    pub fn dispatch_sequence(dispatcher: &Dispatcher) -> String {
        dispatcher
            .events()
            .iter()
            .filter_map(|event| match event {
                ScheduleEvent::TaskDispatched { task, .. } => {
                    Some(dispatcher.tasks().get(*task).expect("known index").name())
                }
                ScheduleEvent::IdleTick { .. } => Some("."),
                ScheduleEvent::DeadlineMissed { .. } => None,
            })
            .collect()
    }

    /// All recorded misses as (task name, deadline tick, miss tick)
    pub fn misses(dispatcher: &Dispatcher) -> Vec<(String, u64, u64)> {
        dispatcher
            .events()
            .iter()
            .filter_map(|event| match event {
                ScheduleEvent::DeadlineMissed {
                    task,
                    deadline_tick,
                    timestamp_ticks,
                } => Some((
                    dispatcher
                        .tasks()
                        .get(*task)
                        .expect("known index")
                        .name()
                        .to_string(),
                    *deadline_tick,
                    *timestamp_ticks,
                )),
                _ => None,
            })
            .collect()
    }
}
