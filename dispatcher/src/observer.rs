//! Live observation of simulation progress

use core_types::Tick;
use task_model::Task;

/// Callbacks a presentation adapter implements to watch a simulation run.
///
/// This is the only way downstream code observes progress live; the core
/// hard-wires no rendering. All methods have no-op defaults so adapters only
/// implement what they care about. Within a tick, `on_dispatch` (or
/// `on_idle_tick`) always precedes any `on_deadline_miss` calls.
pub trait SimObserver {
    /// The given task received one tick of execution at `tick`
    fn on_dispatch(&mut self, task: &Task, tick: Tick) {
        let _ = (task, tick);
    }

    /// The given task's current instance missed its deadline at `tick`
    fn on_deadline_miss(&mut self, task: &Task, tick: Tick) {
        let _ = (task, tick);
    }

    /// No task was eligible at `tick`
    fn on_idle_tick(&mut self, tick: Tick) {
        let _ = tick;
    }
}

/// Observer that ignores everything; for runs inspected via the audit log.
pub struct NullObserver;

impl SimObserver for NullObserver {}
