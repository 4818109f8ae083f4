//! # Dispatcher
//!
//! This crate implements the discrete-time dispatch loop at the heart of
//! the scheduling simulator.
//!
//! ## Philosophy
//!
//! - **Determinism first**: Same task set + same policy + same runtime =>
//!   same event sequence. The loop never consults wall-clock time.
//! - **No hidden output**: Progress is observable only through the
//!   [`SimObserver`] callbacks and the [`ScheduleEvent`] audit log; the
//!   dispatcher renders nothing itself.
//! - **Idle is not an error**: A tick with no eligible task is a modeled
//!   outcome, not an exceptional path.
//! - **Validated input only**: The dispatcher runs over a [`TaskSet`] that
//!   was checked at construction; the loop itself is infallible.
//!
//! ## Tick anatomy
//!
//! For each tick `t`: check the cancel token, build the ready set, select
//! the minimum-key task (ties broken by set order), grant it one tick of
//! execution, roll it over if complete, then sweep the whole set for newly
//! missed deadlines. Pacing, if configured, happens after the tick's events
//! are fully emitted.

pub mod cancel;
pub mod events;
pub mod observer;

pub use cancel::CancelToken;
pub use events::ScheduleEvent;
pub use observer::{NullObserver, SimObserver};

use core_types::{TaskIndex, Tick};
use sched_policy::Policy;
use task_model::TaskSet;

/// Optional per-tick delay supplied by the caller.
///
/// Invoked once per tick, after that tick's events; the dispatcher has no
/// opinion on what it does or how long it takes.
pub type PacingHook = Box<dyn FnMut(Tick)>;

/// The simulation loop: owns the task set for the duration of the run.
pub struct Dispatcher {
    tasks: TaskSet,
    policy: Policy,
    runtime: u64,
    current_tick: Tick,
    events: Vec<ScheduleEvent>,
    pacing: Option<PacingHook>,
    cancel: Option<CancelToken>,
}

impl Dispatcher {
    /// Creates a dispatcher over a validated task set.
    ///
    /// `runtime` is the number of ticks to simulate and the sole termination
    /// condition; callers validate it before construction (see the binary's
    /// config layer). A runtime of zero simulates nothing.
    pub fn new(tasks: TaskSet, policy: Policy, runtime: u64) -> Self {
        Self {
            tasks,
            policy,
            runtime,
            current_tick: 0,
            events: Vec::new(),
            pacing: None,
            cancel: None,
        }
    }

    /// Installs a per-tick pacing hook
    pub fn set_pacing_hook(&mut self, hook: PacingHook) {
        self.pacing = Some(hook);
    }

    /// Installs a cancellation token, checked once per tick boundary
    pub fn set_cancel_token(&mut self, token: CancelToken) {
        self.cancel = Some(token);
    }

    /// The active policy
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Number of ticks this run simulates
    pub fn runtime(&self) -> u64 {
        self.runtime
    }

    /// Next tick to be simulated
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// The task set, for inspection by adapters and tests
    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    /// The audit log of everything that has happened so far
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// Number of deadline misses recorded so far
    pub fn total_misses(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ScheduleEvent::DeadlineMissed { .. }))
            .count()
    }

    /// Runs until `runtime` ticks have elapsed or the cancel token fires.
    pub fn run(&mut self, observer: &mut dyn SimObserver) {
        while self.current_tick < self.runtime {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                break;
            }
            self.step(observer);
        }
    }

    /// Simulates exactly one tick.
    pub fn step(&mut self, observer: &mut dyn SimObserver) {
        let t = self.current_tick;

        match self.select(t) {
            Some(index) => {
                if let Some(task) = self.tasks.get_mut(index) {
                    task.record_execution_tick();
                }
                self.events.push(ScheduleEvent::TaskDispatched {
                    task: index,
                    timestamp_ticks: t,
                });
                if let Some(task) = self.tasks.get(index) {
                    observer.on_dispatch(task, t);
                }
                // Completion bookkeeping happens before the deadline sweep,
                // so a task finishing exactly at its deadline is not a miss.
                if let Some(task) = self.tasks.get_mut(index) {
                    task.check_and_rollover();
                }
            }
            None => {
                self.events.push(ScheduleEvent::IdleTick { timestamp_ticks: t });
                observer.on_idle_tick(t);
            }
        }

        self.sweep_deadlines(t, observer);

        self.current_tick += 1;
        if let Some(pace) = self.pacing.as_mut() {
            pace(t);
        }
    }

    /// Picks the ready task with the minimum policy key at tick `t`.
    ///
    /// Strictly-less comparison over set order keeps the first of any tied
    /// group, which is the stable tie-break the model requires.
    fn select(&self, t: Tick) -> Option<TaskIndex> {
        let mut best: Option<(i64, TaskIndex)> = None;
        for task in self.tasks.iter() {
            if !task.is_ready(t) {
                continue;
            }
            let key = self.policy.key(task, t);
            match best {
                Some((best_key, _)) if key >= best_key => {}
                _ => best = Some((key, task.index())),
            }
        }
        best.map(|(_, index)| index)
    }

    /// Checks every task for a newly missed deadline, in set order.
    fn sweep_deadlines(&mut self, t: Tick, observer: &mut dyn SimObserver) {
        let mut missed: Vec<(TaskIndex, Tick)> = Vec::new();
        for task in self.tasks.iter_mut() {
            if task.check_deadline(t) {
                missed.push((task.index(), task.absolute_deadline()));
            }
        }
        for (index, deadline_tick) in missed {
            self.events.push(ScheduleEvent::DeadlineMissed {
                task: index,
                deadline_tick,
                timestamp_ticks: t,
            });
            if let Some(task) = self.tasks.get(index) {
                observer.on_deadline_miss(task, t);
            }
        }
    }
}
