//! # Console Timeline
//!
//! Presentation adapter that renders a simulation run as a text timeline:
//! one row per task, a shared row for the winner of every tick, and a miss
//! report underneath.
//!
//! ## Philosophy
//!
//! - **Adapter, not engine**: This crate only consumes [`SimObserver`]
//!   callbacks. It holds no scheduling state and cannot influence the run;
//!   a rendering failure can never corrupt task state.
//! - **Render anywhere**: Output goes to any `io::Write`, so tests render
//!   into a buffer and the binary renders to stdout.
//!
//! Example output for the demo set under RMS:
//!
//! ```text
//! Scheduling policy: rms
//!
//!        |----|----
//!    A   A..A..A..A
//!    B   .B..B...B.
//!    C   ..C..C.C..
//!  run   ABCABCACBA
//! ```
//!
//! (The miss report, when any instance misses, follows the grid.)

use core_types::Tick;
use dispatcher::SimObserver;
use sched_policy::Policy;
use std::io;
use task_model::{Task, TaskSet};

/// Collects dispatch and miss callbacks into a renderable timeline.
pub struct TimelineRenderer {
    policy: Policy,
    names: Vec<String>,
    /// One row per task; `.` where the task did not run
    rows: Vec<Vec<char>>,
    /// Winner of every tick across the whole set; `.` for idle
    run_row: Vec<char>,
    misses: Vec<(String, Tick)>,
}

impl TimelineRenderer {
    /// Prepares an empty timeline for `runtime` ticks of the given set
    pub fn new(tasks: &TaskSet, policy: Policy, runtime: u64) -> Self {
        let width = runtime as usize;
        Self {
            policy,
            names: tasks.iter().map(|t| t.name().to_string()).collect(),
            rows: vec![vec!['.'; width]; tasks.len()],
            run_row: vec!['.'; width],
            misses: Vec::new(),
        }
    }

    /// Misses observed so far, as (task name, tick) pairs
    pub fn misses(&self) -> &[(String, Tick)] {
        &self.misses
    }

    /// Writes the timeline grid and the miss report
    pub fn render(&self, w: &mut impl io::Write) -> io::Result<()> {
        writeln!(w, "Scheduling policy: {}", self.policy)?;
        writeln!(w)?;

        let label_width = self
            .names
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(3);

        writeln!(w, " {:>width$}   {}", "", ruler(self.run_row.len()), width = label_width)?;
        for (name, row) in self.names.iter().zip(&self.rows) {
            let cells: String = row.iter().collect();
            writeln!(w, " {name:>label_width$}   {cells}")?;
        }
        let cells: String = self.run_row.iter().collect();
        writeln!(w, " {:>label_width$}   {cells}", "run")?;

        if !self.misses.is_empty() {
            writeln!(w)?;
            for (name, tick) in &self.misses {
                writeln!(w, "{name} missed its deadline at tick {tick}")?;
            }
        }
        Ok(())
    }
}

impl SimObserver for TimelineRenderer {
    fn on_dispatch(&mut self, task: &Task, tick: Tick) {
        let mark = task.name().chars().next().unwrap_or('?');
        let column = tick as usize;
        if let Some(row) = self.rows.get_mut(task.index().as_usize()) {
            if let Some(cell) = row.get_mut(column) {
                *cell = mark;
            }
        }
        if let Some(cell) = self.run_row.get_mut(column) {
            *cell = mark;
        }
    }

    fn on_deadline_miss(&mut self, task: &Task, tick: Tick) {
        self.misses.push((task.name().to_string(), tick));
    }
}

/// Tick ruler: a bar every five ticks, dashes between.
fn ruler(width: usize) -> String {
    (0..width).map(|x| if x % 5 == 0 { '|' } else { '-' }).collect()
}
