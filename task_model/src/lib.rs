//! # Task Model
//!
//! This crate defines the periodic task model used by the scheduling
//! simulator: static task parameters, per-instance dynamic state, and the
//! validated task set the dispatcher runs over.
//!
//! ## Philosophy
//!
//! - **Validate at the edge**: Malformed parameters are rejected when a
//!   [`TaskSet`] is built, never mid-simulation. The dispatch loop assumes a
//!   validated set and has no recovery paths.
//! - **Explicit state transitions**: Dynamic state changes only through the
//!   three named operations (execute, rollover, deadline check). There are no
//!   side channels.
//! - **Determinism first**: Same parameters produce the same state evolution,
//!   tick for tick.
//!
//! ## Key Types
//!
//! - [`TaskParams`]: Immutable per-task parameters
//! - [`Task`]: Parameters plus the dynamic state of the current instance
//! - [`TaskSet`]: Ordered, validated collection of tasks
//! - [`TaskSetError`]: Construction-time validation failures

pub mod set;
pub mod task;

pub use set::{TaskSet, TaskSetError};
pub use task::{Task, TaskParams};
