//! # Core Types
//!
//! This crate defines the fundamental types shared across the scheduling
//! simulator.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Task identity is a position, assigned once
//!   at construction. There is no global counter and no hidden state.
//! - **Determinism first**: Identical inputs produce identical identifiers,
//!   so simulations replay exactly.
//!
//! ## Key Types
//!
//! - [`TaskIndex`]: Stable position of a task within its task set
//! - [`Tick`]: One discrete unit of simulated time

pub mod ids;

pub use ids::TaskIndex;

/// One discrete unit of simulated time.
///
/// The simulation loop advances a `Tick` counter from zero; nothing in the
/// core ever consults wall-clock time.
pub type Tick = u64;
