//! # Scheduling Policies
//!
//! This crate defines the four classical uniprocessor scheduling policies
//! the simulator supports, as a single closed enum with one pure method.
//!
//! ## Philosophy
//!
//! - **Mechanism not policy**: The dispatcher holds a [`Policy`] value and
//!   never knows which variant it is; all policy knowledge lives here.
//! - **Pure keys**: A policy maps `(task, tick)` to an orderable key and
//!   nothing else. Lower key means higher priority. Tie-breaking is the
//!   dispatcher's job (stable set order), never left unspecified.
//! - **Closed set**: The variants are a fixed enumeration selected once at
//!   configuration time, not a runtime-mutable property of any task.

use core_types::Tick;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use task_model::Task;
use thiserror::Error;

/// A scheduling policy, fixed for an entire simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Rate Monotonic: shorter period wins. Static priority.
    Rms,
    /// Deadline Monotonic: shorter relative deadline wins. Static priority.
    Dms,
    /// Earliest Deadline First: closest absolute deadline wins. Dynamic.
    Edf,
    /// Least Laxity First: least slack for the remaining work wins. Dynamic.
    Llf,
}

impl Policy {
    /// Priority key of `task` at tick `t`; lower means higher priority.
    ///
    /// RMS and DMS keys are independent of `t`. EDF and LLF keys are signed
    /// because a task that has already passed its deadline has a negative
    /// distance (and laxity), which correctly keeps it at the front.
    pub fn key(&self, task: &Task, t: Tick) -> i64 {
        match self {
            Policy::Rms => task.period() as i64,
            Policy::Dms => task.relative_deadline() as i64,
            Policy::Edf => task.absolute_deadline() as i64 - t as i64,
            // Laxity from remaining work: slack left if the task ran
            // uninterrupted from now on.
            Policy::Llf => {
                task.absolute_deadline() as i64 - task.remaining() as i64 - t as i64
            }
        }
    }

    /// Canonical lower-case name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Rms => "rms",
            Policy::Dms => "dms",
            Policy::Edf => "edf",
            Policy::Llf => "llf",
        }
    }

    /// All supported policies, in display order
    pub fn all() -> [Policy; 4] {
        [Policy::Rms, Policy::Dms, Policy::Edf, Policy::Llf]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to translate a policy name from configuration input.
///
/// Raised before the simulation engine is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePolicyError {
    #[error("unknown scheduling policy `{0}` (expected rms, dms, edf or llf)")]
    Unknown(String),
}

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rms" => Ok(Policy::Rms),
            "dms" => Ok(Policy::Dms),
            "edf" => Ok(Policy::Edf),
            "llf" => Ok(Policy::Llf),
            other => Err(ParsePolicyError::Unknown(other.to_string())),
        }
    }
}
