//! # Scheduling Simulator Host Binary
//!
//! Command-line front end for the simulator: parses arguments, validates
//! them into a [`SimConfig`], and wires the dispatcher to the console
//! timeline renderer.
//!
//! All validation happens here, before the engine is constructed; by the
//! time the dispatch loop starts there is nothing left to go wrong.

use console_timeline::TimelineRenderer;
use dispatcher::Dispatcher;
use sched_policy::{ParsePolicyError, Policy};
use std::io;
use std::thread;
use std::time::Duration;
use task_model::{TaskParams, TaskSet, TaskSetError};
use thiserror::Error;

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Active scheduling policy
    pub policy: Policy,
    /// Number of ticks to simulate
    pub runtime: u64,
    /// Wall-clock pause between ticks; zero disables pacing
    pub sleep: Duration,
    /// Also dump the audit log as JSON lines after the timeline
    pub trace_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Rms,
            runtime: 25,
            sleep: Duration::ZERO,
            trace_json: false,
        }
    }
}

/// Outcome of argument parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum CliRequest {
    /// Run a simulation with this configuration
    Run(SimConfig),
    /// Print usage and exit successfully
    Help,
}

/// Configuration errors, all fatal before the simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidPolicy(#[from] ParsePolicyError),

    #[error("runtime must be a positive number of ticks, got `{value}`")]
    InvalidRuntime { value: String },

    #[error("sleep must be a non-negative number of seconds, got `{value}`")]
    InvalidSleep { value: String },

    #[error("missing value for `{flag}`")]
    MissingValue { flag: String },

    #[error("unknown option `{flag}`")]
    UnknownOption { flag: String },

    #[error(transparent)]
    InvalidTaskSet(#[from] TaskSetError),
}

/// Parses command-line arguments (excluding the program name).
pub fn parse_args(args: &[String]) -> Result<CliRequest, ConfigError> {
    let mut config = SimConfig::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--algorithm" | "-a" => {
                let value = flag_value(args, &mut i)?;
                config.policy = value.parse()?;
            }
            "--runtime" | "-r" => {
                let value = flag_value(args, &mut i)?;
                config.runtime = match value.parse::<u64>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(ConfigError::InvalidRuntime {
                            value: value.to_string(),
                        })
                    }
                };
            }
            "--sleep" | "-s" => {
                let value = flag_value(args, &mut i)?;
                // try_from_secs_f64 rejects NaN, negatives and values too
                // large for a Duration.
                config.sleep = match value.parse::<f64>().map(Duration::try_from_secs_f64) {
                    Ok(Ok(pause)) => pause,
                    _ => {
                        return Err(ConfigError::InvalidSleep {
                            value: value.to_string(),
                        })
                    }
                };
            }
            "--trace-json" => {
                config.trace_json = true;
            }
            "--help" | "-h" => {
                return Ok(CliRequest::Help);
            }
            other => {
                return Err(ConfigError::UnknownOption {
                    flag: other.to_string(),
                });
            }
        }
        i += 1;
    }

    Ok(CliRequest::Run(config))
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ConfigError> {
    let flag = args[*i].clone();
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or(ConfigError::MissingValue { flag })
}

/// The three-task demo set the simulator ships with.
///
/// A and B release immediately; C becomes eligible at tick 1. Total
/// utilization is 1/3 + 1/4 + 2/5, comfortably below one, so the feasible
/// policies schedule it without misses.
pub fn demo_task_set() -> Result<TaskSet, TaskSetError> {
    TaskSet::new(vec![
        TaskParams::new("A", 0, 1, 3, 3),
        TaskParams::new("B", 0, 1, 4, 4),
        TaskParams::new("C", 1, 2, 5, 5),
    ])
}

/// Runs one simulation over the demo set and renders it to `out`.
pub fn run(config: &SimConfig, out: &mut impl io::Write) -> Result<(), RunError> {
    let tasks = demo_task_set().map_err(ConfigError::from)?;

    let mut renderer = TimelineRenderer::new(&tasks, config.policy, config.runtime);
    let mut engine = Dispatcher::new(tasks, config.policy, config.runtime);

    if !config.sleep.is_zero() {
        let pause = config.sleep;
        engine.set_pacing_hook(Box::new(move |_| thread::sleep(pause)));
    }

    engine.run(&mut renderer);
    renderer.render(out)?;

    if config.trace_json {
        writeln!(out)?;
        for event in engine.events() {
            let line = serde_json::to_string(event).map_err(RunError::Trace)?;
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Failures surfaced by [`run`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize trace: {0}")]
    Trace(serde_json::Error),
}

/// Usage text for `--help` and argument errors.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -a, --algorithm <NAME>   Scheduling policy: rms, dms, edf or llf (default: rms)\n\
         \x20 -r, --runtime <TICKS>    Number of ticks to simulate (default: 25)\n\
         \x20 -s, --sleep <SECONDS>    Pause between ticks, fractional allowed (default: 0)\n\
         \x20     --trace-json         Also print the event trace as JSON lines\n\
         \x20 -h, --help               Print this help"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let parsed = parse_args(&[]).unwrap();
        assert_eq!(parsed, CliRequest::Run(SimConfig::default()));
    }

    #[test]
    fn test_full_invocation() {
        let parsed = parse_args(&args(&[
            "-a",
            "edf",
            "--runtime",
            "40",
            "-s",
            "0.25",
            "--trace-json",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            CliRequest::Run(SimConfig {
                policy: Policy::Edf,
                runtime: 40,
                sleep: Duration::from_millis(250),
                trace_json: true,
            })
        );
    }

    #[test]
    fn test_help_short_circuits() {
        let parsed = parse_args(&args(&["--help", "--bogus"])).unwrap();
        assert_eq!(parsed, CliRequest::Help);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = parse_args(&args(&["-a", "fifo"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPolicy(_)));
    }

    #[test]
    fn test_zero_runtime_rejected() {
        let err = parse_args(&args(&["-r", "0"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRuntime {
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn test_negative_sleep_rejected() {
        let err = parse_args(&args(&["-s", "-1"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSleep {
                value: "-1".to_string()
            }
        );
    }

    #[test]
    fn test_overflowing_sleep_rejected() {
        // Finite and non-negative, but far beyond what a Duration can hold.
        let err = parse_args(&args(&["-s", "1e30"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSleep {
                value: "1e30".to_string()
            }
        );
    }

    #[test]
    fn test_missing_value_reported_with_flag() {
        let err = parse_args(&args(&["--runtime"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingValue {
                flag: "--runtime".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = parse_args(&args(&["--colour"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownOption {
                flag: "--colour".to_string()
            }
        );
    }

    #[test]
    fn test_run_renders_timeline() {
        let config = SimConfig {
            runtime: 10,
            ..SimConfig::default()
        };
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Scheduling policy: rms"));
        assert!(output.contains(" run   ABCABCACBA"));
    }

    #[test]
    fn test_run_with_json_trace() {
        let config = SimConfig {
            runtime: 3,
            trace_json: true,
            ..SimConfig::default()
        };
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("TaskDispatched"));
    }
}
