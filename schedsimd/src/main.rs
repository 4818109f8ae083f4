//! # Scheduling Simulator
//!
//! Entry point: visualizes RMS/DMS/EDF/LLF scheduling decisions for the
//! demo task set, tick by tick, on stdout.

use schedsimd::{parse_args, run, usage, CliRequest};
use std::env;
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (program, rest) = match args.split_first() {
        Some((program, rest)) => (program.as_str(), rest),
        None => ("schedsimd", &[][..]),
    };

    let config = match parse_args(rest) {
        Ok(CliRequest::Run(config)) => config,
        Ok(CliRequest::Help) => {
            println!("{}", usage(program));
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
