//! HexView-style CLI argument parsing and execution.
//!
//! Options take a `/` or `-` prefix and `:` or `=` value separators and are
//! matched case-insensitively. Processing order:
//! 1. Apply parameter file (/P) for settings not given on the command line
//! 2. Load the input file
//! 3. Append further files (/A)
//! 4. Delete blocks (/D)
//! 5. Print the block listing unless silent (/S)
//! 6. Export (/XI, /XN, /XB)

mod error;
mod execute;
mod ini;
mod io;
mod parse;
mod parse_util;
mod types;

use std::process::ExitCode;

use tracing::Level;

pub use types::Args;

fn init_logging(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.silent {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&args);

    if let Some(ref path) = args.error_log {
        let _ = std::fs::write(path, "");
    }

    if let Err(e) = args.execute() {
        if let Some(ref path) = args.error_log {
            let _ = std::fs::write(path, format!("{e}\n"));
        }
        if !args.silent {
            eprintln!("Error: {e}");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
