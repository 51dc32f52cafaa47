//! # locadora-quote Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments (clap prints usage and exits on errors or `--help`)
//! 2. Initialize tracing (logging to stderr)
//! 3. Load configuration from `LOCADORA_*` variables
//! 4. Read exports, compute the invoice, print it

use std::process::ExitCode;

use clap::Parser;
use locadora_quote::Args;
use tracing::error;

fn main() -> ExitCode {
    let args = Args::parse();
    locadora_quote::init_tracing();

    match locadora_quote::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "quote failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
