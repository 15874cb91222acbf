//! mydb CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Delegates argument parsing, configuration and the session to `cli::run`
//! 2. Prints errors to stderr
//! 3. Exits with non-zero on failure
//!
//! A table whose meta-data cannot be read ends the session normally; only
//! configuration and terminal I/O failures produce a non-zero exit.

use mydb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
