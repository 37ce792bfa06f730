//! `conclave` console entry point.
//!
//! # Responsibility
//! - Resolve configuration, optional file logging, and the database connection.
//! - Hand stdin/stdout to the interactive console.

mod config;
mod console;
mod prompt;
mod render;

use clap::Parser;
use conclave_core::db::{open_db, seed_demo};
use conclave_core::{init_logging, sqlite_service};
use config::Args;
use console::Console;
use log::error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        if let Err(err) = init_logging(args.log_level(), log_dir) {
            eprintln!("Logging disabled: {err}");
        }
    }

    let mut conn = match open_db(&args.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Database connection error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.seed_demo {
        if let Err(err) = seed_demo(&mut conn) {
            eprintln!("Demo data error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let service = match sqlite_service(&conn) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Database connection error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(&service, stdin.lock(), stdout.lock(), args.json);
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=console_run module=cli status=error error={err}");
            eprintln!("Console error: {err}");
            ExitCode::FAILURE
        }
    }
}
