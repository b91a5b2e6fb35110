//! pacscan CLI - report foreign packages superseded by sync repositories

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pacscan::ops::{exit_status, run};
use pacscan::{ScanError, Shell};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pacscan=debug")
        } else {
            EnvFilter::new("pacscan=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.color, cli.json);
    let opts = cli.scan_options();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&opts, &shell, &mut out) {
        Ok(count) => ExitCode::from(exit_status(count)),
        Err(e) => {
            // The exit code still counts the lines that made it out.
            shell.error(format!("{:#}", e));
            let written = e
                .downcast_ref::<ScanError>()
                .map_or(0, ScanError::lines_written);
            ExitCode::from(exit_status(written))
        }
    }
}
