//! Toolbelt command-line runner.
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. Logs go to stderr.

#![forbid(unsafe_code)]

mod cli_config;
mod dispatch;

use std::io::{self, BufRead, Write};

use toolbelt_core::{AppError, AppResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli_config::CliConfig;
use crate::dispatch::Dispatcher;

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = CliConfig::load()?;
    let dispatcher = Dispatcher::new(&config);

    info!(
        window_ms = config.rate_limit.window_ms,
        max_requests = config.rate_limit.max_requests,
        password_min_length = config.password_min_length,
        "toolbelt started"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut handled = 0_u64;

    for line in stdin.lock().lines() {
        let line = line
            .map_err(|error| AppError::Internal(format!("failed to read request: {error}")))?;
        if line.trim().is_empty() {
            continue;
        }

        let response = dispatcher.handle_line(&line);
        writeln!(stdout, "{response}")
            .map_err(|error| AppError::Internal(format!("failed to write response: {error}")))?;
        handled += 1;
    }

    info!(handled, "toolbelt finished");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
