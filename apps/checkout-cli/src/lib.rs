//! # Checkout CLI Library
//!
//! Wiring for the `checkout` binary: arguments, config, logging, and the
//! terminal the subcommands run against.
//!
//! ## Module Organization
//! ```text
//! checkout_cli/
//! ├── lib.rs       ◄─── You are here (startup & dispatch)
//! ├── cli.rs       ◄─── clap argument definitions
//! ├── config.rs    ◄─── TOML config, env overrides, price table files
//! ├── commands.rs  ◄─── total / demo / check
//! ├── demo.rs      ◄─── reference price table and scenarios
//! └── error.rs     ◄─── AppError
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod demo;
pub mod error;

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use checkout_core::CheckoutTerminal;

use cli::{Cli, Command};
use commands::TotalOptions;
use config::{TerminalConfig, DEFAULT_LOG_FILTER};
use error::AppResult;

/// Handle for swapping the log filter once the config is known.
type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Runs the CLI and returns the process exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments                                                    │
/// │  2. Initialize logging (RUST_LOG, else the default filter)             │
/// │  3. Load config (defaults → file → environment)                        │
/// │     • terminal.log_filter replaces the default unless RUST_LOG is set  │
/// │  4. Resolve price table (--prices → pricing.path → pricing.items →     │
/// │     demo table)                                                        │
/// │  5. Configure terminal and dispatch the subcommand                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let filter_handle = init_tracing();

    let config = match TerminalConfig::load(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load config");
            eprintln!("checkout: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(handle) = &filter_handle {
        apply_log_filter(handle, &config.terminal.log_filter);
    }

    match execute(&cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("checkout: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, config: &TerminalConfig) -> AppResult<bool> {
    let prices = match config.price_table(cli.prices.as_deref())? {
        Some(prices) => prices,
        None => {
            info!("No price table configured, using the demo table");
            demo::demo_price_table()
        }
    };

    let mut terminal = CheckoutTerminal::new();
    terminal.configure_pricing(prices);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let ok = match &cli.command {
        Command::Total {
            items,
            split,
            expect,
            json,
        } => {
            let options = TotalOptions {
                split: *split,
                expect: *expect,
                json: *json,
            };
            commands::total(&mut terminal, &config.terminal.name, items, &options, &mut out)?
        }
        Command::Demo => commands::demo(&mut terminal, &mut out)?,
        Command::Check => commands::check(&terminal, &mut out)?,
    };

    out.flush()?;
    Ok(ok)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every scan and total
/// - `RUST_LOG=checkout_core=trace` - Core crate only
/// - Default: `DEFAULT_LOG_FILTER`, then `terminal.log_filter` from config
///
/// Logs go to stderr so receipts on stdout stay clean. Returns a reload
/// handle only when `RUST_LOG` is unset, since `RUST_LOG` always wins.
fn init_tracing() -> Option<FilterHandle> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    (!env_set).then_some(handle)
}

/// Swaps in the configured filter. An unparsable filter keeps the default.
fn apply_log_filter(handle: &FilterHandle, directives: &str) {
    let filter = match parse_log_filter(directives) {
        Ok(filter) => filter,
        Err(e) => {
            warn!(filter = %directives, error = %e, "Invalid terminal.log_filter, keeping default");
            return;
        }
    };

    if let Err(e) = handle.reload(filter) {
        warn!(error = %e, "Could not apply terminal.log_filter");
    }
}

fn parse_log_filter(directives: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_new(directives)
}
