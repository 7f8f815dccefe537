//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use checkout_core::Money;

/// Supermarket checkout terminal.
#[derive(Debug, Parser)]
#[command(name = "checkout", version, about)]
pub struct Cli {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Price table file (.json or .toml). Overrides the config file.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub prices: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan items and print the receipt.
    Total {
        /// Items to scan. Each character is one item unless --split is given.
        items: String,

        /// Separator between item ids, e.g. `--split ,` for "COKE,COKE,CHIPS".
        #[arg(long, value_name = "CHAR")]
        split: Option<char>,

        /// Expected total (e.g. 32.40). Exit status 1 if it differs.
        #[arg(long, value_name = "AMOUNT")]
        expect: Option<Money>,

        /// Print the checkout as JSON instead of a receipt.
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in scenarios and report pass/fail.
    Demo,

    /// Validate every entry of the price table.
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_total_with_expect() {
        let cli = Cli::parse_from(["checkout", "total", "ABCD", "--expect", "15.40"]);
        match cli.command {
            Command::Total { items, expect, split, json } => {
                assert_eq!(items, "ABCD");
                assert_eq!(expect, Some(Money::from_cents(1540)));
                assert_eq!(split, None);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_prices_flag_after_subcommand() {
        let cli = Cli::parse_from(["checkout", "demo", "--prices", "p.json"]);
        assert_eq!(cli.prices, Some(PathBuf::from("p.json")));
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn test_bad_expect_amount_is_rejected() {
        let result = Cli::try_parse_from(["checkout", "total", "A", "--expect", "1.234"]);
        assert!(result.is_err());
    }
}
