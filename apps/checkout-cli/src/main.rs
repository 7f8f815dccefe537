//! # Checkout Entry Point
//!
//! ```bash
//! # Total a basket against the demo prices
//! checkout total ABCDABAA --expect 32.40
//!
//! # Use your own price table
//! checkout --prices ./prices.json total "COKE,COKE,CHIPS" --split ,
//!
//! # Run the built-in scenarios / validate a price file
//! checkout demo
//! checkout --prices ./prices.toml check
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    checkout_cli::run()
}
