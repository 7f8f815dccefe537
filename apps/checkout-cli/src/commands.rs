//! # Commands
//!
//! One function per subcommand. Each writes its report to `out` and
//! returns whether the command succeeded (drives the exit status).
//!
//! ```text
//! checkout total ABCD ──► total() ──► scan ──► calculate_total ──► receipt
//! checkout demo ────────► demo()  ──► run_scenarios ─────────────► PASS/FAIL
//! checkout check ───────► check() ──► validate_price_table ──────► issues
//! ```

use std::io::Write;
use tracing::{info, warn};

use checkout_core::validation::validate_price_table;
use checkout_core::{Checkout, CheckoutTerminal, Money};

use crate::demo::{run_scenarios, SCENARIOS};
use crate::error::AppResult;

/// Options for `checkout total`.
#[derive(Debug, Clone, Default)]
pub struct TotalOptions {
    pub split: Option<char>,
    pub expect: Option<Money>,
    pub json: bool,
}

/// Scans `items`, prints the receipt, and checks `--expect`.
pub fn total(
    terminal: &mut CheckoutTerminal,
    terminal_name: &str,
    items: &str,
    options: &TotalOptions,
    out: &mut dyn Write,
) -> AppResult<bool> {
    terminal.clear_all();
    let mut warnings = match options.split {
        Some(sep) => terminal.scan_all(items.split(sep).filter(|id| !id.is_empty())),
        None => terminal.scan_sequence(items),
    };

    let mut checkout = terminal.calculate_total();
    // Rejected scans go on the receipt ahead of pricing warnings.
    warnings.append(&mut checkout.warnings);
    checkout.warnings = warnings;

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &checkout)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_receipt(terminal_name, &checkout))?;
    }

    match options.expect {
        Some(expected) if expected != checkout.total => {
            warn!(%expected, actual = %checkout.total, "Total does not match expectation");
            writeln!(out, "MISMATCH: expected {}, got {}", expected, checkout.total)?;
            Ok(false)
        }
        _ => Ok(true),
    }
}

/// Formats a checkout as a plain-text receipt.
pub fn render_receipt(terminal_name: &str, checkout: &Checkout) -> String {
    let mut receipt = String::new();
    receipt.push_str(&format!("{}\n", terminal_name));
    receipt.push_str(&format!(
        "Started {}\n",
        checkout.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    receipt.push_str(&"-".repeat(40));
    receipt.push('\n');

    for line in &checkout.lines {
        receipt.push_str(&format!(
            "{:<8} x{:<4} {:>12}  ({})\n",
            line.item_id, line.count, line.amount, line.rule
        ));
    }

    receipt.push_str(&"-".repeat(40));
    receipt.push('\n');
    receipt.push_str(&format!("{:<14} {:>12}\n", "TOTAL", checkout.total));

    for warning in &checkout.warnings {
        receipt.push_str(&format!("! {}\n", warning));
    }

    receipt
}

/// Runs the built-in scenarios against the terminal's current prices.
pub fn demo(terminal: &mut CheckoutTerminal, out: &mut dyn Write) -> AppResult<bool> {
    let results = run_scenarios(terminal, SCENARIOS);

    for result in &results {
        let label = if result.scenario.items.is_empty() {
            "(no items)"
        } else {
            result.scenario.items
        };

        let rejected = match result.rejected {
            0 => String::new(),
            n => format!(" ({} rejected)", n),
        };

        if result.passed() {
            writeln!(out, "PASS  {:<12} {}{}", label, result.actual, rejected)?;
        } else {
            writeln!(
                out,
                "FAIL  {:<12} expected {}, actual {}{}",
                label, result.scenario.expected, result.actual, rejected
            )?;
        }
    }

    let failed = results.iter().filter(|r| !r.passed()).count();
    info!(total = results.len(), failed, "Demo scenarios finished");
    writeln!(out, "{} passed, {} failed", results.len() - failed, failed)?;

    Ok(failed == 0)
}

/// Lists every invalid price table entry.
pub fn check(terminal: &CheckoutTerminal, out: &mut dyn Write) -> AppResult<bool> {
    let table = terminal.price_table();
    let problems = validate_price_table(table);

    for (item_id, err) in &problems {
        writeln!(out, "{:?}: {}", item_id, err)?;
    }
    writeln!(
        out,
        "{} entries checked, {} invalid",
        table.len(),
        problems.len()
    )?;

    Ok(problems.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
