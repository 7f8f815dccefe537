//! # Checkout Terminal
//!
//! The terminal owns a price table and a scan tally and computes totals.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Terminal Operations                         │
//! │                                                                         │
//! │  Caller Action            Method                  State Change          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  Load prices ───────────► configure_pricing() ──► price table replaced  │
//! │                                                                         │
//! │  Scan barcode ──────────► scan() ───────────────► tally[id] += 1        │
//! │                               └── unknown id ───► UnknownItem, no-op    │
//! │                                                                         │
//! │  Next customer ─────────► clear_all() ──────────► tally emptied         │
//! │                                                                         │
//! │  Pay ───────────────────► calculate_total() ────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! None built in. The terminal is a plain value; callers that share it
//! across threads wrap it in a `Mutex` themselves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::CheckoutWarning;
use crate::money::Money;
use crate::pricing::{PriceTable, PricingRule};
use crate::tally::ScanTally;

// =============================================================================
// Results
// =============================================================================

/// Result of a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The item was counted; `count` is its new tally.
    Counted { count: u32 },
    /// The item was not counted.
    Rejected(CheckoutWarning),
}

impl ScanOutcome {
    pub fn is_counted(&self) -> bool {
        matches!(self, ScanOutcome::Counted { .. })
    }

    /// Returns the warning if the scan was rejected.
    pub fn warning(&self) -> Option<&CheckoutWarning> {
        match self {
            ScanOutcome::Rejected(warning) => Some(warning),
            ScanOutcome::Counted { .. } => None,
        }
    }
}

/// One priced line of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    pub item_id: String,
    pub count: u32,
    pub rule: PricingRule,
    pub amount: Money,
}

/// The result of [`CheckoutTerminal::calculate_total`].
///
/// `total` is the sum of all `lines`. Items that could not be priced appear
/// in `warnings` instead of `lines` and contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub total: Money,
    pub lines: Vec<LineTotal>,
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<CheckoutWarning>,
    pub started_at: DateTime<Utc>,
}

impl Checkout {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn serialize_warnings<S>(warnings: &[CheckoutWarning], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(warnings.iter().map(|w| w.to_string()))
}

// =============================================================================
// Checkout Terminal
// =============================================================================

/// A checkout terminal: price table plus scan tally.
///
/// ## Example
/// ```rust
/// use checkout_core::{CheckoutTerminal, PriceEntry, PriceTable};
///
/// let mut terminal = CheckoutTerminal::new();
/// terminal.configure_pricing(
///     PriceTable::new()
///         .with_entry("A", PriceEntry::bulk(200, 4, 700))
///         .with_entry("B", PriceEntry::unit(1200)),
/// );
///
/// terminal.scan_sequence("ABAAA");
/// assert_eq!(terminal.total().cents(), 700 + 1200);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckoutTerminal {
    prices: PriceTable,
    tally: ScanTally,
}

impl CheckoutTerminal {
    /// Creates a terminal with an empty price table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a terminal with the given price table.
    pub fn with_pricing(prices: PriceTable) -> Self {
        CheckoutTerminal {
            prices,
            tally: ScanTally::new(),
        }
    }

    /// Replaces the entire price table.
    ///
    /// Entries are not validated here; unusable entries surface as
    /// warnings from [`calculate_total`](Self::calculate_total). The tally
    /// is left as is.
    pub fn configure_pricing(&mut self, prices: PriceTable) {
        debug!(entries = prices.len(), "Price table configured");
        self.prices = prices;
    }

    /// Registers one scan of `item_id`.
    ///
    /// ## Behavior
    /// - Unknown id: returns `Rejected(UnknownItem)`, tally unchanged
    /// - Known id: count goes up by one
    pub fn scan(&mut self, item_id: &str) -> ScanOutcome {
        if !self.prices.contains(item_id) {
            warn!(item_id = %item_id, "Scanned item has no pricing");
            return ScanOutcome::Rejected(CheckoutWarning::UnknownItem {
                item_id: item_id.to_string(),
            });
        }

        let count = self.tally.increment(item_id);
        debug!(item_id = %item_id, count, "Item scanned");
        ScanOutcome::Counted { count }
    }

    /// Scans each id in order and returns the rejections.
    pub fn scan_all<'a, I>(&mut self, item_ids: I) -> Vec<CheckoutWarning>
    where
        I: IntoIterator<Item = &'a str>,
    {
        item_ids
            .into_iter()
            .filter_map(|id| match self.scan(id) {
                ScanOutcome::Rejected(warning) => Some(warning),
                ScanOutcome::Counted { .. } => None,
            })
            .collect()
    }

    /// Scans every character of `sequence` as a one-character item id.
    ///
    /// `"ABCA"` scans `A`, `B`, `C`, `A`.
    pub fn scan_sequence(&mut self, sequence: &str) -> Vec<CheckoutWarning> {
        let mut buf = [0u8; 4];
        let mut warnings = Vec::new();
        for ch in sequence.chars() {
            if let ScanOutcome::Rejected(warning) = self.scan(ch.encode_utf8(&mut buf)) {
                warnings.push(warning);
            }
        }
        warnings
    }

    /// Empties the tally. The price table is kept.
    pub fn clear_all(&mut self) {
        debug!(items = self.tally.item_count(), "Clearing scanned items");
        self.tally.clear();
    }

    /// Prices every tallied item and sums the result.
    ///
    /// ## Per-Item Pricing
    /// ```text
    /// (item_id, count)
    ///      │
    ///      ├── no entry in table ──────► MissingPriceEntry, +$0.00
    ///      │
    ///      ├── entry has no rule ──────► IncompletePricing, +$0.00
    ///      │
    ///      ├── cost or total overflows ► AmountOverflow, +$0.00
    ///      │
    ///      └── rule.cost(count) ───────► LineTotal, +amount
    /// ```
    /// No condition stops the calculation; an empty tally totals $0.00.
    pub fn calculate_total(&self) -> Checkout {
        let mut lines = Vec::with_capacity(self.tally.item_count());
        let mut warnings = Vec::new();
        let mut total = Money::zero();

        for (item_id, count) in self.tally.iter() {
            let Some(entry) = self.prices.get(item_id) else {
                error!(item_id = %item_id, count, "Tallied item missing from price table");
                warnings.push(CheckoutWarning::MissingPriceEntry {
                    item_id: item_id.to_string(),
                    count,
                });
                continue;
            };

            let Some(rule) = entry.rule() else {
                warn!(item_id = %item_id, count, "Pricing info not found");
                warnings.push(CheckoutWarning::IncompletePricing {
                    item_id: item_id.to_string(),
                    count,
                });
                continue;
            };

            if entry.has_partial_bulk() {
                warn!(item_id = %item_id, "Partial bulk pricing ignored, charging unit price");
            }

            let priced = rule
                .cost(count)
                .and_then(|amount| total.checked_add(amount).map(|new_total| (amount, new_total)));

            match priced {
                Some((amount, new_total)) => {
                    total = new_total;
                    lines.push(LineTotal {
                        item_id: item_id.to_string(),
                        count,
                        rule,
                        amount,
                    });
                }
                None => {
                    error!(item_id = %item_id, count, %rule, "Line amount overflows");
                    warnings.push(CheckoutWarning::AmountOverflow {
                        item_id: item_id.to_string(),
                        count,
                    });
                }
            }
        }

        debug!(%total, lines = lines.len(), warnings = warnings.len(), "Total calculated");

        Checkout {
            total,
            lines,
            warnings,
            started_at: self.tally.started_at(),
        }
    }

    /// Shortcut for `calculate_total().total`.
    pub fn total(&self) -> Money {
        self.calculate_total().total
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.prices
    }

    pub fn tally(&self) -> &ScanTally {
        &self.tally
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
