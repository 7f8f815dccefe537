//! # checkout-core: Pure Pricing Logic
//!
//! The checkout terminal's business logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-cli (`checkout`)                    │   │
//! │  │   config file ──► price table file ──► scans ──► receipt        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │ terminal  │  │ validation│  │   │
//! │  │   │ PriceTable│  │   Money   │  │ Checkout  │  │   rules   │  │   │
//! │  │   │PricingRule│  │  (cents)  │  │ScanTally  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENVIRONMENT • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Price entries, pricing rules, price table
//! - [`tally`] - Scan counts since the last clear
//! - [`terminal`] - The checkout terminal and its results
//! - [`validation`] - Explicit price table validation
//! - [`error`] - Errors and checkout warnings
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{CheckoutTerminal, CheckoutWarning, PriceEntry, PriceTable};
//!
//! let mut terminal = CheckoutTerminal::new();
//! terminal.configure_pricing(
//!     PriceTable::new()
//!         .with_entry("C", PriceEntry::bulk(125, 6, 600)) // $1.25 or 6 for $6
//!         .with_entry("D", PriceEntry::unit(15)),
//! );
//!
//! let rejected = terminal.scan_sequence("CCCCCCCZ");
//! assert_eq!(rejected, vec![CheckoutWarning::UnknownItem { item_id: "Z".into() }]);
//!
//! // 6 for $6.00 plus one at $1.25
//! assert_eq!(terminal.total().to_string(), "$7.25");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod tally;
pub mod terminal;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CheckoutWarning, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceEntry, PriceTable, PricingRule};
pub use tally::ScanTally;
pub use terminal::{Checkout, CheckoutTerminal, LineTotal, ScanOutcome};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item identifier, in characters.
pub const MAX_ITEM_ID_LEN: usize = 64;

/// Maximum size of a bulk group.
///
/// ## Business Reason
/// Catches typos like `bulkQuantity = 4000` for "4 for $7".
pub const MAX_BULK_QUANTITY: u32 = 999;

/// Maximum unit or bulk price, in cents ($10,000,000.00).
///
/// ## Business Reason
/// At this bound even `u32::MAX` units fit in an `i64` of cents, so a
/// validated entry can never overflow its line.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;
