//! # Error Types
//!
//! Domain-specific error and warning types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Parsing and domain errors                      │
//! │  ├── ValidationError  - Price table validation failures                │
//! │  └── CheckoutWarning  - Recoverable scan/total conditions (NOT fatal)  │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                  │
//! │  └── AppError         - Config, file and parse failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in messages (item id, count, input)
//! 3. Warnings are values returned to the caller, never panics

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - `"abc".parse::<Money>()`
    /// - More than two fractional digits (`"1.255"`)
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Price tables are accepted without validation by the terminal; these
/// errors come from the explicit checks in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Two fields must be given together.
    #[error("{field} requires {other}")]
    MissingCompanion { field: String, other: String },
}

// =============================================================================
// Checkout Warning
// =============================================================================

/// A recoverable condition raised while scanning or totaling.
///
/// None of these abort the operation that raised them. They are returned
/// to the caller alongside the result and also logged via `tracing`.
///
/// ## Where They Come From
/// ```text
/// scan("Z") ─────────────► UnknownItem        (scan dropped)
///
/// calculate_total()
///   ├── entry w/o price ─► IncompletePricing  (contributes 0)
///   ├── entry missing ───► MissingPriceEntry  (contributes 0)
///   └── cents overflow ──► AmountOverflow     (contributes 0)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutWarning {
    /// The scanned identifier has no entry in the price table.
    #[error("{item_id} does not exist in the pricing table")]
    UnknownItem { item_id: String },

    /// The entry has neither a usable unit price nor complete bulk pricing.
    #[error("Pricing info not found for {item_id} ({count} scanned)")]
    IncompletePricing { item_id: String, count: u32 },

    /// A tallied item vanished from the price table.
    ///
    /// ## When This Occurs
    /// The price table was replaced after the item was scanned and the new
    /// table no longer lists it.
    #[error("{item_id} was scanned {count} times but is no longer priced")]
    MissingPriceEntry { item_id: String, count: u32 },

    /// The line cost, or the running total with it added, does not fit in
    /// an `i64` of cents.
    #[error("{item_id} x{count} overflows the total and was left out")]
    AmountOverflow { item_id: String, count: u32 },
}

impl CheckoutWarning {
    /// Returns the item identifier the warning is about.
    pub fn item_id(&self) -> &str {
        match self {
            CheckoutWarning::UnknownItem { item_id }
            | CheckoutWarning::IncompletePricing { item_id, .. }
            | CheckoutWarning::MissingPriceEntry { item_id, .. }
            | CheckoutWarning::AmountOverflow { item_id, .. } => item_id,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        let warning = CheckoutWarning::UnknownItem {
            item_id: "Z".to_string(),
        };
        assert_eq!(warning.to_string(), "Z does not exist in the pricing table");

        let warning = CheckoutWarning::IncompletePricing {
            item_id: "E".to_string(),
            count: 2,
        };
        assert_eq!(warning.to_string(), "Pricing info not found for E (2 scanned)");
        assert_eq!(warning.item_id(), "E");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingCompanion {
            field: "bulkQuantity".to_string(),
            other: "bulkPriceCents".to_string(),
        };
        assert_eq!(err.to_string(), "bulkQuantity requires bulkPriceCents");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "unitPriceCents".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
