//! # Validation Module
//!
//! Explicit checks for price tables.
//!
//! The terminal itself accepts any table and degrades gracefully at total
//! time. These validators let a caller reject or report bad entries up
//! front, e.g. when a price file is loaded.
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_item_id, validate_price_entry};
//! use checkout_core::PriceEntry;
//!
//! assert!(validate_item_id("A").is_ok());
//! assert!(validate_price_entry(&PriceEntry::bulk(200, 4, 700)).is_ok());
//! assert!(validate_price_entry(&PriceEntry::default()).is_err());
//! ```

use crate::error::ValidationError;
use crate::pricing::{PriceEntry, PriceTable};
use crate::{MAX_BULK_QUANTITY, MAX_ITEM_ID_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Item Identifiers
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most `MAX_ITEM_ID_LEN` (64) characters
///
/// Identifiers are case-sensitive and are not trimmed or normalized.
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    if item_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    if item_id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Price Entries
// =============================================================================

/// Validates a unit price: present, positive, at most `MAX_PRICE_CENTS`.
pub fn validate_unit_price_cents(cents: Option<i64>) -> ValidationResult<()> {
    match cents {
        None => Err(ValidationError::Required {
            field: "unitPriceCents".to_string(),
        }),
        Some(c) if c <= 0 => Err(ValidationError::MustBePositive {
            field: "unitPriceCents".to_string(),
        }),
        Some(c) if c > MAX_PRICE_CENTS => Err(ValidationError::OutOfRange {
            field: "unitPriceCents".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        }),
        Some(_) => Ok(()),
    }
}

/// Validates a bulk group size.
///
/// ## Rules
/// - Between 1 and `MAX_BULK_QUANTITY` (999)
pub fn validate_bulk_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 || quantity > MAX_BULK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "bulkQuantity".to_string(),
            min: 1,
            max: i64::from(MAX_BULK_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a bulk group price. Zero is allowed.
pub fn validate_bulk_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "bulkPriceCents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a whole price entry.
///
/// ## Rules
/// ```text
/// unitPriceCents   required, 1..=MAX_PRICE_CENTS
/// bulkQuantity  ┐  both or neither
/// bulkPriceCents┘
/// bulkQuantity     1..=999
/// bulkPriceCents   0..=MAX_PRICE_CENTS
/// ```
///
/// Returns the first problem found.
pub fn validate_price_entry(entry: &PriceEntry) -> ValidationResult<()> {
    validate_unit_price_cents(entry.unit_price_cents)?;

    match (entry.bulk_quantity, entry.bulk_price_cents) {
        (None, None) => Ok(()),
        (Some(_), None) => Err(ValidationError::MissingCompanion {
            field: "bulkQuantity".to_string(),
            other: "bulkPriceCents".to_string(),
        }),
        (None, Some(_)) => Err(ValidationError::MissingCompanion {
            field: "bulkPriceCents".to_string(),
            other: "bulkQuantity".to_string(),
        }),
        (Some(quantity), Some(price)) => {
            validate_bulk_quantity(quantity)?;
            validate_bulk_price_cents(price)
        }
    }
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates every entry of a table.
///
/// Returns one `(item_id, error)` pair per invalid entry, in identifier
/// order. An empty vector means the table is clean.
pub fn validate_price_table(table: &PriceTable) -> Vec<(String, ValidationError)> {
    table
        .iter()
        .filter_map(|(item_id, entry)| {
            validate_item_id(item_id)
                .and_then(|_| validate_price_entry(entry))
                .err()
                .map(|err| (item_id.to_string(), err))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
