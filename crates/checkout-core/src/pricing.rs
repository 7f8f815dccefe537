//! # Pricing Types
//!
//! Price entries, the pricing rule derived from each entry, and the price
//! table that maps item identifiers to entries.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  PriceTable ─── "A" ──► PriceEntry ──rule()──► PricingRule::Bulk        │
//! │      │                  unitPriceCents: 200     unit $2.00, 4 for $7.00 │
//! │      │                  bulkQuantity:   4                               │
//! │      │                  bulkPriceCents: 700                             │
//! │      │                                                                  │
//! │      └───── "B" ──► PriceEntry ──rule()──► PricingRule::Flat            │
//! │                     unitPriceCents: 1200    $12.00 each                 │
//! │                                                                         │
//! │  An entry with no usable unit price has NO rule (rule() == None).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usable Values
//! A field counts as present only when it is set AND non-zero:
//! - zero `unitPriceCents` disables the entry entirely
//! - zero `bulkQuantity` or zero `bulkPriceCents` disables bulk pricing only
//! - a bulk quantity without a bulk price (or vice versa) falls back to flat

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

// =============================================================================
// Price Entry
// =============================================================================

/// Pricing for one item identifier, as configured.
///
/// All fields are optional at the type level so that malformed entries
/// can be loaded and detected when a total is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// Price of a single unit in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price_cents: Option<i64>,

    /// Size of one bulk group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_quantity: Option<u32>,

    /// Price of one complete bulk group in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_price_cents: Option<i64>,
}

impl PriceEntry {
    /// Creates a flat-priced entry.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::PriceEntry;
    ///
    /// let b = PriceEntry::unit(1200); // $12.00 each
    /// assert_eq!(b.cost(2).unwrap().cents(), 2400);
    /// ```
    pub const fn unit(unit_price_cents: i64) -> Self {
        PriceEntry {
            unit_price_cents: Some(unit_price_cents),
            bulk_quantity: None,
            bulk_price_cents: None,
        }
    }

    /// Creates an entry with bulk pricing ("`quantity` for `bulk_price_cents`").
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::PriceEntry;
    ///
    /// let a = PriceEntry::bulk(200, 4, 700); // $2.00 each or 4 for $7.00
    /// assert_eq!(a.cost(5).unwrap().cents(), 900);
    /// ```
    pub const fn bulk(unit_price_cents: i64, quantity: u32, bulk_price_cents: i64) -> Self {
        PriceEntry {
            unit_price_cents: Some(unit_price_cents),
            bulk_quantity: Some(quantity),
            bulk_price_cents: Some(bulk_price_cents),
        }
    }

    /// Returns the usable unit price, if any.
    pub fn unit_price(&self) -> Option<Money> {
        self.unit_price_cents
            .filter(|cents| *cents != 0)
            .map(Money::from_cents)
    }

    /// Returns true if exactly one of the two bulk fields is set.
    pub fn has_partial_bulk(&self) -> bool {
        self.bulk_quantity.is_some() != self.bulk_price_cents.is_some()
    }

    /// Derives the pricing rule for this entry.
    ///
    /// Returns `None` when there is no usable unit price, which makes the
    /// entry unpriceable even if bulk fields are set.
    pub fn rule(&self) -> Option<PricingRule> {
        let unit_price = self.unit_price()?;

        let quantity = self.bulk_quantity.filter(|q| *q != 0);
        let bulk_price = self.bulk_price_cents.filter(|cents| *cents != 0);

        Some(match (quantity, bulk_price) {
            (Some(quantity), Some(bulk_cents)) => PricingRule::Bulk {
                unit_price,
                quantity,
                bulk_price: Money::from_cents(bulk_cents),
            },
            _ => PricingRule::Flat { unit_price },
        })
    }

    /// Cost of `count` units, or `None` if the entry has no rule or the
    /// cost does not fit in an `i64` of cents.
    pub fn cost(&self, count: u32) -> Option<Money> {
        self.rule().and_then(|rule| rule.cost(count))
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// The rule used to price a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRule {
    /// Every complete group of `quantity` costs `bulk_price`; the remainder
    /// costs `unit_price` each.
    Bulk {
        unit_price: Money,
        quantity: u32,
        bulk_price: Money,
    },
    /// Every unit costs `unit_price`.
    Flat { unit_price: Money },
}

impl PricingRule {
    /// Computes the cost of `count` units.
    ///
    /// ## Bulk Formula
    /// ```text
    /// cost(n) = floor(n / q) × bulk_price + (n mod q) × unit_price
    ///
    /// Example: A = $2.00 each, 4 for $7.00, n = 5
    ///   groups    = 5 / 4 = 1  → $7.00
    ///   remainder = 5 % 4 = 1  → $2.00
    ///   cost      = $9.00
    /// ```
    /// Division and remainder are taken on the unit count, never on money.
    /// Returns `None` when the cost overflows.
    pub fn cost(&self, count: u32) -> Option<Money> {
        match *self {
            PricingRule::Bulk {
                unit_price,
                quantity,
                bulk_price,
            } => {
                let groups = i64::from(count / quantity);
                let remainder = i64::from(count % quantity);
                bulk_price
                    .checked_multiply_quantity(groups)?
                    .checked_add(unit_price.checked_multiply_quantity(remainder)?)
            }
            PricingRule::Flat { unit_price } => unit_price.checked_multiply_quantity(i64::from(count)),
        }
    }
}

impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingRule::Bulk {
                unit_price,
                quantity,
                bulk_price,
            } => write!(f, "{} for {}, else {} each", quantity, bulk_price, unit_price),
            PricingRule::Flat { unit_price } => write!(f, "{} each", unit_price),
        }
    }
}

// =============================================================================
// Price Table
// =============================================================================

/// Mapping from item identifier (case-sensitive) to its price entry.
///
/// Serializes as a plain map so a price table file is just:
/// ```json
/// { "A": { "unitPriceCents": 200, "bulkQuantity": 4, "bulkPriceCents": 700 },
///   "B": { "unitPriceCents": 1200 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<String, PriceEntry>);

impl PriceTable {
    /// Creates an empty price table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an entry and returns the table, for building
    /// tables in code.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{PriceEntry, PriceTable};
    ///
    /// let table = PriceTable::new()
    ///     .with_entry("A", PriceEntry::bulk(200, 4, 700))
    ///     .with_entry("B", PriceEntry::unit(1200));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn with_entry(mut self, item_id: impl Into<String>, entry: PriceEntry) -> Self {
        self.0.insert(item_id.into(), entry);
        self
    }

    /// Looks up the entry for an item.
    pub fn get(&self, item_id: &str) -> Option<&PriceEntry> {
        self.0.get(item_id)
    }

    /// Returns true if the item is listed.
    pub fn contains(&self, item_id: &str) -> bool {
        self.0.contains_key(item_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceEntry)> {
        self.0.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

impl<K: Into<String>> FromIterator<(K, PriceEntry)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (K, PriceEntry)>>(iter: I) -> Self {
        PriceTable(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_cost_uses_groups_then_remainder() {
        let a = PriceEntry::bulk(200, 4, 700);
        assert_eq!(a.cost(0).unwrap().cents(), 0);
        assert_eq!(a.cost(3).unwrap().cents(), 600);
        assert_eq!(a.cost(4).unwrap().cents(), 700);
        assert_eq!(a.cost(5).unwrap().cents(), 900);
        assert_eq!(a.cost(9).unwrap().cents(), 1600);
    }

    #[test]
    fn test_bulk_formula_holds_for_all_counts() {
        let rule = PriceEntry::bulk(125, 6, 600).rule().unwrap();
        for n in 0..200u32 {
            let expected = i64::from(n / 6) * 600 + i64::from(n % 6) * 125;
            assert_eq!(rule.cost(n), Some(Money::from_cents(expected)), "n = {n}");
        }
    }

    #[test]
    fn test_cost_is_monotonic_when_bulk_is_not_cheaper_than_remainder() {
        // 4 for $7.00 against $2.00 each: three singles ($6.00) never exceed
        // one group, so adding a unit never lowers the cost.
        let rule = PriceEntry::bulk(200, 4, 700).rule().unwrap();
        for n in 0..100u32 {
            assert!(rule.cost(n + 1) >= rule.cost(n), "n = {n}");
        }
    }

    #[test]
    fn test_cost_overflow_is_none() {
        let huge = PriceEntry::unit(5_000_000_000_000_000_000);
        assert_eq!(huge.cost(1), Some(Money::from_cents(5_000_000_000_000_000_000)));
        assert_eq!(huge.cost(2), None);

        let bulk = PriceEntry::bulk(i64::MAX, 2, i64::MAX - 1);
        assert_eq!(bulk.cost(2), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(bulk.cost(3), None);
    }

    #[test]
    fn test_flat_cost() {
        let d = PriceEntry::unit(15);
        assert_eq!(d.rule(), Some(PricingRule::Flat { unit_price: Money::from_cents(15) }));
        assert_eq!(d.cost(3).unwrap().cents(), 45);
    }

    #[test]
    fn test_partial_bulk_falls_back_to_flat() {
        let quantity_only = PriceEntry {
            unit_price_cents: Some(300),
            bulk_quantity: Some(3),
            bulk_price_cents: None,
        };
        assert!(quantity_only.has_partial_bulk());
        assert_eq!(quantity_only.cost(3).unwrap().cents(), 900);

        let price_only = PriceEntry {
            unit_price_cents: Some(300),
            bulk_quantity: None,
            bulk_price_cents: Some(800),
        };
        assert!(price_only.has_partial_bulk());
        assert_eq!(price_only.cost(3).unwrap().cents(), 900);
    }

    #[test]
    fn test_zero_bulk_fields_disable_bulk_only() {
        assert!(matches!(
            PriceEntry::bulk(300, 0, 800).rule(),
            Some(PricingRule::Flat { .. })
        ));
        assert!(matches!(
            PriceEntry::bulk(300, 3, 0).rule(),
            Some(PricingRule::Flat { .. })
        ));
    }

    #[test]
    fn test_missing_or_zero_unit_price_has_no_rule() {
        let no_unit = PriceEntry {
            unit_price_cents: None,
            bulk_quantity: Some(3),
            bulk_price_cents: Some(800),
        };
        assert_eq!(no_unit.rule(), None);
        assert_eq!(PriceEntry::bulk(0, 3, 800).rule(), None);
        assert_eq!(PriceEntry::default().cost(1), None);
    }

    #[test]
    fn test_rule_display() {
        let bulk = PriceEntry::bulk(200, 4, 700).rule().unwrap();
        assert_eq!(bulk.to_string(), "4 for $7.00, else $2.00 each");
        let flat = PriceEntry::unit(1200).rule().unwrap();
        assert_eq!(flat.to_string(), "$12.00 each");
    }

    #[test]
    fn test_price_table_deserializes_from_plain_map() {
        let json = r#"{
            "A": { "unitPriceCents": 200, "bulkQuantity": 4, "bulkPriceCents": 700 },
            "B": { "unitPriceCents": 1200 },
            "E": {}
        }"#;
        let table: PriceTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("A"), Some(&PriceEntry::bulk(200, 4, 700)));
        assert_eq!(table.get("B"), Some(&PriceEntry::unit(1200)));
        assert_eq!(table.get("E"), Some(&PriceEntry::default()));
        assert!(!table.contains("a"));
    }

    #[test]
    fn test_price_table_iterates_in_id_order() {
        let table: PriceTable = vec![("C", PriceEntry::unit(1)), ("A", PriceEntry::unit(2))]
            .into_iter()
            .collect();
        let ids: Vec<&str> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }
}
