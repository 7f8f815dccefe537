//! # Scan Tally
//!
//! Running count of how many times each item has been scanned since the
//! last clear.
//!
//! ## Invariants
//! - Counts only ever grow until `clear()` is called
//! - A key is present only with a count of at least 1
//! - The tally itself does not know about prices; the terminal only
//!   increments identifiers that are in its price table

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Per-item scan counts for the current checkout.
#[derive(Debug, Clone)]
pub struct ScanTally {
    counts: BTreeMap<String, u32>,

    /// When the tally was created or last cleared.
    started_at: DateTime<Utc>,
}

impl ScanTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        ScanTally {
            counts: BTreeMap::new(),
            started_at: Utc::now(),
        }
    }

    /// Adds one unit of `item_id` and returns its new count.
    pub fn increment(&mut self, item_id: &str) -> u32 {
        let count = self.counts.entry(item_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Returns the count for an item (0 if never scanned).
    pub fn count(&self, item_id: &str) -> u32 {
        self.counts.get(item_id).copied().unwrap_or(0)
    }

    /// Empties the tally and restarts its clock.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.started_at = Utc::now();
    }

    /// Iterates `(item_id, count)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// Number of distinct items scanned.
    pub fn item_count(&self) -> usize {
        self.counts.len()
    }

    /// Total number of units scanned.
    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for ScanTally {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_counts_per_item() {
        let mut tally = ScanTally::new();
        assert_eq!(tally.increment("A"), 1);
        assert_eq!(tally.increment("B"), 1);
        assert_eq!(tally.increment("A"), 2);

        assert_eq!(tally.count("A"), 2);
        assert_eq!(tally.count("B"), 1);
        assert_eq!(tally.count("C"), 0);
        assert_eq!(tally.item_count(), 2);
        assert_eq!(tally.total_units(), 3);
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        let mut tally = ScanTally::new();
        tally.increment("a");
        tally.increment("A");
        assert_eq!(tally.item_count(), 2);
    }

    #[test]
    fn test_clear_resets_counts_and_clock() {
        let mut tally = ScanTally::new();
        let first_start = tally.started_at();
        tally.increment("A");
        tally.clear();

        assert!(tally.is_empty());
        assert_eq!(tally.count("A"), 0);
        assert!(tally.started_at() >= first_start);
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut tally = ScanTally::new();
        for id in ["D", "A", "C", "A"] {
            tally.increment(id);
        }
        let pairs: Vec<(&str, u32)> = tally.iter().collect();
        assert_eq!(pairs, vec![("A", 2), ("C", 1), ("D", 1)]);
    }
}
