//! # Demo Scenarios
//!
//! The reference price table and the scan sequences the terminal is
//! expected to total correctly. `checkout demo` runs them.

use checkout_core::{CheckoutTerminal, Money, PriceEntry, PriceTable};

/// One scan sequence and the total it must produce.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub items: &'static str,
    pub expected: Money,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        items: "ABCDABAA",
        expected: Money::from_cents(3240),
    },
    Scenario {
        items: "CCCCCCC",
        expected: Money::from_cents(725),
    },
    Scenario {
        items: "ABCD",
        expected: Money::from_cents(1540),
    },
    Scenario {
        items: "",
        expected: Money::zero(),
    },
];

/// A = $2.00 or 4 for $7, B = $12, C = $1.25 or 6 for $6, D = $0.15.
pub fn demo_price_table() -> PriceTable {
    PriceTable::new()
        .with_entry("A", PriceEntry::bulk(200, 4, 700))
        .with_entry("B", PriceEntry::unit(1200))
        .with_entry("C", PriceEntry::bulk(125, 6, 600))
        .with_entry("D", PriceEntry::unit(15))
}

/// Outcome of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub actual: Money,
    pub rejected: usize,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.actual == self.scenario.expected
    }
}

/// Runs each scenario on a freshly cleared terminal.
pub fn run_scenarios(terminal: &mut CheckoutTerminal, scenarios: &[Scenario]) -> Vec<ScenarioResult> {
    scenarios
        .iter()
        .map(|scenario| {
            terminal.clear_all();
            let rejected = terminal.scan_sequence(scenario.items).len();
            ScenarioResult {
                scenario: *scenario,
                actual: terminal.total(),
                rejected,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenarios_pass_on_demo_table() {
        let mut terminal = CheckoutTerminal::with_pricing(demo_price_table());
        let results = run_scenarios(&mut terminal, SCENARIOS);

        assert_eq!(results.len(), SCENARIOS.len());
        for result in &results {
            assert!(result.passed(), "{:?}", result);
            assert_eq!(result.rejected, 0);
        }
    }

    #[test]
    fn test_scenarios_fail_on_other_prices() {
        let mut terminal = CheckoutTerminal::with_pricing(
            demo_price_table().with_entry("D", PriceEntry::unit(20)),
        );
        let results = run_scenarios(&mut terminal, SCENARIOS);
        let failed: Vec<&str> = results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.scenario.items)
            .collect();
        assert_eq!(failed, vec!["ABCDABAA", "ABCD"]);
    }
}
