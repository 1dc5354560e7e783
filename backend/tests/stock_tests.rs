//! Stock costing tests
//!
//! Tests for the weighted-average cost engine including:
//! - Property 1: Weighted-Average Invariant
//! - Property 2: Reversal Round-Trip

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::StockOnHand;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Receiving into empty stock takes the lot's unit cost
    #[test]
    fn test_first_receipt_sets_average() {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        stock.receive(dec("10"), dec("100"));

        assert_eq!(stock.quantity, dec("10"));
        assert_eq!(stock.avg_cost, dec("100"));
    }

    /// Worked example: 10 @ 100 then 10 @ 200 averages to 150;
    /// reversing the second lot restores 10 @ 100
    #[test]
    fn test_receive_then_reverse_scenario() {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);

        stock.receive(dec("10"), dec("100"));
        assert_eq!(stock.avg_cost, dec("100"));
        assert_eq!(stock.quantity, dec("10"));

        stock.receive(dec("10"), dec("200"));
        assert_eq!(stock.avg_cost, dec("150"));
        assert_eq!(stock.quantity, dec("20"));

        stock.reverse_receipt(dec("10"), dec("200"));
        assert_eq!(stock.avg_cost, dec("100"));
        assert_eq!(stock.quantity, dec("10"));
    }

    /// Issuing stock leaves the average cost untouched
    #[test]
    fn test_issue_preserves_average() {
        let mut stock = StockOnHand::new(dec("20"), dec("150"));
        let cogs = stock.issue(dec("8"));

        assert_eq!(cogs, dec("1200"));
        assert_eq!(stock.quantity, dec("12"));
        assert_eq!(stock.avg_cost, dec("150"));
    }

    /// Reversing the only lot resets the average to zero
    #[test]
    fn test_reverse_to_empty_resets_average() {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        stock.receive(dec("5"), dec("40"));
        stock.reverse_receipt(dec("5"), dec("40"));

        assert_eq!(stock.quantity, Decimal::ZERO);
        assert_eq!(stock.avg_cost, Decimal::ZERO);
    }

    /// Reversing more than is on hand guards the average to zero
    /// instead of dividing by a non-positive remainder
    #[test]
    fn test_reverse_past_zero_is_guarded() {
        let mut stock = StockOnHand::new(dec("3"), dec("50"));
        stock.reverse_receipt(dec("5"), dec("50"));

        assert_eq!(stock.quantity, dec("-2"));
        assert_eq!(stock.avg_cost, Decimal::ZERO);
    }

    /// Stock value is quantity times average cost
    #[test]
    fn test_stock_value() {
        let stock = StockOnHand::new(dec("12"), dec("7.5"));
        assert_eq!(stock.value(), dec("90"));
    }
}

// ============================================================================
// Property 1: Weighted-Average Invariant
// ============================================================================
// For any sequence of receipts starting from empty stock, the average cost
// SHALL equal sum(qty_i * cost_i) / sum(qty_i) within rounding tolerance.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Weighted-Average Invariant
    #[test]
    fn property_1_weighted_average_invariant(
        lots in prop::collection::vec((1u32..10_000, 1u32..5_000), 1..12),
    ) {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        let mut total_quantity = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;

        for (quantity, unit_cost) in lots {
            let quantity = Decimal::from(quantity);
            let unit_cost = Decimal::from(unit_cost);
            stock.receive(quantity, unit_cost);
            total_quantity += quantity;
            total_value += quantity * unit_cost;
        }

        let expected = total_value / total_quantity;
        let tolerance = dec("0.000001");
        let diff = (stock.avg_cost - expected).abs();
        prop_assert!(
            diff < tolerance,
            "average cost mismatch: expected {}, got {}, diff {}",
            expected,
            stock.avg_cost,
            diff
        );
        prop_assert_eq!(stock.quantity, total_quantity);
    }

    /// Property 1 variant: the average always lies between the cheapest
    /// and the most expensive lot received
    #[test]
    fn property_1_average_bounded_by_lot_costs(
        lots in prop::collection::vec((1u32..10_000, 1u32..5_000), 1..12),
    ) {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        let mut min_cost = Decimal::MAX;
        let mut max_cost = Decimal::MIN;

        for (quantity, unit_cost) in lots {
            let unit_cost = Decimal::from(unit_cost);
            stock.receive(Decimal::from(quantity), unit_cost);
            min_cost = min_cost.min(unit_cost);
            max_cost = max_cost.max(unit_cost);
        }

        prop_assert!(stock.avg_cost >= min_cost && stock.avg_cost <= max_cost);
    }
}

// ============================================================================
// Property 2: Reversal Round-Trip
// ============================================================================
// Applying a receipt and immediately reversing it SHALL return the stock
// position to its pre-movement values.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 2: Reversal Round-Trip
    #[test]
    fn property_2_reversal_round_trip(
        initial_qty in 1u32..10_000,
        initial_cost in 1u32..5_000,
        lot_qty in 1u32..10_000,
        lot_cost in 1u32..5_000,
    ) {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        stock.receive(Decimal::from(initial_qty), Decimal::from(initial_cost));
        let before = stock;

        let lot_qty = Decimal::from(lot_qty);
        let lot_cost = Decimal::from(lot_cost);
        stock.receive(lot_qty, lot_cost);
        stock.reverse_receipt(lot_qty, lot_cost);

        prop_assert_eq!(stock.quantity, before.quantity);
        let tolerance = dec("0.000000000001");
        let diff = (stock.avg_cost - before.avg_cost).abs();
        prop_assert!(
            diff < tolerance,
            "average cost not restored: before {}, after {}",
            before.avg_cost,
            stock.avg_cost
        );
    }

    /// Property 2 variant: issue-then-receive at the running average is
    /// also an identity on the average cost
    #[test]
    fn property_2_issue_does_not_move_average(
        initial_qty in 2u32..10_000,
        initial_cost in 1u32..5_000,
        issue_qty in 1u32..9_999,
    ) {
        prop_assume!(issue_qty < initial_qty);

        let mut stock = StockOnHand::new(Decimal::from(initial_qty), Decimal::from(initial_cost));
        let avg_before = stock.avg_cost;
        stock.issue(Decimal::from(issue_qty));

        prop_assert_eq!(stock.avg_cost, avg_before);
    }
}
