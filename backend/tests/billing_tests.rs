//! Billing tests
//!
//! Tests for bill arithmetic and stock reconciliation including:
//! - Property 3: Bill Totals Formula
//! - Property 4: Bill Reconciliation Symmetry

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use shared::models::{bill_totals, LineAmounts, LineKind};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sale_line(quantity: &str, unit_price: &str, discount: &str) -> LineAmounts {
    LineAmounts {
        kind: LineKind::Sale,
        quantity: dec(quantity),
        unit_price: dec(unit_price),
        discount: dec(discount),
    }
}

fn return_line(quantity: &str, unit_price: &str) -> LineAmounts {
    LineAmounts {
        kind: LineKind::Return,
        quantity: dec(quantity),
        unit_price: dec(unit_price),
        discount: Decimal::ZERO,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// subtotal = sales − returns − discounts; total = subtotal + tax;
    /// due = total − paid
    #[test]
    fn test_bill_totals_worked_example() {
        let lines = [
            sale_line("5", "40", "0"),   // 200
            sale_line("2", "75", "10"),  // 150 − 10
            return_line("1", "40"),      // −40
        ];

        let totals = bill_totals(&lines, dec("15"), dec("250"));
        assert_eq!(totals.subtotal, dec("300"));
        assert_eq!(totals.total, dec("315"));
        assert_eq!(totals.due, dec("65"));
    }

    /// A bill fully paid up front carries no due amount
    #[test]
    fn test_bill_fully_paid() {
        let lines = [sale_line("3", "100", "0")];
        let totals = bill_totals(&lines, Decimal::ZERO, dec("300"));

        assert_eq!(totals.due, Decimal::ZERO);
    }

    /// Returns larger than sales drive the subtotal negative (refund bill)
    #[test]
    fn test_return_heavy_bill_goes_negative() {
        let lines = [sale_line("1", "50", "0"), return_line("3", "50")];
        let totals = bill_totals(&lines, Decimal::ZERO, Decimal::ZERO);

        assert_eq!(totals.subtotal, dec("-100"));
        assert_eq!(totals.due, dec("-100"));
    }

    /// Line kinds round-trip through their string form
    #[test]
    fn test_line_kind_round_trip() {
        assert_eq!(LineKind::from_str("sale"), Some(LineKind::Sale));
        assert_eq!(LineKind::from_str("return"), Some(LineKind::Return));
        assert_eq!(LineKind::from_str("exchange"), None);
        assert_eq!(LineKind::Sale.as_str(), "sale");
        assert_eq!(LineKind::Return.as_str(), "return");
    }
}

// ============================================================================
// Property 3: Bill Totals Formula
// ============================================================================
// For any set of lines, subtotal SHALL equal sum(sale gross) − sum(return
// gross) − sum(discounts), with total = subtotal + tax and due = total − paid.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 3: Bill Totals Formula
    #[test]
    fn property_3_bill_totals_formula(
        lines in prop::collection::vec(
            (any::<bool>(), 1u32..1_000, 1u32..500, 0u32..50),
            1..10,
        ),
        tax in 0u32..100,
        paid in 0u32..100_000,
    ) {
        let amounts: Vec<LineAmounts> = lines
            .iter()
            .map(|(is_sale, qty, price, discount)| LineAmounts {
                kind: if *is_sale { LineKind::Sale } else { LineKind::Return },
                quantity: Decimal::from(*qty),
                unit_price: Decimal::from(*price),
                discount: Decimal::from(*discount),
            })
            .collect();

        let mut expected_subtotal = Decimal::ZERO;
        for line in &amounts {
            let gross = line.quantity * line.unit_price;
            match line.kind {
                LineKind::Sale => expected_subtotal += gross,
                LineKind::Return => expected_subtotal -= gross,
            }
            expected_subtotal -= line.discount;
        }

        let tax = Decimal::from(tax);
        let paid = Decimal::from(paid);
        let totals = bill_totals(&amounts, tax, paid);

        prop_assert_eq!(totals.subtotal, expected_subtotal);
        prop_assert_eq!(totals.total, expected_subtotal + tax);
        prop_assert_eq!(totals.due, expected_subtotal + tax - paid);
    }
}

// ============================================================================
// Property 4: Bill Reconciliation Symmetry
// ============================================================================
// Applying a bill's stock effects (sale decrements, return increments) and
// then reversing them SHALL return every product's stock to its pre-bill
// value.

/// The stock effect a committed bill line has on its product
fn apply_line(stock: &mut Decimal, kind: LineKind, quantity: Decimal) {
    match kind {
        LineKind::Sale => *stock -= quantity,
        LineKind::Return => *stock += quantity,
    }
}

/// The opposite effect, used when the bill is deleted
fn reverse_line(stock: &mut Decimal, kind: LineKind, quantity: Decimal) {
    match kind {
        LineKind::Sale => *stock += quantity,
        LineKind::Return => *stock -= quantity,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 4: Bill Reconciliation Symmetry
    #[test]
    fn property_4_create_then_delete_restores_stock(
        initial in prop::collection::vec(0u32..10_000, 3..6),
        lines in prop::collection::vec(
            (0usize..3, any::<bool>(), 1u32..100),
            1..12,
        ),
    ) {
        let mut stocks: HashMap<usize, Decimal> = initial
            .iter()
            .enumerate()
            .map(|(i, qty)| (i, Decimal::from(*qty)))
            .collect();
        let before = stocks.clone();

        for (product, is_sale, qty) in &lines {
            let kind = if *is_sale { LineKind::Sale } else { LineKind::Return };
            apply_line(stocks.get_mut(product).unwrap(), kind, Decimal::from(*qty));
        }

        for (product, is_sale, qty) in &lines {
            let kind = if *is_sale { LineKind::Sale } else { LineKind::Return };
            reverse_line(stocks.get_mut(product).unwrap(), kind, Decimal::from(*qty));
        }

        prop_assert_eq!(stocks, before);
    }
}
