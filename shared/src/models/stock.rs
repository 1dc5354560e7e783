//! Stock level and weighted-average cost arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity on hand together with its weighted-average unit cost
///
/// This is the in-memory image of a material's or product's
/// `(current_stock, avg_cost)` pair. Services load it inside a
/// transaction, apply receipts or reversals, and write it back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockOnHand {
    pub quantity: Decimal,
    pub avg_cost: Decimal,
}

impl StockOnHand {
    pub fn new(quantity: Decimal, avg_cost: Decimal) -> Self {
        Self { quantity, avg_cost }
    }

    /// Total value of the stock on hand
    pub fn value(&self) -> Decimal {
        self.quantity * self.avg_cost
    }

    /// Receive a lot, recomputing the weighted-average cost
    ///
    /// `new_avg = (quantity × avg_cost + qty × unit_cost) / (quantity + qty)`.
    /// An empty (or negative) starting position takes the incoming lot's
    /// unit cost outright, so there is no division by zero.
    pub fn receive(&mut self, quantity: Decimal, unit_cost: Decimal) {
        let new_qty = self.quantity + quantity;

        if new_qty <= Decimal::ZERO {
            self.quantity = new_qty;
            self.avg_cost = Decimal::ZERO;
            return;
        }

        if self.quantity <= Decimal::ZERO {
            self.avg_cost = unit_cost;
        } else {
            let current_value = self.quantity * self.avg_cost;
            let incoming_value = quantity * unit_cost;
            self.avg_cost = (current_value + incoming_value) / new_qty;
        }
        self.quantity = new_qty;
    }

    /// Undo a prior receipt of `(quantity, unit_cost)`
    ///
    /// `new_avg = (quantity × avg_cost − qty × unit_cost) / (quantity − qty)`,
    /// guarded to 0 when the remaining quantity or value is not positive.
    pub fn reverse_receipt(&mut self, quantity: Decimal, unit_cost: Decimal) {
        let remaining = self.quantity - quantity;

        if remaining <= Decimal::ZERO {
            self.quantity = remaining;
            self.avg_cost = Decimal::ZERO;
            return;
        }

        let remaining_value = self.quantity * self.avg_cost - quantity * unit_cost;
        self.avg_cost = if remaining_value <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            remaining_value / remaining
        };
        self.quantity = remaining;
    }

    /// Issue stock out at the current average cost, returning the cost of
    /// goods issued. The average cost itself does not change on issue.
    pub fn issue(&mut self, quantity: Decimal) -> Decimal {
        let cogs = quantity * self.avg_cost;
        self.quantity -= quantity;
        cogs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_receive_into_empty_stock_takes_unit_cost() {
        let mut stock = StockOnHand::new(Decimal::ZERO, Decimal::ZERO);
        stock.receive(dec("10"), dec("100"));
        assert_eq!(stock.quantity, dec("10"));
        assert_eq!(stock.avg_cost, dec("100"));
    }

    #[test]
    fn test_receive_blends_average() {
        let mut stock = StockOnHand::new(dec("10"), dec("100"));
        stock.receive(dec("10"), dec("200"));
        assert_eq!(stock.quantity, dec("20"));
        assert_eq!(stock.avg_cost, dec("150"));
    }

    #[test]
    fn test_reverse_receipt_round_trip() {
        let mut stock = StockOnHand::new(dec("10"), dec("100"));
        stock.receive(dec("10"), dec("200"));
        stock.reverse_receipt(dec("10"), dec("200"));
        assert_eq!(stock.quantity, dec("10"));
        assert_eq!(stock.avg_cost, dec("100"));
    }

    #[test]
    fn test_reverse_receipt_to_zero_resets_cost() {
        let mut stock = StockOnHand::new(dec("5"), dec("80"));
        stock.reverse_receipt(dec("5"), dec("80"));
        assert_eq!(stock.quantity, Decimal::ZERO);
        assert_eq!(stock.avg_cost, Decimal::ZERO);
    }

    #[test]
    fn test_issue_keeps_average_and_returns_cogs() {
        let mut stock = StockOnHand::new(dec("20"), dec("150"));
        let cogs = stock.issue(dec("5"));
        assert_eq!(cogs, dec("750"));
        assert_eq!(stock.quantity, dec("15"));
        assert_eq!(stock.avg_cost, dec("150"));
    }
}
