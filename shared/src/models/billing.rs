//! Bill line kinds and bill money arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a bill line sells stock out or takes a return back in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Sale,
    Return,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Sale => "sale",
            LineKind::Return => "return",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(LineKind::Sale),
            "return" => Some(LineKind::Return),
            _ => None,
        }
    }
}

/// Amounts needed to price one bill line
#[derive(Debug, Clone, Copy)]
pub struct LineAmounts {
    pub kind: LineKind,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
}

impl LineAmounts {
    /// Gross value of the line before discount
    pub fn gross(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Computed money fields of a bill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: Decimal,
    pub total: Decimal,
    pub due: Decimal,
}

/// Compute bill totals from its lines
///
/// `subtotal = Σ(sale lines) − Σ(return lines) − Σ(discounts)`,
/// `total = subtotal + tax`, `due = total − paid`.
pub fn bill_totals(lines: &[LineAmounts], tax: Decimal, paid: Decimal) -> BillTotals {
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        match line.kind {
            LineKind::Sale => subtotal += line.gross(),
            LineKind::Return => subtotal -= line.gross(),
        }
        subtotal -= line.discount;
    }

    let total = subtotal + tax;
    BillTotals {
        subtotal,
        total,
        due: total - paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sale(quantity: &str, unit_price: &str, discount: &str) -> LineAmounts {
        LineAmounts {
            kind: LineKind::Sale,
            quantity: dec(quantity),
            unit_price: dec(unit_price),
            discount: dec(discount),
        }
    }

    #[test]
    fn test_bill_totals_single_sale() {
        let totals = bill_totals(&[sale("5", "40", "0")], dec("10"), dec("150"));
        assert_eq!(totals.subtotal, dec("200"));
        assert_eq!(totals.total, dec("210"));
        assert_eq!(totals.due, dec("60"));
    }

    #[test]
    fn test_bill_totals_returns_subtract() {
        let lines = [
            sale("2", "100", "0"),
            LineAmounts {
                kind: LineKind::Return,
                quantity: dec("1"),
                unit_price: dec("50"),
                discount: dec("0"),
            },
        ];
        let totals = bill_totals(&lines, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("150"));
        assert_eq!(totals.due, dec("150"));
    }

    #[test]
    fn test_bill_totals_discounts_subtract() {
        let totals = bill_totals(&[sale("3", "60", "30")], Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec("150"));
    }

    #[test]
    fn test_line_kind_round_trip() {
        assert_eq!(LineKind::from_str("sale"), Some(LineKind::Sale));
        assert_eq!(LineKind::from_str("return"), Some(LineKind::Return));
        assert_eq!(LineKind::from_str("refund"), None);
        assert_eq!(LineKind::Sale.as_str(), "sale");
    }
}
