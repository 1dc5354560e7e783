//! Supplier ledger entry kinds and running-balance arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger entry side: `debit` is owed by the shop, `credit` is paid by it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Debit,
    Credit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Debit => "debit",
            EntryKind::Credit => "credit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "debit" => Some(EntryKind::Debit),
            "credit" => Some(EntryKind::Credit),
            _ => None,
        }
    }

    /// Side that offsets this one when a transaction is reversed
    pub fn offsetting(&self) -> Self {
        match self {
            EntryKind::Debit => EntryKind::Credit,
            EntryKind::Credit => EntryKind::Debit,
        }
    }
}

/// Running totals of a supplier ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplierBalance {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl SupplierBalance {
    /// What the shop still owes: `total_debit − total_credit`
    pub fn balance(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    /// Apply one ledger entry to the running totals
    pub fn apply(&mut self, kind: EntryKind, amount: Decimal) {
        match kind {
            EntryKind::Debit => self.total_debit += amount,
            EntryKind::Credit => self.total_credit += amount,
        }
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
    fn test_balance_is_debit_minus_credit() {
        let mut balance = SupplierBalance {
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
        };
        balance.apply(EntryKind::Debit, dec("1500"));
        balance.apply(EntryKind::Credit, dec("600"));
        assert_eq!(balance.balance(), dec("900"));
    }

    #[test]
    fn test_offsetting_entry_restores_balance() {
        let mut balance = SupplierBalance {
            total_debit: dec("1000"),
            total_credit: dec("400"),
        };
        let before = balance.balance();
        balance.apply(EntryKind::Debit, dec("250"));
        balance.apply(EntryKind::Debit.offsetting(), dec("250"));
        assert_eq!(balance.balance(), before);
    }

    #[test]
    fn test_entry_kind_round_trip() {
        assert_eq!(EntryKind::from_str("debit"), Some(EntryKind::Debit));
        assert_eq!(EntryKind::from_str("credit"), Some(EntryKind::Credit));
        assert_eq!(EntryKind::from_str("transfer"), None);
    }
}
