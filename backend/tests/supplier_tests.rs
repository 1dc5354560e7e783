//! Supplier ledger tests
//!
//! Tests for supplier balance bookkeeping including:
//! - Property 7: Running Balance Consistency
//! - Property 8: Offsetting Reversal Identity

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{EntryKind, SupplierBalance};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn empty_balance() -> SupplierBalance {
    SupplierBalance {
        total_debit: Decimal::ZERO,
        total_credit: Decimal::ZERO,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// balance = total_debit − total_credit
    #[test]
    fn test_balance_formula() {
        let mut balance = empty_balance();
        balance.apply(EntryKind::Debit, dec("2500"));
        balance.apply(EntryKind::Credit, dec("1000"));
        balance.apply(EntryKind::Debit, dec("500"));

        assert_eq!(balance.total_debit, dec("3000"));
        assert_eq!(balance.total_credit, dec("1000"));
        assert_eq!(balance.balance(), dec("2000"));
    }

    /// Paying more than is owed leaves a negative (in-favor) balance
    #[test]
    fn test_overpaid_supplier_goes_negative() {
        let mut balance = empty_balance();
        balance.apply(EntryKind::Debit, dec("300"));
        balance.apply(EntryKind::Credit, dec("450"));

        assert_eq!(balance.balance(), dec("-150"));
    }

    /// A debit's offset is a credit and vice versa
    #[test]
    fn test_offsetting_kinds() {
        assert_eq!(EntryKind::Debit.offsetting(), EntryKind::Credit);
        assert_eq!(EntryKind::Credit.offsetting(), EntryKind::Debit);
    }

    /// Entry kinds round-trip through their string form
    #[test]
    fn test_entry_kind_round_trip() {
        assert_eq!(EntryKind::from_str("debit"), Some(EntryKind::Debit));
        assert_eq!(EntryKind::from_str("credit"), Some(EntryKind::Credit));
        assert_eq!(EntryKind::from_str("refund"), None);
    }
}

// ============================================================================
// Property 7: Running Balance Consistency
// ============================================================================
// After any sequence of ledger entries, the running totals SHALL equal the
// sums of the individual debits and credits.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 7: Running Balance Consistency
    #[test]
    fn property_7_running_totals_match_entry_sums(
        entries in prop::collection::vec((any::<bool>(), 1u32..100_000), 1..30),
    ) {
        let mut balance = empty_balance();
        let mut debit_sum = Decimal::ZERO;
        let mut credit_sum = Decimal::ZERO;

        for (is_debit, amount) in entries {
            let amount = Decimal::from(amount);
            if is_debit {
                balance.apply(EntryKind::Debit, amount);
                debit_sum += amount;
            } else {
                balance.apply(EntryKind::Credit, amount);
                credit_sum += amount;
            }
        }

        prop_assert_eq!(balance.total_debit, debit_sum);
        prop_assert_eq!(balance.total_credit, credit_sum);
        prop_assert_eq!(balance.balance(), debit_sum - credit_sum);
    }
}

// ============================================================================
// Property 8: Offsetting Reversal Identity
// ============================================================================
// Reversing an entry by applying its offsetting kind with the same amount
// SHALL restore the net balance, while both running totals keep growing
// (the ledger is append-only).

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 8: Offsetting Reversal Identity
    #[test]
    fn property_8_reversal_restores_net_balance(
        seed_entries in prop::collection::vec((any::<bool>(), 1u32..100_000), 0..10),
        is_debit in any::<bool>(),
        amount in 1u32..100_000,
    ) {
        let mut balance = empty_balance();
        for (debit, seed_amount) in seed_entries {
            let kind = if debit { EntryKind::Debit } else { EntryKind::Credit };
            balance.apply(kind, Decimal::from(seed_amount));
        }

        let net_before = balance.balance();
        let debit_before = balance.total_debit;
        let credit_before = balance.total_credit;

        let kind = if is_debit { EntryKind::Debit } else { EntryKind::Credit };
        let amount = Decimal::from(amount);
        balance.apply(kind, amount);
        balance.apply(kind.offsetting(), amount);

        prop_assert_eq!(balance.balance(), net_before);
        // One of the pair is a debit and the other a credit, so both
        // running totals grow by the amount
        prop_assert_eq!(balance.total_debit, debit_before + amount);
        prop_assert_eq!(balance.total_credit, credit_before + amount);
    }
}
