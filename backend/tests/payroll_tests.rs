//! Payroll tests
//!
//! Tests for loan and salary settlement including:
//! - Property 5: Loan Balance Monotonicity
//! - Property 6: FIFO Allocation Conservation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{allocate_payment, salary_net, LoanOutstanding};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn loan(balance: Decimal) -> LoanOutstanding {
    LoanOutstanding {
        loan_id: Uuid::new_v4(),
        balance,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Worked example: a 1000 loan, a 300 salary deduction, then a direct
    /// 700 payment settles it exactly
    #[test]
    fn test_loan_settlement_scenario() {
        let mut balance = dec("1000");

        // Salary run deducts 300
        let applied = dec("300").min(balance);
        balance -= applied;
        assert_eq!(balance, dec("700"));
        assert!(balance > Decimal::ZERO, "loan should still be active");

        // Direct payment of 700
        let applied = dec("700").min(balance);
        balance -= applied;
        assert_eq!(balance, Decimal::ZERO);
    }

    /// net = amount + bonus − fine − deductions
    #[test]
    fn test_salary_net_formula() {
        assert_eq!(
            salary_net(dec("12000"), dec("1500"), dec("200"), dec("2000")),
            dec("11300")
        );
    }

    /// Net salary never goes below zero
    #[test]
    fn test_salary_net_clamped_at_zero() {
        assert_eq!(
            salary_net(dec("8000"), Decimal::ZERO, dec("500"), dec("9000")),
            Decimal::ZERO
        );
    }

    /// A repayment larger than the balance is capped, and the excess
    /// becomes the plan's remainder
    #[test]
    fn test_overpayment_remainder() {
        let loans = [loan(dec("250"))];
        let plan = allocate_payment(&loans, dec("400"));

        assert_eq!(plan.total_applied(), dec("250"));
        assert_eq!(plan.remainder, dec("150"));
        assert!(plan.applications[0].closes_loan);
    }

    /// Loans are walked oldest-first and later loans only receive what the
    /// earlier ones left over
    #[test]
    fn test_fifo_ordering() {
        let loans = [loan(dec("500")), loan(dec("500")), loan(dec("500"))];
        let plan = allocate_payment(&loans, dec("800"));

        assert_eq!(plan.applications.len(), 2);
        assert_eq!(plan.applications[0].loan_id, loans[0].loan_id);
        assert_eq!(plan.applications[0].applied, dec("500"));
        assert_eq!(plan.applications[1].loan_id, loans[1].loan_id);
        assert_eq!(plan.applications[1].applied, dec("300"));
        assert_eq!(plan.remainder, Decimal::ZERO);
    }
}

// ============================================================================
// Property 5: Loan Balance Monotonicity
// ============================================================================
// For any sequence of repayments, a loan's balance SHALL be non-increasing,
// never negative, and reach zero exactly when the applied total equals the
// loan amount.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 5: Loan Balance Monotonicity
    #[test]
    fn property_5_loan_balance_monotonic(
        loan_amount in 1u32..100_000,
        payments in prop::collection::vec(1u32..10_000, 1..20),
    ) {
        let loan_amount = Decimal::from(loan_amount);
        let mut balance = loan_amount;
        let mut total_applied = Decimal::ZERO;

        for payment in payments {
            let requested = Decimal::from(payment);
            let applied = requested.min(balance);
            let previous = balance;
            balance -= applied;
            total_applied += applied;

            prop_assert!(balance <= previous, "balance increased");
            prop_assert!(balance >= Decimal::ZERO, "balance went negative");

            let settled = balance.is_zero();
            prop_assert_eq!(settled, total_applied == loan_amount);
        }
    }
}

// ============================================================================
// Property 6: FIFO Allocation Conservation
// ============================================================================
// An allocation plan SHALL apply each loan at most its balance, preserve
// loan order, conserve the payment amount, and carry a remainder only when
// every loan is fully settled.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 6: FIFO Allocation Conservation
    #[test]
    fn property_6_allocation_conserves_amount(
        balances in prop::collection::vec(1u32..10_000, 1..8),
        amount in 1u32..100_000,
    ) {
        let loans: Vec<LoanOutstanding> =
            balances.iter().map(|b| loan(Decimal::from(*b))).collect();
        let amount = Decimal::from(amount);
        let total_outstanding: Decimal =
            loans.iter().map(|l| l.balance).sum();

        let plan = allocate_payment(&loans, amount);

        // Conservation: applied + remainder = amount
        prop_assert_eq!(plan.total_applied() + plan.remainder, amount);

        // Caps: no application exceeds its loan's balance
        for application in &plan.applications {
            let source = loans.iter().find(|l| l.loan_id == application.loan_id).unwrap();
            prop_assert!(application.applied <= source.balance);
            prop_assert!(application.applied > Decimal::ZERO);
        }

        // Order: applications follow the supplied loan order
        let order: Vec<usize> = plan
            .applications
            .iter()
            .map(|a| loans.iter().position(|l| l.loan_id == a.loan_id).unwrap())
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));

        // Remainder appears only when everything is settled
        if plan.remainder > Decimal::ZERO {
            prop_assert_eq!(plan.total_applied(), total_outstanding);
        }
    }

    /// Property 6 variant: net salary is never negative and deductions
    /// never exceed what the loans can absorb
    #[test]
    fn property_6_salary_deductions_bounded(
        amount in 1u32..50_000,
        bonus in 0u32..10_000,
        fine in 0u32..10_000,
        balances in prop::collection::vec(1u32..5_000, 0..5),
        requested in 0u32..50_000,
    ) {
        let loans: Vec<LoanOutstanding> =
            balances.iter().map(|b| loan(Decimal::from(*b))).collect();
        let plan = allocate_payment(&loans, Decimal::from(requested));

        let net = salary_net(
            Decimal::from(amount),
            Decimal::from(bonus),
            Decimal::from(fine),
            plan.total_applied(),
        );

        prop_assert!(net >= Decimal::ZERO);

        let total_outstanding: Decimal = loans.iter().map(|l| l.balance).sum();
        prop_assert!(plan.total_applied() <= total_outstanding);
    }
}
