//! Salary and loan settlement arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Net salary: `amount + bonus − fine − loan_deductions`, floored at zero
pub fn salary_net(
    amount: Decimal,
    bonus: Decimal,
    fine: Decimal,
    loan_deductions: Decimal,
) -> Decimal {
    let net = amount + bonus - fine - loan_deductions;
    if net < Decimal::ZERO {
        Decimal::ZERO
    } else {
        net
    }
}

/// Outstanding slice of one loan, as seen by the allocation planner
///
/// Loans must be supplied in origination order (oldest first); the planner
/// does not reorder them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanOutstanding {
    pub loan_id: Uuid,
    pub balance: Decimal,
}

/// One planned repayment against a single loan
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_id: Uuid,
    pub applied: Decimal,
    /// True when this application drives the loan balance to zero
    pub closes_loan: bool,
}

/// Result of spreading a payment amount across loans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub applications: Vec<LoanApplication>,
    /// Amount left over after every supplied loan is fully settled
    pub remainder: Decimal,
}

impl AllocationPlan {
    /// Total amount applied to loans by this plan
    pub fn total_applied(&self) -> Decimal {
        self.applications.iter().map(|a| a.applied).sum()
    }
}

/// Spread a payment across loans in the order given, capping each
/// application at that loan's balance
///
/// Loans with a zero (or negative) balance are skipped. Whatever is left
/// after all loans close becomes the plan's `remainder`.
pub fn allocate_payment(loans: &[LoanOutstanding], amount: Decimal) -> AllocationPlan {
    let mut left = amount;
    let mut applications = Vec::new();

    for loan in loans {
        if left <= Decimal::ZERO {
            break;
        }
        if loan.balance <= Decimal::ZERO {
            continue;
        }

        let applied = if left < loan.balance { left } else { loan.balance };
        applications.push(LoanApplication {
            loan_id: loan.loan_id,
            applied,
            closes_loan: applied == loan.balance,
        });
        left -= applied;
    }

    AllocationPlan {
        applications,
        remainder: left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loan(balance: &str) -> LoanOutstanding {
        LoanOutstanding {
            loan_id: Uuid::new_v4(),
            balance: dec(balance),
        }
    }

    #[test]
    fn test_salary_net_formula() {
        assert_eq!(
            salary_net(dec("1000"), dec("200"), dec("50"), dec("300")),
            dec("850")
        );
    }

    #[test]
    fn test_salary_net_floors_at_zero() {
        assert_eq!(
            salary_net(dec("500"), dec("0"), dec("100"), dec("600")),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_allocation_caps_at_balance() {
        let plan = allocate_payment(&[loan("400")], dec("1000"));
        assert_eq!(plan.applications.len(), 1);
        assert_eq!(plan.applications[0].applied, dec("400"));
        assert!(plan.applications[0].closes_loan);
        assert_eq!(plan.remainder, dec("600"));
    }

    #[test]
    fn test_allocation_walks_loans_in_order() {
        let loans = [loan("300"), loan("500")];
        let plan = allocate_payment(&loans, dec("450"));
        assert_eq!(plan.applications.len(), 2);
        assert_eq!(plan.applications[0].loan_id, loans[0].loan_id);
        assert_eq!(plan.applications[0].applied, dec("300"));
        assert!(plan.applications[0].closes_loan);
        assert_eq!(plan.applications[1].applied, dec("150"));
        assert!(!plan.applications[1].closes_loan);
        assert_eq!(plan.remainder, Decimal::ZERO);
    }

    #[test]
    fn test_allocation_skips_settled_loans() {
        let loans = [loan("0"), loan("200")];
        let plan = allocate_payment(&loans, dec("100"));
        assert_eq!(plan.applications.len(), 1);
        assert_eq!(plan.applications[0].loan_id, loans[1].loan_id);
    }
}
