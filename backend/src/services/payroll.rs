//! Employee loan and salary settlement service
//!
//! A loan's balance only moves through ledger entries: a `credit` entry at
//! disbursal, `debit` entries for every repayment, and a standalone
//! `adjustment` entry when a pay-all payment exceeds the total outstanding.
//! Each settlement call is one transaction; loan rows are locked while
//! their balances move.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{allocate_payment, salary_net, LoanOutstanding};
use shared::validation::{normalize_month, validate_non_negative_amount, validate_positive_amount};

/// Payroll service for employee loans and salary settlement
#[derive(Clone)]
pub struct PayrollService {
    db: PgPool,
}

/// Loan lifecycle: `active` until the balance reaches zero, then `paid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Paid,
}

/// An employee loan
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub employee_id: Uuid,
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    pub total_balance: Decimal,
    /// Suggested per-month deduction; repayments are not forced to match it
    pub installment_amount: Option<Decimal>,
    pub status: LoanStatus,
    pub issued_on: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One loan ledger entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LoanEntry {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub employee_id: Uuid,
    pub loan_id: Option<Uuid>,
    pub entry_kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A loan with its ledger
#[derive(Debug, Clone, Serialize)]
pub struct LoanWithEntries {
    #[serde(flatten)]
    pub loan: Loan,
    pub entries: Vec<LoanEntry>,
}

/// One salary record, keyed by employee and month
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalaryRecord {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub employee_id: Uuid,
    pub month: NaiveDate,
    pub amount: Decimal,
    pub bonus: Decimal,
    pub fine: Decimal,
    pub loan_deduction: Decimal,
    pub net_amount: Decimal,
    pub status: String,
    pub paid_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for disbursing a loan
#[derive(Debug, Deserialize)]
pub struct DisburseLoanInput {
    pub employee_id: Uuid,
    pub amount: Decimal,
    /// Suggested monthly installment for salary deductions
    pub installment_amount: Option<Decimal>,
    pub issued_on: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Input for repaying one loan
#[derive(Debug, Deserialize)]
pub struct RepayLoanInput {
    pub amount: Decimal,
    /// Payment method, e.g. "cash" or "bank"
    pub method: Option<String>,
    pub description: Option<String>,
}

/// Input for paying down all of an employee's active loans
#[derive(Debug, Deserialize)]
pub struct RepayEmployeeLoansInput {
    pub amount: Decimal,
    /// Payment method, e.g. "cash" or "bank"
    pub method: Option<String>,
    pub description: Option<String>,
}

/// One requested salary deduction against a specific loan
#[derive(Debug, Deserialize)]
pub struct LoanDeductionInput {
    pub loan_id: Uuid,
    pub amount: Decimal,
}

/// Input for a monthly salary payment
#[derive(Debug, Deserialize)]
pub struct PaySalaryInput {
    pub employee_id: Uuid,
    /// Any date inside the month being paid
    pub month: NaiveDate,
    pub amount: Decimal,
    pub bonus: Option<Decimal>,
    pub fine: Option<Decimal>,
    pub loan_deductions: Option<Vec<LoanDeductionInput>>,
}

/// Outcome of a repayment against one loan
#[derive(Debug, Clone, Serialize)]
pub struct AppliedRepayment {
    pub loan_id: Uuid,
    pub applied: Decimal,
    pub balance_after: Decimal,
    pub status: LoanStatus,
}

/// Outcome of a single-loan repayment
#[derive(Debug, Serialize)]
pub struct RepaymentResult {
    pub loan: Loan,
    /// Amount actually applied, capped at the loan balance
    pub applied: Decimal,
}

/// Outcome of a pay-all repayment across an employee's loans
#[derive(Debug, Serialize)]
pub struct EmployeeRepaymentResult {
    pub applications: Vec<AppliedRepayment>,
    pub total_applied: Decimal,
    /// Amount beyond all outstanding balances, kept as an adjustment entry
    pub remainder: Decimal,
}

/// Outcome of a salary settlement
#[derive(Debug, Serialize)]
pub struct SalarySettlement {
    #[serde(flatten)]
    pub salary: SalaryRecord,
    pub deductions: Vec<AppliedRepayment>,
    /// True when this payment overwrote an existing record for the month
    pub correction: bool,
}

const LOAN_COLUMNS: &str = "id, shop_id, employee_id, total_amount, total_paid, total_balance, \
                            installment_amount, status, issued_on, note, created_at, updated_at";

const ENTRY_COLUMNS: &str =
    "id, shop_id, employee_id, loan_id, entry_kind, amount, description, created_by, created_at";

const SALARY_COLUMNS: &str = "id, shop_id, employee_id, month, amount, bonus, fine, \
                              loan_deduction, net_amount, status, paid_on, created_at, updated_at";

impl PayrollService {
    /// Create a new PayrollService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Disburse a loan to an employee
    ///
    /// Creates the loan with its full amount outstanding and writes the
    /// `credit` ledger entry in the same transaction.
    pub async fn disburse_loan(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: DisburseLoanInput,
    ) -> AppResult<Loan> {
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินกู้ต้องเป็นค่าบวก".to_string(),
            });
        }

        if let Some(installment) = input.installment_amount {
            if let Err(msg) = validate_positive_amount(installment) {
                return Err(AppError::Validation {
                    field: "installment_amount".to_string(),
                    message: msg.to_string(),
                    message_th: "ค่างวดต้องเป็นค่าบวก".to_string(),
                });
            }
        }

        self.ensure_employee(shop_id, input.employee_id).await?;

        let issued_on = input.issued_on.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.db.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(&format!(
            r#"
            INSERT INTO employee_loans (
                shop_id, employee_id, total_amount, total_balance, installment_amount,
                issued_on, note
            )
            VALUES ($1, $2, $3, $3, $4, $5, $6)
            RETURNING {LOAN_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.employee_id)
        .bind(input.amount)
        .bind(input.installment_amount)
        .bind(issued_on)
        .bind(&input.note)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO loan_entries (
                shop_id, employee_id, loan_id, entry_kind, amount, description, created_by
            )
            VALUES ($1, $2, $3, 'credit', $4, $5, $6)
            "#,
        )
        .bind(shop_id)
        .bind(input.employee_id)
        .bind(loan.id)
        .bind(input.amount)
        .bind("Loan disbursed")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Repay one loan directly
    ///
    /// The applied amount is capped at the loan's outstanding balance; the
    /// loan transitions to `paid` exactly when the balance reaches zero.
    pub async fn repay_loan(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        loan_id: Uuid,
        input: RepayLoanInput,
    ) -> AppResult<RepaymentResult> {
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินชำระต้องเป็นค่าบวก".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM employee_loans \
             WHERE id = $1 AND shop_id = $2 FOR UPDATE",
        ))
        .bind(loan_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Loan".to_string()))?;

        if loan.status == LoanStatus::Paid || loan.total_balance <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "loan_id".to_string(),
                message: "Loan is already settled".to_string(),
                message_th: "เงินกู้นี้ชำระครบแล้ว".to_string(),
            });
        }

        let applied = input.amount.min(loan.total_balance);
        let description = repayment_description(input.description, input.method);
        let updated = self
            .apply_repayment(&mut tx, shop_id, user_id, &loan, applied, &description)
            .await?;

        tx.commit().await?;

        Ok(RepaymentResult {
            loan: updated,
            applied,
        })
    }

    /// Pay down all of an employee's active loans, oldest first
    ///
    /// Loans are settled in origination order until the amount runs out. A
    /// remainder beyond every outstanding balance is recorded as a
    /// standalone adjustment entry, not attached to any loan.
    pub async fn repay_employee_loans(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        employee_id: Uuid,
        input: RepayEmployeeLoansInput,
    ) -> AppResult<EmployeeRepaymentResult> {
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินชำระต้องเป็นค่าบวก".to_string(),
            });
        }

        self.ensure_employee(shop_id, employee_id).await?;

        let mut tx = self.db.begin().await?;

        let loans = sqlx::query_as::<_, Loan>(&format!(
            r#"
            SELECT {LOAN_COLUMNS}
            FROM employee_loans
            WHERE employee_id = $1 AND shop_id = $2 AND status = 'active'
            ORDER BY issued_on, created_at
            FOR UPDATE
            "#,
        ))
        .bind(employee_id)
        .bind(shop_id)
        .fetch_all(&mut *tx)
        .await?;

        let outstanding: Vec<LoanOutstanding> = loans
            .iter()
            .map(|l| LoanOutstanding {
                loan_id: l.id,
                balance: l.total_balance,
            })
            .collect();
        let plan = allocate_payment(&outstanding, input.amount);

        let description = repayment_description(input.description, input.method);

        let mut applications = Vec::with_capacity(plan.applications.len());
        for application in &plan.applications {
            let loan = loans
                .iter()
                .find(|l| l.id == application.loan_id)
                .ok_or_else(|| {
                    AppError::Internal("Allocation referenced an unknown loan".to_string())
                })?;
            let updated = self
                .apply_repayment(&mut tx, shop_id, user_id, loan, application.applied, &description)
                .await?;
            applications.push(AppliedRepayment {
                loan_id: updated.id,
                applied: application.applied,
                balance_after: updated.total_balance,
                status: updated.status,
            });
        }

        if plan.remainder > Decimal::ZERO {
            sqlx::query(
                r#"
                INSERT INTO loan_entries (
                    shop_id, employee_id, loan_id, entry_kind, amount, description, created_by
                )
                VALUES ($1, $2, NULL, 'adjustment', $3, $4, $5)
                "#,
            )
            .bind(shop_id)
            .bind(employee_id)
            .bind(plan.remainder)
            .bind("Payment beyond outstanding loan balance")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(EmployeeRepaymentResult {
            total_applied: plan.total_applied(),
            remainder: plan.remainder,
            applications,
        })
    }

    /// Settle an employee's salary for one month
    ///
    /// `net = amount + bonus − fine − Σ(applied loan deductions)`, floored
    /// at zero. One record per employee and month: paying the same month
    /// again overwrites the record as an explicit, logged correction.
    pub async fn pay_salary(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: PaySalaryInput,
    ) -> AppResult<SalarySettlement> {
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "เงินเดือนต้องเป็นค่าบวก".to_string(),
            });
        }
        let bonus = input.bonus.unwrap_or(Decimal::ZERO);
        let fine = input.fine.unwrap_or(Decimal::ZERO);
        for (field, amount) in [("bonus", bonus), ("fine", fine)] {
            if let Err(msg) = validate_non_negative_amount(amount) {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: msg.to_string(),
                    message_th: "จำนวนเงินต้องไม่ติดลบ".to_string(),
                });
            }
        }

        self.ensure_employee(shop_id, input.employee_id).await?;

        let month = normalize_month(input.month);

        let mut tx = self.db.begin().await?;

        let correction = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM salary_records \
             WHERE shop_id = $1 AND employee_id = $2 AND month = $3)",
        )
        .bind(shop_id)
        .bind(input.employee_id)
        .bind(month)
        .fetch_one(&mut *tx)
        .await?;

        if correction {
            tracing::warn!(
                employee_id = %input.employee_id,
                month = %month,
                "overwriting existing salary record as a correction"
            );
        }

        let mut deductions = Vec::new();
        let mut total_deducted = Decimal::ZERO;
        for deduction in input.loan_deductions.unwrap_or_default() {
            if let Err(msg) = validate_positive_amount(deduction.amount) {
                return Err(AppError::Validation {
                    field: "loan_deductions".to_string(),
                    message: msg.to_string(),
                    message_th: "จำนวนเงินหักต้องเป็นค่าบวก".to_string(),
                });
            }

            let loan = sqlx::query_as::<_, Loan>(&format!(
                "SELECT {LOAN_COLUMNS} FROM employee_loans \
                 WHERE id = $1 AND shop_id = $2 AND employee_id = $3 FOR UPDATE",
            ))
            .bind(deduction.loan_id)
            .bind(shop_id)
            .bind(input.employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan".to_string()))?;

            // A settled loan contributes nothing; the cap handles the rest
            let applied = deduction.amount.min(loan.total_balance);
            if applied <= Decimal::ZERO {
                continue;
            }

            let description = format!("Salary deduction for {}", month.format("%Y-%m"));
            let updated = self
                .apply_repayment(&mut tx, shop_id, user_id, &loan, applied, &description)
                .await?;

            total_deducted += applied;
            deductions.push(AppliedRepayment {
                loan_id: updated.id,
                applied,
                balance_after: updated.total_balance,
                status: updated.status,
            });
        }

        let net_amount = salary_net(input.amount, bonus, fine, total_deducted);
        let paid_on = Utc::now().date_naive();

        let salary = sqlx::query_as::<_, SalaryRecord>(&format!(
            r#"
            INSERT INTO salary_records (
                shop_id, employee_id, month, amount, bonus, fine, loan_deduction,
                net_amount, status, paid_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'paid', $9)
            ON CONFLICT (shop_id, employee_id, month)
            DO UPDATE SET amount = EXCLUDED.amount, bonus = EXCLUDED.bonus,
                          fine = EXCLUDED.fine, loan_deduction = EXCLUDED.loan_deduction,
                          net_amount = EXCLUDED.net_amount, status = EXCLUDED.status,
                          paid_on = EXCLUDED.paid_on, updated_at = NOW()
            RETURNING {SALARY_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.employee_id)
        .bind(month)
        .bind(input.amount)
        .bind(bonus)
        .bind(fine)
        .bind(total_deducted)
        .bind(net_amount)
        .bind(paid_on)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SalarySettlement {
            salary,
            deductions,
            correction,
        })
    }

    /// Get a loan with its ledger entries
    pub async fn get_loan(&self, shop_id: Uuid, loan_id: Uuid) -> AppResult<LoanWithEntries> {
        let loan = sqlx::query_as::<_, Loan>(&format!(
            "SELECT {LOAN_COLUMNS} FROM employee_loans WHERE id = $1 AND shop_id = $2",
        ))
        .bind(loan_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Loan".to_string()))?;

        let entries = sqlx::query_as::<_, LoanEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM loan_entries \
             WHERE loan_id = $1 AND shop_id = $2 ORDER BY created_at",
        ))
        .bind(loan_id)
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(LoanWithEntries { loan, entries })
    }

    /// List loans for a shop, optionally for one employee
    pub async fn list_loans(
        &self,
        shop_id: Uuid,
        employee_id: Option<Uuid>,
    ) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&format!(
            r#"
            SELECT {LOAN_COLUMNS}
            FROM employee_loans
            WHERE shop_id = $1 AND ($2::uuid IS NULL OR employee_id = $2)
            ORDER BY issued_on DESC, created_at DESC
            "#,
        ))
        .bind(shop_id)
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(loans)
    }

    /// List salary records for a shop, optionally for one employee
    pub async fn list_salaries(
        &self,
        shop_id: Uuid,
        employee_id: Option<Uuid>,
    ) -> AppResult<Vec<SalaryRecord>> {
        let salaries = sqlx::query_as::<_, SalaryRecord>(&format!(
            r#"
            SELECT {SALARY_COLUMNS}
            FROM salary_records
            WHERE shop_id = $1 AND ($2::uuid IS NULL OR employee_id = $2)
            ORDER BY month DESC
            "#,
        ))
        .bind(shop_id)
        .bind(employee_id)
        .fetch_all(&self.db)
        .await?;

        Ok(salaries)
    }

    /// Write one repayment: the `debit` ledger entry plus the loan's
    /// balance move, flipping status to `paid` at zero
    async fn apply_repayment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop_id: Uuid,
        user_id: Uuid,
        loan: &Loan,
        applied: Decimal,
        description: &str,
    ) -> AppResult<Loan> {
        sqlx::query(
            r#"
            INSERT INTO loan_entries (
                shop_id, employee_id, loan_id, entry_kind, amount, description, created_by
            )
            VALUES ($1, $2, $3, 'debit', $4, $5, $6)
            "#,
        )
        .bind(shop_id)
        .bind(loan.employee_id)
        .bind(loan.id)
        .bind(applied)
        .bind(description)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        let updated = sqlx::query_as::<_, Loan>(&format!(
            r#"
            UPDATE employee_loans
            SET total_paid = total_paid + $1,
                total_balance = total_balance - $1,
                status = CASE WHEN total_balance - $1 <= 0 THEN 'paid' ELSE status END,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {LOAN_COLUMNS}
            "#,
        ))
        .bind(applied)
        .bind(loan.id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(updated)
    }

    async fn ensure_employee(&self, shop_id: Uuid, employee_id: Uuid) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1 AND shop_id = $2)",
        )
        .bind(employee_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Employee".to_string()));
        }

        Ok(())
    }
}

/// Ledger entry description for a repayment, folding in the payment method
fn repayment_description(description: Option<String>, method: Option<String>) -> String {
    let base = description.unwrap_or_else(|| "Loan repayment".to_string());
    match method {
        Some(method) => format!("{} ({})", base, method),
        None => base,
    }
}
