//! HTTP handlers for loan and salary settlement endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::payroll::{
    DisburseLoanInput, EmployeeRepaymentResult, Loan, LoanWithEntries, PayrollService,
    PaySalaryInput, RepayEmployeeLoansInput, RepayLoanInput, RepaymentResult, SalaryRecord,
    SalarySettlement,
};
use crate::AppState;

/// Optional employee filter for payroll listings
#[derive(Debug, Deserialize)]
pub struct PayrollListQuery {
    pub employee_id: Option<Uuid>,
}

/// Disburse a loan
pub async fn disburse_loan(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<DisburseLoanInput>,
) -> AppResult<Json<Loan>> {
    let service = PayrollService::new(state.db);
    let loan = service
        .disburse_loan(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(loan))
}

/// Get a loan with its ledger entries
pub async fn get_loan(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(loan_id): Path<Uuid>,
) -> AppResult<Json<LoanWithEntries>> {
    let service = PayrollService::new(state.db);
    let loan = service.get_loan(current_user.0.shop_id, loan_id).await?;
    Ok(Json(loan))
}

/// List loans, optionally for one employee
pub async fn list_loans(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<PayrollListQuery>,
) -> AppResult<Json<Vec<Loan>>> {
    let service = PayrollService::new(state.db);
    let loans = service
        .list_loans(current_user.0.shop_id, query.employee_id)
        .await?;
    Ok(Json(loans))
}

/// Repay one loan
pub async fn repay_loan(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(loan_id): Path<Uuid>,
    Json(input): Json<RepayLoanInput>,
) -> AppResult<Json<RepaymentResult>> {
    let service = PayrollService::new(state.db);
    let result = service
        .repay_loan(current_user.0.shop_id, current_user.0.user_id, loan_id, input)
        .await?;
    Ok(Json(result))
}

/// Pay down all of an employee's active loans, oldest first
pub async fn repay_employee_loans(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
    Json(input): Json<RepayEmployeeLoansInput>,
) -> AppResult<Json<EmployeeRepaymentResult>> {
    let service = PayrollService::new(state.db);
    let result = service
        .repay_employee_loans(
            current_user.0.shop_id,
            current_user.0.user_id,
            employee_id,
            input,
        )
        .await?;
    Ok(Json(result))
}

/// Settle an employee's salary for a month
pub async fn pay_salary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<PaySalaryInput>,
) -> AppResult<Json<SalarySettlement>> {
    let service = PayrollService::new(state.db);
    let settlement = service
        .pay_salary(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(settlement))
}

/// List salary records, optionally for one employee
pub async fn list_salaries(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<PayrollListQuery>,
) -> AppResult<Json<Vec<SalaryRecord>>> {
    let service = PayrollService::new(state.db);
    let salaries = service
        .list_salaries(current_user.0.shop_id, query.employee_id)
        .await?;
    Ok(Json(salaries))
}
