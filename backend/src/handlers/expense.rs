//! HTTP handlers for expense tracking endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::expense::{CreateExpenseInput, Expense, ExpenseService, UpdateExpenseInput};
use crate::AppState;
use shared::types::DateRange;

/// Optional date range for expense listings
#[derive(Debug, Deserialize)]
pub struct ExpenseListQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service
        .create_expense(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(expense))
}

/// Get an expense by ID
pub async fn get_expense(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(expense_id): Path<Uuid>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service
        .get_expense(current_user.0.shop_id, expense_id)
        .await?;
    Ok(Json(expense))
}

/// List expenses, optionally within a date range
pub async fn list_expenses(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ExpenseListQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let range = match (query.start, query.end) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    let service = ExpenseService::new(state.db);
    let expenses = service.list_expenses(current_user.0.shop_id, range).await?;
    Ok(Json(expenses))
}

/// Update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(expense_id): Path<Uuid>,
    Json(input): Json<UpdateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service
        .update_expense(current_user.0.shop_id, expense_id, input)
        .await?;
    Ok(Json(expense))
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(expense_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ExpenseService::new(state.db);
    service
        .delete_expense(current_user.0.shop_id, expense_id)
        .await?;
    Ok(Json(()))
}
