//! HTTP handlers for billing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::billing::{Bill, BillingService, BillWithItems, CreateBillInput};
use crate::AppState;
use shared::types::{PaginatedResponse, Pagination};

/// Pagination query parameters for bill listing
#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// Commit a bill
pub async fn create_bill(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateBillInput>,
) -> AppResult<Json<BillWithItems>> {
    let service = BillingService::new(state.db);
    let bill = service
        .create_bill(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(bill))
}

/// Get a bill with its items
pub async fn get_bill(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(bill_id): Path<Uuid>,
) -> AppResult<Json<BillWithItems>> {
    let service = BillingService::new(state.db);
    let bill = service.get_bill(current_user.0.shop_id, bill_id).await?;
    Ok(Json(bill))
}

/// List bills, newest first
pub async fn list_bills(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<BillListQuery>,
) -> AppResult<Json<PaginatedResponse<Bill>>> {
    let service = BillingService::new(state.db);
    let pagination = Pagination {
        page: query.page,
        per_page: query.per_page,
    };
    let bills = service
        .list_bills(current_user.0.shop_id, pagination)
        .await?;
    Ok(Json(bills))
}

/// Delete a bill, restoring its stock effects
pub async fn delete_bill(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(bill_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = BillingService::new(state.db);
    service.delete_bill(current_user.0.shop_id, bill_id).await?;
    Ok(Json(()))
}
