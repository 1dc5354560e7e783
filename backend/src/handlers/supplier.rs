//! HTTP handlers for supplier directory and ledger endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::supplier::{
    CreateSupplierInput, RecordSupplierTransactionInput, Supplier, SupplierBalanceView,
    SupplierService, SupplierTransaction, UpdateSupplierInput,
};
use crate::AppState;

/// Register a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service
        .create_supplier(current_user.0.shop_id, input)
        .await?;
    Ok(Json(supplier))
}

/// Get a supplier by ID
pub async fn get_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service
        .get_supplier(current_user.0.shop_id, supplier_id)
        .await?;
    Ok(Json(supplier))
}

/// List all suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers(current_user.0.shop_id).await?;
    Ok(Json(suppliers))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service
        .update_supplier(current_user.0.shop_id, supplier_id, input)
        .await?;
    Ok(Json(supplier))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = SupplierService::new(state.db);
    service
        .delete_supplier(current_user.0.shop_id, supplier_id)
        .await?;
    Ok(Json(()))
}

/// Append a ledger entry for a supplier
pub async fn record_supplier_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<RecordSupplierTransactionInput>,
) -> AppResult<Json<SupplierTransaction>> {
    let service = SupplierService::new(state.db);
    let transaction = service
        .record_transaction(
            current_user.0.shop_id,
            current_user.0.user_id,
            supplier_id,
            input,
        )
        .await?;
    Ok(Json(transaction))
}

/// Reverse a ledger entry with an offsetting row
pub async fn reverse_supplier_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<SupplierTransaction>> {
    let service = SupplierService::new(state.db);
    let reversal = service
        .reverse_transaction(
            current_user.0.shop_id,
            current_user.0.user_id,
            transaction_id,
        )
        .await?;
    Ok(Json(reversal))
}

/// Ledger entries for a supplier
pub async fn list_supplier_transactions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Vec<SupplierTransaction>>> {
    let service = SupplierService::new(state.db);
    let transactions = service
        .list_transactions(current_user.0.shop_id, supplier_id)
        .await?;
    Ok(Json(transactions))
}

/// A supplier's running totals and net balance
pub async fn get_supplier_balance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierBalanceView>> {
    let service = SupplierService::new(state.db);
    let balance = service
        .get_balance(current_user.0.shop_id, supplier_id)
        .await?;
    Ok(Json(balance))
}
