//! HTTP handlers for stock movement endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock::{
    ProductionResult, ReceiveProductionInput, ReceivePurchaseInput, RecordMovementInput,
    StockMovement, StockOwner, StockService, UpdateMovementInput,
};
use crate::AppState;

/// Record a manual stock movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<StockMovement>> {
    let service = StockService::new(state.db);
    let movement = service
        .record_movement(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(movement))
}

/// Correct a recorded stock movement
pub async fn update_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(movement_id): Path<Uuid>,
    Json(input): Json<UpdateMovementInput>,
) -> AppResult<Json<StockMovement>> {
    let service = StockService::new(state.db);
    let movement = service
        .update_movement(current_user.0.shop_id, movement_id, input)
        .await?;
    Ok(Json(movement))
}

/// Delete a recorded stock movement
pub async fn delete_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(movement_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = StockService::new(state.db);
    service
        .delete_movement(current_user.0.shop_id, movement_id)
        .await?;
    Ok(Json(()))
}

/// Receive purchased material stock
pub async fn receive_purchase(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<ReceivePurchaseInput>,
) -> AppResult<Json<StockMovement>> {
    let service = StockService::new(state.db);
    let movement = service
        .receive_purchase(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(movement))
}

/// Receive produced product stock, consuming its recipe
pub async fn receive_production(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<ReceiveProductionInput>,
) -> AppResult<Json<ProductionResult>> {
    let service = StockService::new(state.db);
    let result = service
        .receive_production(current_user.0.shop_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(result))
}

/// List all movements for the shop
pub async fn list_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = StockService::new(state.db);
    let movements = service.list_movements(current_user.0.shop_id).await?;
    Ok(Json(movements))
}

/// Movements recorded against one material
pub async fn get_material_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = StockService::new(state.db);
    let movements = service
        .get_movements(current_user.0.shop_id, StockOwner::Material, material_id)
        .await?;
    Ok(Json(movements))
}

/// Movements recorded against one product
pub async fn get_product_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = StockService::new(state.db);
    let movements = service
        .get_movements(current_user.0.shop_id, StockOwner::Product, product_id)
        .await?;
    Ok(Json(movements))
}
