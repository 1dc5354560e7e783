//! HTTP handlers for material catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::material::{
    CreateMaterialInput, Material, MaterialService, UpdateMaterialInput,
};
use crate::AppState;

/// Register a material
pub async fn create_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service
        .create_material(current_user.0.shop_id, input)
        .await?;
    Ok(Json(material))
}

/// Get a material by ID
pub async fn get_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service
        .get_material(current_user.0.shop_id, material_id)
        .await?;
    Ok(Json(material))
}

/// List all materials
pub async fn list_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list_materials(current_user.0.shop_id).await?;
    Ok(Json(materials))
}

/// List materials at or below their minimum stock level
pub async fn list_low_stock_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Material>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list_low_stock(current_user.0.shop_id).await?;
    Ok(Json(materials))
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<Material>> {
    let service = MaterialService::new(state.db);
    let material = service
        .update_material(current_user.0.shop_id, material_id, input)
        .await?;
    Ok(Json(material))
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MaterialService::new(state.db);
    service
        .delete_material(current_user.0.shop_id, material_id)
        .await?;
    Ok(Json(()))
}
