//! HTTP handlers for product catalog and recipe endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::product::{
    AddRecipeItemInput, CreateProductInput, Product, ProductService, RecipeItem,
    UpdateProductInput,
};
use crate::AppState;

/// Register a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create_product(current_user.0.shop_id, input).await?;
    Ok(Json(product))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .get_product(current_user.0.shop_id, product_id)
        .await?;
    Ok(Json(product))
}

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products(current_user.0.shop_id).await?;
    Ok(Json(products))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service
        .update_product(current_user.0.shop_id, product_id, input)
        .await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db);
    service
        .delete_product(current_user.0.shop_id, product_id)
        .await?;
    Ok(Json(()))
}

/// Declare an ingredient of a product
pub async fn add_recipe_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AddRecipeItemInput>,
) -> AppResult<Json<RecipeItem>> {
    let service = ProductService::new(state.db);
    let item = service
        .add_recipe_item(current_user.0.shop_id, product_id, input)
        .await?;
    Ok(Json(item))
}

/// Get a product's recipe
pub async fn get_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<RecipeItem>>> {
    let service = ProductService::new(state.db);
    let items = service
        .get_recipe(current_user.0.shop_id, product_id)
        .await?;
    Ok(Json(items))
}

/// Remove an ingredient from a product's recipe
pub async fn remove_recipe_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path((product_id, material_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db);
    service
        .remove_recipe_item(current_user.0.shop_id, product_id, material_id)
        .await?;
    Ok(Json(()))
}
