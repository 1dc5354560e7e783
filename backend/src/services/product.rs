//! Product catalog and recipe service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::{validate_name, validate_non_negative_amount, validate_positive_quantity};

/// Product service for managing finished products and their recipes
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// A finished product with its stock position
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub unit: String,
    pub sale_price: Decimal,
    pub cost_price: Decimal,
    pub current_stock: Decimal,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recipe link joined with its material for display
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecipeItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub material_unit: String,
    pub quantity_required: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub unit: String,
    pub sale_price: Decimal,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub sale_price: Option<Decimal>,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Input for declaring an ingredient of a product
#[derive(Debug, Deserialize)]
pub struct AddRecipeItemInput {
    pub material_id: Uuid,
    /// Material quantity consumed per unit of product received
    pub quantity_required: Decimal,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a product
    pub async fn create_product(
        &self,
        shop_id: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อสินค้า".to_string(),
            });
        }

        if let Err(msg) = validate_non_negative_amount(input.sale_price) {
            return Err(AppError::Validation {
                field: "sale_price".to_string(),
                message: msg.to_string(),
                message_th: "ราคาขายต้องไม่ติดลบ".to_string(),
            });
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (shop_id, name, unit, sale_price, min_stock_level, max_stock_level)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, shop_id, name, unit, sale_price, cost_price, current_stock,
                      min_stock_level, max_stock_level, is_active, created_at, updated_at
            "#,
        )
        .bind(shop_id)
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.sale_price)
        .bind(input.min_stock_level)
        .bind(input.max_stock_level)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, shop_id: Uuid, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, unit, sale_price, cost_price, current_stock,
                   min_stock_level, max_stock_level, is_active, created_at, updated_at
            FROM products
            WHERE id = $1 AND shop_id = $2
            "#,
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// List all products for a shop
    pub async fn list_products(&self, shop_id: Uuid) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, unit, sale_price, cost_price, current_stock,
                   min_stock_level, max_stock_level, is_active, created_at, updated_at
            FROM products
            WHERE shop_id = $1
            ORDER BY name
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Update a product's descriptive fields
    pub async fn update_product(
        &self,
        shop_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(shop_id, product_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อสินค้า".to_string(),
            });
        }

        let sale_price = input.sale_price.unwrap_or(existing.sale_price);
        if let Err(msg) = validate_non_negative_amount(sale_price) {
            return Err(AppError::Validation {
                field: "sale_price".to_string(),
                message: msg.to_string(),
                message_th: "ราคาขายต้องไม่ติดลบ".to_string(),
            });
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, unit = $2, sale_price = $3, min_stock_level = $4,
                max_stock_level = $5, is_active = $6, updated_at = NOW()
            WHERE id = $7 AND shop_id = $8
            RETURNING id, shop_id, name, unit, sale_price, cost_price, current_stock,
                      min_stock_level, max_stock_level, is_active, created_at, updated_at
            "#,
        )
        .bind(name.trim())
        .bind(input.unit.unwrap_or(existing.unit))
        .bind(sale_price)
        .bind(input.min_stock_level.or(existing.min_stock_level))
        .bind(input.max_stock_level.or(existing.max_stock_level))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(product_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Delete a product that has never moved or been billed
    pub async fn delete_product(&self, shop_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let has_history = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM stock_movements
                          WHERE shop_id = $1 AND owner_type = 'product' AND owner_id = $2)
                OR EXISTS(SELECT 1 FROM bill_items WHERE shop_id = $1 AND product_id = $2)
            "#,
        )
        .bind(shop_id)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if has_history {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "Product has stock or billing history; deactivate it instead".to_string(),
                message_th: "สินค้ามีประวัติสต็อกหรือการขาย กรุณาปิดการใช้งานแทน".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND shop_id = $2")
            .bind(product_id)
            .bind(shop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// Declare (or re-declare) an ingredient of a product
    ///
    /// Re-adding an existing material updates its required quantity.
    pub async fn add_recipe_item(
        &self,
        shop_id: Uuid,
        product_id: Uuid,
        input: AddRecipeItemInput,
    ) -> AppResult<RecipeItem> {
        if let Err(msg) = validate_positive_quantity(input.quantity_required) {
            return Err(AppError::Validation {
                field: "quantity_required".to_string(),
                message: msg.to_string(),
                message_th: "ปริมาณที่ใช้ต่อหน่วยต้องเป็นค่าบวก".to_string(),
            });
        }

        // Both ends of the link must belong to this shop
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND shop_id = $2)",
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let material_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM materials WHERE id = $1 AND shop_id = $2)",
        )
        .bind(input.material_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        if !material_exists {
            return Err(AppError::NotFound("Material".to_string()));
        }

        let item = sqlx::query_as::<_, RecipeItem>(
            r#"
            WITH upserted AS (
                INSERT INTO product_ingredients (shop_id, product_id, material_id, quantity_required)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (product_id, material_id)
                DO UPDATE SET quantity_required = EXCLUDED.quantity_required
                RETURNING id, product_id, material_id, quantity_required, created_at
            )
            SELECT u.id, u.product_id, u.material_id, m.name AS material_name,
                   m.unit AS material_unit, u.quantity_required, u.created_at
            FROM upserted u
            JOIN materials m ON m.id = u.material_id
            "#,
        )
        .bind(shop_id)
        .bind(product_id)
        .bind(input.material_id)
        .bind(input.quantity_required)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// List a product's recipe in declaration order
    pub async fn get_recipe(&self, shop_id: Uuid, product_id: Uuid) -> AppResult<Vec<RecipeItem>> {
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND shop_id = $2)",
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let items = sqlx::query_as::<_, RecipeItem>(
            r#"
            SELECT pi.id, pi.product_id, pi.material_id, m.name AS material_name,
                   m.unit AS material_unit, pi.quantity_required, pi.created_at
            FROM product_ingredients pi
            JOIN materials m ON m.id = pi.material_id
            WHERE pi.product_id = $1 AND pi.shop_id = $2
            ORDER BY pi.created_at
            "#,
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Remove an ingredient from a product's recipe
    pub async fn remove_recipe_item(
        &self,
        shop_id: Uuid,
        product_id: Uuid,
        material_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM product_ingredients \
             WHERE shop_id = $1 AND product_id = $2 AND material_id = $3",
        )
        .bind(shop_id)
        .bind(product_id)
        .bind(material_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Recipe item".to_string()));
        }

        Ok(())
    }
}
