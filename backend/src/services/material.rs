//! Raw material catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::validate_name;

/// Material service for managing the raw material catalog
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// A raw material with its stock position
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Material {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub unit: String,
    pub current_stock: Decimal,
    pub avg_cost: Decimal,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub name: String,
    pub unit: String,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
}

/// Input for updating a material
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub min_stock_level: Option<Decimal>,
    pub max_stock_level: Option<Decimal>,
    pub is_active: Option<bool>,
}

const MATERIAL_COLUMNS: &str = "id, shop_id, name, unit, current_stock, avg_cost, \
                                min_stock_level, max_stock_level, is_active, created_at, updated_at";

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a raw material
    pub async fn create_material(
        &self,
        shop_id: Uuid,
        input: CreateMaterialInput,
    ) -> AppResult<Material> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อวัตถุดิบ".to_string(),
            });
        }

        if input.unit.trim().is_empty() {
            return Err(AppError::Validation {
                field: "unit".to_string(),
                message: "Unit of measure is required".to_string(),
                message_th: "ต้องระบุหน่วยนับ".to_string(),
            });
        }

        let material = sqlx::query_as::<_, Material>(&format!(
            r#"
            INSERT INTO materials (shop_id, name, unit, min_stock_level, max_stock_level)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.min_stock_level)
        .bind(input.max_stock_level)
        .fetch_one(&self.db)
        .await?;

        Ok(material)
    }

    /// Get a material by ID
    pub async fn get_material(&self, shop_id: Uuid, material_id: Uuid) -> AppResult<Material> {
        let material = sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1 AND shop_id = $2",
        ))
        .bind(material_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        Ok(material)
    }

    /// List all materials for a shop
    pub async fn list_materials(&self, shop_id: Uuid) -> AppResult<Vec<Material>> {
        let materials = sqlx::query_as::<_, Material>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials WHERE shop_id = $1 ORDER BY name",
        ))
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    /// Materials at or below their minimum stock level
    pub async fn list_low_stock(&self, shop_id: Uuid) -> AppResult<Vec<Material>> {
        let materials = sqlx::query_as::<_, Material>(&format!(
            r#"
            SELECT {MATERIAL_COLUMNS}
            FROM materials
            WHERE shop_id = $1 AND is_active = TRUE
              AND min_stock_level IS NOT NULL AND current_stock <= min_stock_level
            ORDER BY name
            "#,
        ))
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    /// Update a material's descriptive fields
    pub async fn update_material(
        &self,
        shop_id: Uuid,
        material_id: Uuid,
        input: UpdateMaterialInput,
    ) -> AppResult<Material> {
        let existing = self.get_material(shop_id, material_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อวัตถุดิบ".to_string(),
            });
        }

        let material = sqlx::query_as::<_, Material>(&format!(
            r#"
            UPDATE materials
            SET name = $1, unit = $2, min_stock_level = $3, max_stock_level = $4,
                is_active = $5, updated_at = NOW()
            WHERE id = $6 AND shop_id = $7
            RETURNING {MATERIAL_COLUMNS}
            "#,
        ))
        .bind(name.trim())
        .bind(input.unit.unwrap_or(existing.unit))
        .bind(input.min_stock_level.or(existing.min_stock_level))
        .bind(input.max_stock_level.or(existing.max_stock_level))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(material_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(material)
    }

    /// Delete a material that has never moved
    ///
    /// A material with recorded stock movements or recipe links keeps its
    /// ledger history; deactivate it instead.
    pub async fn delete_material(&self, shop_id: Uuid, material_id: Uuid) -> AppResult<()> {
        let has_movements = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM stock_movements \
             WHERE shop_id = $1 AND owner_type = 'material' AND owner_id = $2)",
        )
        .bind(shop_id)
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        if has_movements {
            return Err(AppError::Conflict {
                resource: "material".to_string(),
                message: "Material has recorded stock movements; deactivate it instead".to_string(),
                message_th: "วัตถุดิบมีประวัติการเคลื่อนไหวสต็อก กรุณาปิดการใช้งานแทน".to_string(),
            });
        }

        let in_recipes = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_ingredients WHERE material_id = $1)",
        )
        .bind(material_id)
        .fetch_one(&self.db)
        .await?;

        if in_recipes {
            return Err(AppError::Conflict {
                resource: "material".to_string(),
                message: "Material is used by product recipes; remove those links first".to_string(),
                message_th: "วัตถุดิบถูกใช้ในสูตรสินค้า กรุณาลบออกจากสูตรก่อน".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM materials WHERE id = $1 AND shop_id = $2")
            .bind(material_id)
            .bind(shop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }
}
