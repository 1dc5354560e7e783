//! Stock movement recording, weighted-average costing, and production cascades
//!
//! Every mutation here runs inside one transaction: cost recompute, stock
//! mutate, ledger write. A failure in any step rolls back the whole
//! operation. Rows whose average cost is recomputed are locked with
//! `SELECT … FOR UPDATE`; plain quantity changes use conditional atomic
//! updates.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::StockOnHand;
use shared::validation::{validate_non_negative_amount, validate_positive_quantity};

/// Stock service for recording movements against materials and products
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Which catalog a movement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StockOwner {
    Material,
    Product,
}

impl StockOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOwner::Material => "material",
            StockOwner::Product => "product",
        }
    }
}

/// Direction of a stock movement
///
/// `in` receives a costed lot, `out` issues at the running average,
/// `adjustment` applies a signed correction without touching the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
        }
    }
}

/// What caused a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Purchase,
    Production,
    Sale,
    Return,
    Manual,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Purchase => "purchase",
            ReferenceType::Production => "production",
            ReferenceType::Sale => "sale",
            ReferenceType::Return => "return",
            ReferenceType::Manual => "manual",
        }
    }
}

/// A recorded stock movement
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StockMovement {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub owner_type: StockOwner,
    pub owner_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    pub reference_type: ReferenceType,
    pub reference_id: Option<Uuid>,
    pub batch_no: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub moved_on: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a manual movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub owner_type: StockOwner,
    pub owner_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    /// Unit cost of the incoming lot; defaults to the running average
    pub unit_cost: Option<Decimal>,
    pub reference_id: Option<Uuid>,
    pub batch_no: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub moved_on: Option<NaiveDate>,
}

/// Input for correcting a recorded movement
#[derive(Debug, Deserialize)]
pub struct UpdateMovementInput {
    pub quantity: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
    pub batch_no: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub moved_on: Option<NaiveDate>,
}

/// Input for receiving purchased material stock
#[derive(Debug, Deserialize)]
pub struct ReceivePurchaseInput {
    pub material_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    /// When set, the purchase value is debited to this supplier's ledger
    pub supplier_id: Option<Uuid>,
    pub batch_no: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub moved_on: Option<NaiveDate>,
}

/// Input for receiving produced product stock
#[derive(Debug, Deserialize)]
pub struct ReceiveProductionInput {
    pub product_id: Uuid,
    pub quantity: Decimal,
    /// Unit cost override; derived from consumed ingredients when absent
    pub unit_cost: Option<Decimal>,
    pub batch_no: Option<String>,
    pub moved_on: Option<NaiveDate>,
}

/// One raw material consumed by a production stock-in
#[derive(Debug, Clone, Serialize)]
pub struct ConsumedMaterial {
    pub material_id: Uuid,
    pub material_name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
}

/// Result of a production stock-in with its ingredient cascade
#[derive(Debug, Serialize)]
pub struct ProductionResult {
    pub movement: StockMovement,
    pub unit_cost: Decimal,
    pub consumed: Vec<ConsumedMaterial>,
}

const MOVEMENT_COLUMNS: &str = "id, shop_id, owner_type, owner_id, movement_type, quantity, \
                                unit_cost, total_cost, reference_type, reference_id, batch_no, \
                                expires_on, moved_on, created_by, created_at";

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a movement and apply its effect to the owner's stock
    pub async fn record_movement(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<StockMovement> {
        validate_movement_quantity(input.movement_type, input.quantity)?;
        if let Some(cost) = input.unit_cost {
            if let Err(msg) = validate_non_negative_amount(cost) {
                return Err(AppError::Validation {
                    field: "unit_cost".to_string(),
                    message: msg.to_string(),
                    message_th: "ต้นทุนต่อหน่วยต้องไม่ติดลบ".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let mut stock = self
            .lock_owner(&mut tx, shop_id, input.owner_type, input.owner_id)
            .await?;

        let (unit_cost, total_cost) =
            apply_movement(&mut stock, input.movement_type, input.quantity, input.unit_cost);

        self.save_owner(&mut tx, input.owner_type, input.owner_id, stock)
            .await?;

        let moved_on = input.moved_on.unwrap_or_else(|| Utc::now().date_naive());
        let movement = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            INSERT INTO stock_movements (
                shop_id, owner_type, owner_id, movement_type, quantity, unit_cost, total_cost,
                reference_type, reference_id, batch_no, expires_on, moved_on, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'manual', $8, $9, $10, $11, $12)
            RETURNING {MOVEMENT_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.owner_type.as_str())
        .bind(input.owner_id)
        .bind(input.movement_type.as_str())
        .bind(input.quantity)
        .bind(unit_cost)
        .bind(total_cost)
        .bind(input.reference_id)
        .bind(&input.batch_no)
        .bind(input.expires_on)
        .bind(moved_on)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(movement)
    }

    /// Correct a recorded movement
    ///
    /// Two phases inside one transaction: undo the original effect using
    /// the movement's recorded quantity and unit cost, then apply the new
    /// values as if freshly recorded. Any failure rolls back both phases.
    pub async fn update_movement(
        &self,
        shop_id: Uuid,
        movement_id: Uuid,
        input: UpdateMovementInput,
    ) -> AppResult<StockMovement> {
        let mut tx = self.db.begin().await?;

        let original = sqlx::query_as::<_, StockMovement>(&format!(
            "SELECT {MOVEMENT_COLUMNS} FROM stock_movements \
             WHERE id = $1 AND shop_id = $2 FOR UPDATE",
        ))
        .bind(movement_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock movement".to_string()))?;

        let new_quantity = input.quantity.unwrap_or(original.quantity);
        validate_movement_quantity(original.movement_type, new_quantity)?;

        let mut stock = self
            .lock_owner(&mut tx, shop_id, original.owner_type, original.owner_id)
            .await?;

        // Phase 1: undo the original effect
        reverse_movement(
            &mut stock,
            original.movement_type,
            original.quantity,
            original.unit_cost,
        );

        // Phase 2: apply the corrected movement
        let new_cost = input.unit_cost.unwrap_or(original.unit_cost);
        let (unit_cost, total_cost) =
            apply_movement(&mut stock, original.movement_type, new_quantity, Some(new_cost));

        self.save_owner(&mut tx, original.owner_type, original.owner_id, stock)
            .await?;

        let movement = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            UPDATE stock_movements
            SET quantity = $1, unit_cost = $2, total_cost = $3, batch_no = $4,
                expires_on = $5, moved_on = $6
            WHERE id = $7
            RETURNING {MOVEMENT_COLUMNS}
            "#,
        ))
        .bind(new_quantity)
        .bind(unit_cost)
        .bind(total_cost)
        .bind(input.batch_no.or(original.batch_no))
        .bind(input.expires_on.or(original.expires_on))
        .bind(input.moved_on.unwrap_or(original.moved_on))
        .bind(movement_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(movement)
    }

    /// Delete a recorded movement, undoing its effect on the owner's stock
    pub async fn delete_movement(&self, shop_id: Uuid, movement_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original = sqlx::query_as::<_, StockMovement>(&format!(
            "SELECT {MOVEMENT_COLUMNS} FROM stock_movements \
             WHERE id = $1 AND shop_id = $2 FOR UPDATE",
        ))
        .bind(movement_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock movement".to_string()))?;

        let mut stock = self
            .lock_owner(&mut tx, shop_id, original.owner_type, original.owner_id)
            .await?;

        reverse_movement(
            &mut stock,
            original.movement_type,
            original.quantity,
            original.unit_cost,
        );

        self.save_owner(&mut tx, original.owner_type, original.owner_id, stock)
            .await?;

        sqlx::query("DELETE FROM stock_movements WHERE id = $1")
            .bind(movement_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Receive purchased material stock
    ///
    /// Recomputes the material's weighted-average cost and, when a supplier
    /// is given, debits the purchase value to that supplier's ledger in the
    /// same transaction.
    pub async fn receive_purchase(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: ReceivePurchaseInput,
    ) -> AppResult<StockMovement> {
        if let Err(msg) = validate_positive_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
                message_th: "ปริมาณต้องเป็นค่าบวก".to_string(),
            });
        }
        if let Err(msg) = validate_non_negative_amount(input.unit_cost) {
            return Err(AppError::Validation {
                field: "unit_cost".to_string(),
                message: msg.to_string(),
                message_th: "ต้นทุนต่อหน่วยต้องไม่ติดลบ".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let mut stock = self
            .lock_owner(&mut tx, shop_id, StockOwner::Material, input.material_id)
            .await?;

        stock.receive(input.quantity, input.unit_cost);
        self.save_owner(&mut tx, StockOwner::Material, input.material_id, stock)
            .await?;

        let total_cost = input.quantity * input.unit_cost;
        let moved_on = input.moved_on.unwrap_or_else(|| Utc::now().date_naive());

        let movement = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            INSERT INTO stock_movements (
                shop_id, owner_type, owner_id, movement_type, quantity, unit_cost, total_cost,
                reference_type, batch_no, expires_on, moved_on, created_by
            )
            VALUES ($1, 'material', $2, 'in', $3, $4, $5, 'purchase', $6, $7, $8, $9)
            RETURNING {MOVEMENT_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.material_id)
        .bind(input.quantity)
        .bind(input.unit_cost)
        .bind(total_cost)
        .bind(&input.batch_no)
        .bind(input.expires_on)
        .bind(moved_on)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(supplier_id) = input.supplier_id {
            let supplier_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1 AND shop_id = $2)",
            )
            .bind(supplier_id)
            .bind(shop_id)
            .fetch_one(&mut *tx)
            .await?;

            if !supplier_exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }

            sqlx::query(
                r#"
                INSERT INTO supplier_transactions (
                    shop_id, supplier_id, entry_kind, amount, description,
                    reference_type, reference_id, created_by
                )
                VALUES ($1, $2, 'debit', $3, $4, 'purchase', $5, $6)
                "#,
            )
            .bind(shop_id)
            .bind(supplier_id)
            .bind(total_cost)
            .bind("Stock purchase")
            .bind(movement.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO supplier_balances (supplier_id, shop_id, total_debit)
                VALUES ($1, $2, $3)
                ON CONFLICT (supplier_id)
                DO UPDATE SET total_debit = supplier_balances.total_debit + EXCLUDED.total_debit,
                              updated_at = NOW()
                "#,
            )
            .bind(supplier_id)
            .bind(shop_id)
            .bind(total_cost)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(movement)
    }

    /// Receive produced product stock, consuming its recipe's materials
    ///
    /// Materials are consumed in recipe order; any shortfall aborts the
    /// whole stock-in, including the product movement. When no unit cost is
    /// given it is derived from the consumed ingredient value.
    pub async fn receive_production(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: ReceiveProductionInput,
    ) -> AppResult<ProductionResult> {
        if let Err(msg) = validate_positive_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
                message_th: "ปริมาณต้องเป็นค่าบวก".to_string(),
            });
        }
        if let Some(cost) = input.unit_cost {
            if let Err(msg) = validate_non_negative_amount(cost) {
                return Err(AppError::Validation {
                    field: "unit_cost".to_string(),
                    message: msg.to_string(),
                    message_th: "ต้นทุนต่อหน่วยต้องไม่ติดลบ".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let mut stock = self
            .lock_owner(&mut tx, shop_id, StockOwner::Product, input.product_id)
            .await?;

        let recipe = sqlx::query_as::<_, (Uuid, String, Decimal, Decimal)>(
            r#"
            SELECT m.id, m.name, pi.quantity_required, m.avg_cost
            FROM product_ingredients pi
            JOIN materials m ON m.id = pi.material_id
            WHERE pi.product_id = $1 AND pi.shop_id = $2
            ORDER BY pi.created_at
            "#,
        )
        .bind(input.product_id)
        .bind(shop_id)
        .fetch_all(&mut *tx)
        .await?;

        let movement_id = Uuid::new_v4();
        let moved_on = input.moved_on.unwrap_or_else(|| Utc::now().date_naive());
        let mut consumed = Vec::with_capacity(recipe.len());
        let mut consumed_value = Decimal::ZERO;

        for (material_id, material_name, quantity_required, avg_cost) in recipe {
            let required = quantity_required * input.quantity;

            let updated = sqlx::query(
                r#"
                UPDATE materials
                SET current_stock = current_stock - $1, updated_at = NOW()
                WHERE id = $2 AND shop_id = $3 AND current_stock >= $1
                "#,
            )
            .bind(required)
            .bind(material_id)
            .bind(shop_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if updated == 0 {
                let available = sqlx::query_scalar::<_, Decimal>(
                    "SELECT current_stock FROM materials WHERE id = $1",
                )
                .bind(material_id)
                .fetch_one(&mut *tx)
                .await?;

                return Err(AppError::InsufficientStock {
                    item: material_name,
                    required,
                    available,
                });
            }

            let line_cost = required * avg_cost;
            consumed_value += line_cost;

            sqlx::query(
                r#"
                INSERT INTO stock_movements (
                    shop_id, owner_type, owner_id, movement_type, quantity, unit_cost,
                    total_cost, reference_type, reference_id, moved_on, created_by
                )
                VALUES ($1, 'material', $2, 'out', $3, $4, $5, 'production', $6, $7, $8)
                "#,
            )
            .bind(shop_id)
            .bind(material_id)
            .bind(required)
            .bind(avg_cost)
            .bind(line_cost)
            .bind(movement_id)
            .bind(moved_on)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            consumed.push(ConsumedMaterial {
                material_id,
                material_name,
                quantity: required,
                unit_cost: avg_cost,
                total_cost: line_cost,
            });
        }

        let unit_cost = match input.unit_cost {
            Some(cost) => cost,
            None if consumed_value > Decimal::ZERO => consumed_value / input.quantity,
            None => stock.avg_cost,
        };

        stock.receive(input.quantity, unit_cost);
        self.save_owner(&mut tx, StockOwner::Product, input.product_id, stock)
            .await?;

        let movement = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            INSERT INTO stock_movements (
                id, shop_id, owner_type, owner_id, movement_type, quantity, unit_cost,
                total_cost, reference_type, batch_no, moved_on, created_by
            )
            VALUES ($1, $2, 'product', $3, 'in', $4, $5, $6, 'production', $7, $8, $9)
            RETURNING {MOVEMENT_COLUMNS}
            "#,
        ))
        .bind(movement_id)
        .bind(shop_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(unit_cost)
        .bind(input.quantity * unit_cost)
        .bind(&input.batch_no)
        .bind(moved_on)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ProductionResult {
            movement,
            unit_cost,
            consumed,
        })
    }

    /// Movements recorded against one material or product
    pub async fn get_movements(
        &self,
        shop_id: Uuid,
        owner_type: StockOwner,
        owner_id: Uuid,
    ) -> AppResult<Vec<StockMovement>> {
        let table = match owner_type {
            StockOwner::Material => "materials",
            StockOwner::Product => "products",
        };
        let owner_exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1 AND shop_id = $2)",
        ))
        .bind(owner_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        if !owner_exists {
            return Err(AppError::NotFound(match owner_type {
                StockOwner::Material => "Material".to_string(),
                StockOwner::Product => "Product".to_string(),
            }));
        }

        let movements = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            SELECT {MOVEMENT_COLUMNS}
            FROM stock_movements
            WHERE shop_id = $1 AND owner_type = $2 AND owner_id = $3
            ORDER BY moved_on DESC, created_at DESC
            "#,
        ))
        .bind(shop_id)
        .bind(owner_type.as_str())
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(movements)
    }

    /// All movements for a shop, newest first
    pub async fn list_movements(&self, shop_id: Uuid) -> AppResult<Vec<StockMovement>> {
        let movements = sqlx::query_as::<_, StockMovement>(&format!(
            r#"
            SELECT {MOVEMENT_COLUMNS}
            FROM stock_movements
            WHERE shop_id = $1
            ORDER BY moved_on DESC, created_at DESC
            "#,
        ))
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(movements)
    }

    /// Load and lock an owner's stock position for update
    async fn lock_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop_id: Uuid,
        owner_type: StockOwner,
        owner_id: Uuid,
    ) -> AppResult<StockOnHand> {
        let query = match owner_type {
            StockOwner::Material => {
                "SELECT current_stock, avg_cost FROM materials \
                 WHERE id = $1 AND shop_id = $2 FOR UPDATE"
            }
            StockOwner::Product => {
                "SELECT current_stock, cost_price FROM products \
                 WHERE id = $1 AND shop_id = $2 FOR UPDATE"
            }
        };

        let row = sqlx::query_as::<_, (Decimal, Decimal)>(query)
            .bind(owner_id)
            .bind(shop_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(match owner_type {
                    StockOwner::Material => "Material".to_string(),
                    StockOwner::Product => "Product".to_string(),
                })
            })?;

        Ok(StockOnHand::new(row.0, row.1))
    }

    /// Write an owner's stock position back
    async fn save_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_type: StockOwner,
        owner_id: Uuid,
        stock: StockOnHand,
    ) -> AppResult<()> {
        let query = match owner_type {
            StockOwner::Material => {
                "UPDATE materials SET current_stock = $1, avg_cost = $2, updated_at = NOW() \
                 WHERE id = $3"
            }
            StockOwner::Product => {
                "UPDATE products SET current_stock = $1, cost_price = $2, updated_at = NOW() \
                 WHERE id = $3"
            }
        };

        sqlx::query(query)
            .bind(stock.quantity)
            .bind(stock.avg_cost)
            .bind(owner_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

/// Apply a movement to a stock position, returning the effective
/// `(unit_cost, total_cost)` to record on the movement row
fn apply_movement(
    stock: &mut StockOnHand,
    movement_type: MovementType,
    quantity: Decimal,
    unit_cost: Option<Decimal>,
) -> (Decimal, Decimal) {
    match movement_type {
        MovementType::In => {
            let cost = unit_cost.unwrap_or(stock.avg_cost);
            stock.receive(quantity, cost);
            (cost, quantity * cost)
        }
        MovementType::Out => {
            let cogs = stock.issue(quantity);
            (stock.avg_cost, cogs)
        }
        MovementType::Adjustment => {
            stock.quantity += quantity;
            (stock.avg_cost, quantity.abs() * stock.avg_cost)
        }
    }
}

/// Undo a movement's effect using its recorded quantity and unit cost
fn reverse_movement(
    stock: &mut StockOnHand,
    movement_type: MovementType,
    quantity: Decimal,
    unit_cost: Decimal,
) {
    match movement_type {
        MovementType::In => stock.reverse_receipt(quantity, unit_cost),
        MovementType::Out => stock.quantity += quantity,
        MovementType::Adjustment => stock.quantity -= quantity,
    }
}

/// `in`/`out` quantities must be positive; adjustments are signed but non-zero
fn validate_movement_quantity(movement_type: MovementType, quantity: Decimal) -> AppResult<()> {
    match movement_type {
        MovementType::In | MovementType::Out => {
            if quantity <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: "Quantity must be positive".to_string(),
                    message_th: "ปริมาณต้องเป็นค่าบวก".to_string(),
                });
            }
        }
        MovementType::Adjustment => {
            if quantity.is_zero() {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: "Adjustment quantity cannot be zero".to_string(),
                    message_th: "ปริมาณปรับปรุงต้องไม่เป็นศูนย์".to_string(),
                });
            }
        }
    }
    Ok(())
}
