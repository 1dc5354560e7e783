//! Point-of-sale billing service
//!
//! Creating a bill moves product stock opposite to each line's kind
//! (`sale` decrements, `return` increments); deleting a bill reverses every
//! line. Both directions run as one transaction, so a half-applied bill is
//! never visible.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::stock::{MovementType, ReferenceType};
use shared::models::{bill_totals, LineAmounts, LineKind};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::{validate_non_negative_amount, validate_positive_quantity};

/// Billing service for point-of-sale transactions
#[derive(Clone)]
pub struct BillingService {
    db: PgPool,
}

/// A committed bill
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Bill {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub bill_no: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub paid: Decimal,
    pub due: Decimal,
    pub payment_method: Option<String>,
    pub billed_on: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// One line of a bill
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BillItem {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub bill_id: Uuid,
    pub product_id: Uuid,
    pub line_kind: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A bill with its line items
#[derive(Debug, Clone, Serialize)]
pub struct BillWithItems {
    #[serde(flatten)]
    pub bill: Bill,
    pub items: Vec<BillItem>,
}

/// Input for creating a bill
#[derive(Debug, Deserialize)]
pub struct CreateBillInput {
    pub items: Vec<BillItemInput>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub tax: Option<Decimal>,
    pub paid: Option<Decimal>,
    pub payment_method: Option<String>,
    pub billed_on: Option<NaiveDate>,
}

/// One requested bill line
#[derive(Debug, Deserialize)]
pub struct BillItemInput {
    pub product_id: Uuid,
    pub kind: LineKind,
    pub quantity: Decimal,
    /// Defaults to the product's sale price
    pub unit_price: Option<Decimal>,
    pub discount: Option<Decimal>,
}

const BILL_COLUMNS: &str = "id, shop_id, bill_no, customer_name, customer_phone, subtotal, tax, \
                            total, paid, due, payment_method, billed_on, created_by, created_at";

const BILL_ITEM_COLUMNS: &str = "id, shop_id, bill_id, product_id, line_kind, quantity, \
                                 unit_price, discount, line_total, created_at";

impl BillingService {
    /// Create a new BillingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Commit a bill and apply its stock effects
    pub async fn create_bill(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: CreateBillInput,
    ) -> AppResult<BillWithItems> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "A bill must have at least one line item".to_string(),
                message_th: "บิลต้องมีรายการสินค้าอย่างน้อยหนึ่งรายการ".to_string(),
            });
        }

        let tax = input.tax.unwrap_or(Decimal::ZERO);
        let paid = input.paid.unwrap_or(Decimal::ZERO);
        for (field, amount) in [("tax", tax), ("paid", paid)] {
            if let Err(msg) = validate_non_negative_amount(amount) {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: msg.to_string(),
                    message_th: "จำนวนเงินต้องไม่ติดลบ".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        // Resolve every line against the catalog before touching stock
        let mut lines = Vec::with_capacity(input.items.len());
        for item in &input.items {
            if let Err(msg) = validate_positive_quantity(item.quantity) {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: msg.to_string(),
                    message_th: "ปริมาณต้องเป็นค่าบวก".to_string(),
                });
            }
            let discount = item.discount.unwrap_or(Decimal::ZERO);
            if let Err(msg) = validate_non_negative_amount(discount) {
                return Err(AppError::Validation {
                    field: "discount".to_string(),
                    message: msg.to_string(),
                    message_th: "ส่วนลดต้องไม่ติดลบ".to_string(),
                });
            }

            let product = sqlx::query_as::<_, (String, Decimal, Decimal, bool)>(
                "SELECT name, sale_price, cost_price, is_active FROM products \
                 WHERE id = $1 AND shop_id = $2",
            )
            .bind(item.product_id)
            .bind(shop_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

            if !product.3 {
                return Err(AppError::Validation {
                    field: "product_id".to_string(),
                    message: format!("Product {} is inactive", product.0),
                    message_th: format!("สินค้า {} ถูกปิดการใช้งาน", product.0),
                });
            }

            let unit_price = item.unit_price.unwrap_or(product.1);
            lines.push(ResolvedLine {
                product_id: item.product_id,
                product_name: product.0,
                cost_price: product.2,
                kind: item.kind,
                quantity: item.quantity,
                unit_price,
                discount,
            });
        }

        let amounts: Vec<LineAmounts> = lines
            .iter()
            .map(|l| LineAmounts {
                kind: l.kind,
                quantity: l.quantity,
                unit_price: l.unit_price,
                discount: l.discount,
            })
            .collect();
        let totals = bill_totals(&amounts, tax, paid);

        let billed_on = input.billed_on.unwrap_or_else(|| Utc::now().date_naive());
        let sequence: i32 = sqlx::query_scalar("SELECT next_bill_sequence($1, $2)")
            .bind(shop_id)
            .bind(billed_on.year())
            .fetch_one(&mut *tx)
            .await?;
        let bill_no = format!("SMP-{}-{:05}", billed_on.year(), sequence);

        let bill = sqlx::query_as::<_, Bill>(&format!(
            r#"
            INSERT INTO bills (
                shop_id, bill_no, customer_name, customer_phone, subtotal, tax, total,
                paid, due, payment_method, billed_on, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {BILL_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(&bill_no)
        .bind(&input.customer_name)
        .bind(&input.customer_phone)
        .bind(totals.subtotal)
        .bind(tax)
        .bind(totals.total)
        .bind(paid)
        .bind(totals.due)
        .bind(&input.payment_method)
        .bind(billed_on)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            match line.kind {
                LineKind::Sale => {
                    let updated = sqlx::query(
                        r#"
                        UPDATE products
                        SET current_stock = current_stock - $1, updated_at = NOW()
                        WHERE id = $2 AND shop_id = $3 AND current_stock >= $1
                        "#,
                    )
                    .bind(line.quantity)
                    .bind(line.product_id)
                    .bind(shop_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();

                    if updated == 0 {
                        let available = sqlx::query_scalar::<_, Decimal>(
                            "SELECT current_stock FROM products WHERE id = $1",
                        )
                        .bind(line.product_id)
                        .fetch_one(&mut *tx)
                        .await?;

                        return Err(AppError::InsufficientStock {
                            item: line.product_name.clone(),
                            required: line.quantity,
                            available,
                        });
                    }
                }
                LineKind::Return => {
                    sqlx::query(
                        "UPDATE products SET current_stock = current_stock + $1, \
                         updated_at = NOW() WHERE id = $2 AND shop_id = $3",
                    )
                    .bind(line.quantity)
                    .bind(line.product_id)
                    .bind(shop_id)
                    .execute(&mut *tx)
                    .await?;
                }
            }

            let line_total = line.quantity * line.unit_price - line.discount;
            let item = sqlx::query_as::<_, BillItem>(&format!(
                r#"
                INSERT INTO bill_items (
                    shop_id, bill_id, product_id, line_kind, quantity, unit_price,
                    discount, line_total
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {BILL_ITEM_COLUMNS}
                "#,
            ))
            .bind(shop_id)
            .bind(bill.id)
            .bind(line.product_id)
            .bind(line.kind.as_str())
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.discount)
            .bind(line_total)
            .fetch_one(&mut *tx)
            .await?;

            let (movement_type, reference_type) = match line.kind {
                LineKind::Sale => (MovementType::Out, ReferenceType::Sale),
                LineKind::Return => (MovementType::In, ReferenceType::Return),
            };
            sqlx::query(
                r#"
                INSERT INTO stock_movements (
                    shop_id, owner_type, owner_id, movement_type, quantity, unit_cost,
                    total_cost, reference_type, reference_id, moved_on, created_by
                )
                VALUES ($1, 'product', $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(shop_id)
            .bind(line.product_id)
            .bind(movement_type.as_str())
            .bind(line.quantity)
            .bind(line.cost_price)
            .bind(line.quantity * line.cost_price)
            .bind(reference_type.as_str())
            .bind(bill.id)
            .bind(billed_on)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit().await?;

        Ok(BillWithItems { bill, items })
    }

    /// Delete a bill, reversing every line's stock effect
    pub async fn delete_bill(&self, shop_id: Uuid, bill_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bills WHERE id = $1 AND shop_id = $2)",
        )
        .bind(bill_id)
        .bind(shop_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Bill".to_string()));
        }

        let items = sqlx::query_as::<_, (Uuid, String, Decimal)>(
            "SELECT product_id, line_kind, quantity FROM bill_items \
             WHERE bill_id = $1 AND shop_id = $2",
        )
        .bind(bill_id)
        .bind(shop_id)
        .fetch_all(&mut *tx)
        .await?;

        for (product_id, line_kind, quantity) in items {
            // Sales come back into stock, returns go back out
            let query = match line_kind.as_str() {
                "sale" => {
                    "UPDATE products SET current_stock = current_stock + $1, \
                     updated_at = NOW() WHERE id = $2 AND shop_id = $3"
                }
                _ => {
                    "UPDATE products SET current_stock = current_stock - $1, \
                     updated_at = NOW() WHERE id = $2 AND shop_id = $3"
                }
            };
            sqlx::query(query)
                .bind(quantity)
                .bind(product_id)
                .bind(shop_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "DELETE FROM stock_movements WHERE shop_id = $1 AND reference_id = $2 \
             AND reference_type IN ('sale', 'return')",
        )
        .bind(shop_id)
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM bill_items WHERE bill_id = $1 AND shop_id = $2")
            .bind(bill_id)
            .bind(shop_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM bills WHERE id = $1 AND shop_id = $2")
            .bind(bill_id)
            .bind(shop_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Get a bill with its items
    pub async fn get_bill(&self, shop_id: Uuid, bill_id: Uuid) -> AppResult<BillWithItems> {
        let bill = sqlx::query_as::<_, Bill>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE id = $1 AND shop_id = $2",
        ))
        .bind(bill_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bill".to_string()))?;

        let items = sqlx::query_as::<_, BillItem>(&format!(
            "SELECT {BILL_ITEM_COLUMNS} FROM bill_items \
             WHERE bill_id = $1 AND shop_id = $2 ORDER BY created_at",
        ))
        .bind(bill_id)
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(BillWithItems { bill, items })
    }

    /// List bills for a shop, newest first
    pub async fn list_bills(
        &self,
        shop_id: Uuid,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Bill>> {
        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bills WHERE shop_id = $1",
        )
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        let bills = sqlx::query_as::<_, Bill>(&format!(
            r#"
            SELECT {BILL_COLUMNS}
            FROM bills
            WHERE shop_id = $1
            ORDER BY billed_on DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(shop_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: bills,
            pagination: PaginationMeta::new(&pagination, total_items as u64),
        })
    }
}

/// A bill line after catalog resolution
struct ResolvedLine {
    product_id: Uuid,
    product_name: String,
    cost_price: Decimal,
    kind: LineKind,
    quantity: Decimal,
    unit_price: Decimal,
    discount: Decimal,
}
