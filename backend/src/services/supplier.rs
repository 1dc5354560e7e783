//! Supplier directory and ledger service
//!
//! Supplier balances move only through paired ledger inserts: every entry
//! lands in `supplier_transactions` and the running totals are adjusted in
//! the same transaction with one atomic upsert. Reversals are offsetting
//! rows, never deletions, so the ledger stays auditable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{EntryKind, SupplierBalance};
use shared::validation::{validate_name, validate_positive_amount};

/// Supplier service for the directory and the purchase ledger
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// A supplier
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One supplier ledger entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SupplierTransaction {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub supplier_id: Uuid,
    pub entry_kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<Uuid>,
    pub reverses_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A supplier's running totals and net balance
#[derive(Debug, Clone, Serialize)]
pub struct SupplierBalanceView {
    pub supplier_id: Uuid,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// What the shop still owes: `total_debit − total_credit`
    pub balance: Decimal,
}

/// Input for registering a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub phone: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Input for recording a ledger entry
#[derive(Debug, Deserialize)]
pub struct RecordSupplierTransactionInput {
    pub entry_kind: EntryKind,
    pub amount: Decimal,
    pub description: Option<String>,
}

const SUPPLIER_COLUMNS: &str = "id, shop_id, name, phone, is_active, created_at, updated_at";

const TRANSACTION_COLUMNS: &str = "id, shop_id, supplier_id, entry_kind, amount, description, \
                                   reference_type, reference_id, reverses_id, created_by, created_at";

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a supplier
    pub async fn create_supplier(
        &self,
        shop_id: Uuid,
        input: CreateSupplierInput,
    ) -> AppResult<Supplier> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อผู้จัดหา".to_string(),
            });
        }

        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "INSERT INTO suppliers (shop_id, name, phone) VALUES ($1, $2, $3) \
             RETURNING {SUPPLIER_COLUMNS}",
        ))
        .bind(shop_id)
        .bind(input.name.trim())
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Get a supplier by ID
    pub async fn get_supplier(&self, shop_id: Uuid, supplier_id: Uuid) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1 AND shop_id = $2",
        ))
        .bind(supplier_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(supplier)
    }

    /// List all suppliers for a shop
    pub async fn list_suppliers(&self, shop_id: Uuid) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE shop_id = $1 ORDER BY name",
        ))
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Update a supplier
    pub async fn update_supplier(
        &self,
        shop_id: Uuid,
        supplier_id: Uuid,
        input: UpdateSupplierInput,
    ) -> AppResult<Supplier> {
        let existing = self.get_supplier(shop_id, supplier_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อผู้จัดหา".to_string(),
            });
        }

        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers
            SET name = $1, phone = $2, is_active = $3, updated_at = NOW()
            WHERE id = $4 AND shop_id = $5
            RETURNING {SUPPLIER_COLUMNS}
            "#,
        ))
        .bind(name.trim())
        .bind(input.phone.or(existing.phone))
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(supplier_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Delete a supplier with no ledger history
    pub async fn delete_supplier(&self, shop_id: Uuid, supplier_id: Uuid) -> AppResult<()> {
        let has_transactions = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM supplier_transactions WHERE supplier_id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;

        if has_transactions {
            return Err(AppError::Conflict {
                resource: "supplier".to_string(),
                message: "Supplier has ledger entries; deactivate it instead".to_string(),
                message_th: "ผู้จัดหามีรายการบัญชีแล้ว กรุณาปิดการใช้งานแทน".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1 AND shop_id = $2")
            .bind(supplier_id)
            .bind(shop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }

    /// Append a ledger entry and move the running balance
    pub async fn record_transaction(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        supplier_id: Uuid,
        input: RecordSupplierTransactionInput,
    ) -> AppResult<SupplierTransaction> {
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินต้องเป็นค่าบวก".to_string(),
            });
        }

        self.get_supplier(shop_id, supplier_id).await?;

        let mut tx = self.db.begin().await?;

        let transaction = sqlx::query_as::<_, SupplierTransaction>(&format!(
            r#"
            INSERT INTO supplier_transactions (
                shop_id, supplier_id, entry_kind, amount, description, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TRANSACTION_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(supplier_id)
        .bind(input.entry_kind.as_str())
        .bind(input.amount)
        .bind(&input.description)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        self.apply_balance(&mut tx, shop_id, supplier_id, input.entry_kind, input.amount)
            .await?;

        tx.commit().await?;

        Ok(transaction)
    }

    /// Reverse a ledger entry by inserting its offsetting row
    pub async fn reverse_transaction(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> AppResult<SupplierTransaction> {
        let mut tx = self.db.begin().await?;

        let original = sqlx::query_as::<_, SupplierTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM supplier_transactions \
             WHERE id = $1 AND shop_id = $2",
        ))
        .bind(transaction_id)
        .bind(shop_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier transaction".to_string()))?;

        if original.reverses_id.is_some() {
            return Err(AppError::Validation {
                field: "transaction_id".to_string(),
                message: "A reversal entry cannot itself be reversed".to_string(),
                message_th: "ไม่สามารถกลับรายการที่เป็นรายการกลับได้".to_string(),
            });
        }

        let already_reversed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM supplier_transactions WHERE reverses_id = $1)",
        )
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_reversed {
            return Err(AppError::Conflict {
                resource: "supplier_transaction".to_string(),
                message: "Transaction has already been reversed".to_string(),
                message_th: "รายการนี้ถูกกลับรายการแล้ว".to_string(),
            });
        }

        let kind = EntryKind::from_str(&original.entry_kind)
            .ok_or_else(|| AppError::Internal("Unknown ledger entry kind".to_string()))?;
        let offsetting = kind.offsetting();

        let reversal = sqlx::query_as::<_, SupplierTransaction>(&format!(
            r#"
            INSERT INTO supplier_transactions (
                shop_id, supplier_id, entry_kind, amount, description, reverses_id, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(original.supplier_id)
        .bind(offsetting.as_str())
        .bind(original.amount)
        .bind(format!("Reversal of entry {}", original.id))
        .bind(original.id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        self.apply_balance(&mut tx, shop_id, original.supplier_id, offsetting, original.amount)
            .await?;

        tx.commit().await?;

        Ok(reversal)
    }

    /// A supplier's running totals and net balance
    pub async fn get_balance(
        &self,
        shop_id: Uuid,
        supplier_id: Uuid,
    ) -> AppResult<SupplierBalanceView> {
        self.get_supplier(shop_id, supplier_id).await?;

        let row = sqlx::query_as::<_, (Decimal, Decimal)>(
            "SELECT total_debit, total_credit FROM supplier_balances \
             WHERE supplier_id = $1 AND shop_id = $2",
        )
        .bind(supplier_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?;

        // No balance row yet means no ledger activity
        let balance = row
            .map(|(total_debit, total_credit)| SupplierBalance {
                total_debit,
                total_credit,
            })
            .unwrap_or(SupplierBalance {
                total_debit: Decimal::ZERO,
                total_credit: Decimal::ZERO,
            });

        Ok(SupplierBalanceView {
            supplier_id,
            total_debit: balance.total_debit,
            total_credit: balance.total_credit,
            balance: balance.balance(),
        })
    }

    /// Ledger entries for a supplier, newest first
    pub async fn list_transactions(
        &self,
        shop_id: Uuid,
        supplier_id: Uuid,
    ) -> AppResult<Vec<SupplierTransaction>> {
        self.get_supplier(shop_id, supplier_id).await?;

        let transactions = sqlx::query_as::<_, SupplierTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM supplier_transactions \
             WHERE supplier_id = $1 AND shop_id = $2 ORDER BY created_at DESC",
        ))
        .bind(supplier_id)
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(transactions)
    }

    /// Move a supplier's running totals by one entry, creating the balance
    /// row lazily on first use
    async fn apply_balance(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        shop_id: Uuid,
        supplier_id: Uuid,
        kind: EntryKind,
        amount: Decimal,
    ) -> AppResult<()> {
        let (debit_delta, credit_delta) = match kind {
            EntryKind::Debit => (amount, Decimal::ZERO),
            EntryKind::Credit => (Decimal::ZERO, amount),
        };

        sqlx::query(
            r#"
            INSERT INTO supplier_balances (supplier_id, shop_id, total_debit, total_credit)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (supplier_id)
            DO UPDATE SET total_debit = supplier_balances.total_debit + EXCLUDED.total_debit,
                          total_credit = supplier_balances.total_credit + EXCLUDED.total_credit,
                          updated_at = NOW()
            "#,
        )
        .bind(supplier_id)
        .bind(shop_id)
        .bind(debit_delta)
        .bind(credit_delta)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
