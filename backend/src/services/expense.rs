//! Shop expense tracking service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::types::DateRange;
use shared::validation::{validate_name, validate_positive_amount};

/// Expense service for day-to-day shop spending
#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
}

/// A recorded expense
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseInput {
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub spent_on: Option<NaiveDate>,
}

/// Input for updating an expense
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseInput {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub spent_on: Option<NaiveDate>,
}

const EXPENSE_COLUMNS: &str =
    "id, shop_id, category, amount, description, spent_on, created_by, created_at, updated_at";

impl ExpenseService {
    /// Create a new ExpenseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record an expense
    pub async fn create_expense(
        &self,
        shop_id: Uuid,
        user_id: Uuid,
        input: CreateExpenseInput,
    ) -> AppResult<Expense> {
        if let Err(msg) = validate_name(&input.category) {
            return Err(AppError::Validation {
                field: "category".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุหมวดหมู่ค่าใช้จ่าย".to_string(),
            });
        }
        if let Err(msg) = validate_positive_amount(input.amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินต้องเป็นค่าบวก".to_string(),
            });
        }

        let spent_on = input.spent_on.unwrap_or_else(|| Utc::now().date_naive());

        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (shop_id, category, amount, description, spent_on, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.category.trim())
        .bind(input.amount)
        .bind(&input.description)
        .bind(spent_on)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, shop_id: Uuid, expense_id: Uuid) -> AppResult<Expense> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = $1 AND shop_id = $2",
        ))
        .bind(expense_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense".to_string()))?;

        Ok(expense)
    }

    /// List expenses, optionally within a date range
    pub async fn list_expenses(
        &self,
        shop_id: Uuid,
        range: Option<DateRange>,
    ) -> AppResult<Vec<Expense>> {
        let (start, end) = match &range {
            Some(r) => (Some(r.start), Some(r.end)),
            None => (None, None),
        };

        let expenses = sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE shop_id = $1
              AND ($2::date IS NULL OR spent_on >= $2)
              AND ($3::date IS NULL OR spent_on <= $3)
            ORDER BY spent_on DESC, created_at DESC
            "#,
        ))
        .bind(shop_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(expenses)
    }

    /// Update an expense
    pub async fn update_expense(
        &self,
        shop_id: Uuid,
        expense_id: Uuid,
        input: UpdateExpenseInput,
    ) -> AppResult<Expense> {
        let existing = self.get_expense(shop_id, expense_id).await?;

        let category = input.category.unwrap_or(existing.category);
        if let Err(msg) = validate_name(&category) {
            return Err(AppError::Validation {
                field: "category".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุหมวดหมู่ค่าใช้จ่าย".to_string(),
            });
        }

        let amount = input.amount.unwrap_or(existing.amount);
        if let Err(msg) = validate_positive_amount(amount) {
            return Err(AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
                message_th: "จำนวนเงินต้องเป็นค่าบวก".to_string(),
            });
        }

        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            UPDATE expenses
            SET category = $1, amount = $2, description = $3, spent_on = $4, updated_at = NOW()
            WHERE id = $5 AND shop_id = $6
            RETURNING {EXPENSE_COLUMNS}
            "#,
        ))
        .bind(category.trim())
        .bind(amount)
        .bind(input.description.or(existing.description))
        .bind(input.spent_on.unwrap_or(existing.spent_on))
        .bind(expense_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(expense)
    }

    /// Delete an expense
    pub async fn delete_expense(&self, shop_id: Uuid, expense_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND shop_id = $2")
            .bind(expense_id)
            .bind(shop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        Ok(())
    }
}
