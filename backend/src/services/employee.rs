//! Employee directory service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::{validate_name, validate_non_negative_amount};

/// Employee service for managing shop staff records
#[derive(Clone)]
pub struct EmployeeService {
    db: PgPool,
}

/// An employee
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub monthly_salary: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering an employee
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub monthly_salary: Option<Decimal>,
}

/// Input for updating an employee
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub monthly_salary: Option<Decimal>,
    pub is_active: Option<bool>,
}

const EMPLOYEE_COLUMNS: &str =
    "id, shop_id, name, phone, position, monthly_salary, is_active, created_at, updated_at";

impl EmployeeService {
    /// Create a new EmployeeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register an employee
    pub async fn create_employee(
        &self,
        shop_id: Uuid,
        input: CreateEmployeeInput,
    ) -> AppResult<Employee> {
        if let Err(msg) = validate_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อพนักงาน".to_string(),
            });
        }

        let monthly_salary = input.monthly_salary.unwrap_or(Decimal::ZERO);
        if let Err(msg) = validate_non_negative_amount(monthly_salary) {
            return Err(AppError::Validation {
                field: "monthly_salary".to_string(),
                message: msg.to_string(),
                message_th: "เงินเดือนต้องไม่ติดลบ".to_string(),
            });
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (shop_id, name, phone, position, monthly_salary)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(shop_id)
        .bind(input.name.trim())
        .bind(&input.phone)
        .bind(&input.position)
        .bind(monthly_salary)
        .fetch_one(&self.db)
        .await?;

        Ok(employee)
    }

    /// Get an employee by ID
    pub async fn get_employee(&self, shop_id: Uuid, employee_id: Uuid) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1 AND shop_id = $2",
        ))
        .bind(employee_id)
        .bind(shop_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

        Ok(employee)
    }

    /// List all employees for a shop
    pub async fn list_employees(&self, shop_id: Uuid) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE shop_id = $1 ORDER BY name",
        ))
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(employees)
    }

    /// Update an employee
    pub async fn update_employee(
        &self,
        shop_id: Uuid,
        employee_id: Uuid,
        input: UpdateEmployeeInput,
    ) -> AppResult<Employee> {
        let existing = self.get_employee(shop_id, employee_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if let Err(msg) = validate_name(&name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_th: "ต้องระบุชื่อพนักงาน".to_string(),
            });
        }

        let monthly_salary = input.monthly_salary.unwrap_or(existing.monthly_salary);
        if let Err(msg) = validate_non_negative_amount(monthly_salary) {
            return Err(AppError::Validation {
                field: "monthly_salary".to_string(),
                message: msg.to_string(),
                message_th: "เงินเดือนต้องไม่ติดลบ".to_string(),
            });
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET name = $1, phone = $2, position = $3, monthly_salary = $4,
                is_active = $5, updated_at = NOW()
            WHERE id = $6 AND shop_id = $7
            RETURNING {EMPLOYEE_COLUMNS}
            "#,
        ))
        .bind(name.trim())
        .bind(input.phone.or(existing.phone))
        .bind(input.position.or(existing.position))
        .bind(monthly_salary)
        .bind(input.is_active.unwrap_or(existing.is_active))
        .bind(employee_id)
        .bind(shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(employee)
    }

    /// Delete an employee with no payroll history
    pub async fn delete_employee(&self, shop_id: Uuid, employee_id: Uuid) -> AppResult<()> {
        let has_history = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM employee_loans WHERE employee_id = $1)
                OR EXISTS(SELECT 1 FROM salary_records WHERE employee_id = $1)
            "#,
        )
        .bind(employee_id)
        .fetch_one(&self.db)
        .await?;

        if has_history {
            return Err(AppError::Conflict {
                resource: "employee".to_string(),
                message: "Employee has loan or salary history; deactivate them instead".to_string(),
                message_th: "พนักงานมีประวัติเงินกู้หรือเงินเดือน กรุณาปิดการใช้งานแทน".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM employees WHERE id = $1 AND shop_id = $2")
            .bind(employee_id)
            .bind(shop_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Employee".to_string()));
        }

        Ok(())
    }
}
