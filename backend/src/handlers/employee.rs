//! HTTP handlers for employee directory endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::employee::{
    CreateEmployeeInput, Employee, EmployeeService, UpdateEmployeeInput,
};
use crate::AppState;

/// Register an employee
pub async fn create_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service
        .create_employee(current_user.0.shop_id, input)
        .await?;
    Ok(Json(employee))
}

/// Get an employee by ID
pub async fn get_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service
        .get_employee(current_user.0.shop_id, employee_id)
        .await?;
    Ok(Json(employee))
}

/// List all employees
pub async fn list_employees(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Employee>>> {
    let service = EmployeeService::new(state.db);
    let employees = service.list_employees(current_user.0.shop_id).await?;
    Ok(Json(employees))
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service
        .update_employee(current_user.0.shop_id, employee_id, input)
        .await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(employee_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = EmployeeService::new(state.db);
    service
        .delete_employee(current_user.0.shop_id, employee_id)
        .await?;
    Ok(Json(()))
}
