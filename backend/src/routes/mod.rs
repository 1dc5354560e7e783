//! Route definitions for the Shop Management Platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - material catalog
        .nest("/materials", material_routes())
        // Protected routes - product catalog and recipes
        .nest("/products", product_routes())
        // Protected routes - stock movements and receipts
        .nest("/stock", stock_routes())
        // Protected routes - point-of-sale billing
        .nest("/bills", bill_routes())
        // Protected routes - supplier directory and ledger
        .nest("/suppliers", supplier_routes())
        // Protected routes - employee directory
        .nest("/employees", employee_routes())
        // Protected routes - loans and salaries
        .nest("/payroll", payroll_routes())
        // Protected routes - expense tracking
        .nest("/expenses", expense_routes())
}

/// Material catalog routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_materials).post(handlers::create_material))
        .route("/low-stock", get(handlers::list_low_stock_materials))
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route("/:material_id/movements", get(handlers::get_material_movements))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/:product_id/recipe",
            get(handlers::get_recipe).post(handlers::add_recipe_item),
        )
        .route(
            "/:product_id/recipe/:material_id",
            delete(handlers::remove_recipe_item),
        )
        .route("/:product_id/movements", get(handlers::get_product_movements))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(handlers::list_movements).post(handlers::record_movement))
        .route(
            "/movements/:movement_id",
            put(handlers::update_movement).delete(handlers::delete_movement),
        )
        .route("/purchases", post(handlers::receive_purchase))
        .route("/production", post(handlers::receive_production))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Billing routes (protected)
fn bill_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_bills).post(handlers::create_bill))
        .route(
            "/:bill_id",
            get(handlers::get_bill).delete(handlers::delete_bill),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route("/:supplier_id/balance", get(handlers::get_supplier_balance))
        .route(
            "/:supplier_id/transactions",
            get(handlers::list_supplier_transactions).post(handlers::record_supplier_transaction),
        )
        .route(
            "/transactions/:transaction_id/reverse",
            post(handlers::reverse_supplier_transaction),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Employee directory routes (protected)
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_employees).post(handlers::create_employee))
        .route(
            "/:employee_id",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Loan and salary routes (protected)
fn payroll_routes() -> Router<AppState> {
    Router::new()
        .route("/loans", get(handlers::list_loans).post(handlers::disburse_loan))
        .route("/loans/:loan_id", get(handlers::get_loan))
        .route("/loans/:loan_id/repayments", post(handlers::repay_loan))
        .route(
            "/employees/:employee_id/repayments",
            post(handlers::repay_employee_loans),
        )
        .route("/salaries", get(handlers::list_salaries).post(handlers::pay_salary))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Expense tracking routes (protected)
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_expenses).post(handlers::create_expense))
        .route(
            "/:expense_id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
