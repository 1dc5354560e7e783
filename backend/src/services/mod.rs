//! Business logic services for the Shop Management Platform

pub mod billing;
pub mod employee;
pub mod expense;
pub mod material;
pub mod payroll;
pub mod product;
pub mod stock;
pub mod supplier;

pub use billing::BillingService;
pub use employee::EmployeeService;
pub use expense::ExpenseService;
pub use material::MaterialService;
pub use payroll::PayrollService;
pub use product::ProductService;
pub use stock::StockService;
pub use supplier::SupplierService;
