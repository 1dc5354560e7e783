//! HTTP handlers for the Shop Management Platform

mod billing;
mod employee;
mod expense;
mod health;
mod material;
mod payroll;
mod product;
mod stock;
mod supplier;

pub use billing::*;
pub use employee::*;
pub use expense::*;
pub use health::*;
pub use material::*;
pub use payroll::*;
pub use product::*;
pub use stock::*;
pub use supplier::*;
