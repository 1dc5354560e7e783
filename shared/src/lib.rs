//! Shared types and models for the Shop Management Platform
//!
//! This crate contains pure domain types and calculations shared between
//! the backend services and the test suites: inventory cost arithmetic,
//! bill totals, loan allocation, and common validations.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
