//! Request middleware for the Shop Management Platform

mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
