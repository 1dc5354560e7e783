//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub environment: String,
}

/// Check service and database health
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthStatus>> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(HealthStatus {
        status: "ok",
        database: "ok",
        environment: state.config.environment.clone(),
    }))
}
