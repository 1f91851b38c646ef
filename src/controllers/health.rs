use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::db::{check_connection, DbPool};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness reports which story store is in use; the in-memory store is always ready
pub async fn health_ready(State(pool): State<Option<Arc<DbPool>>>) -> impl IntoResponse {
    let Some(pool) = pool else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "memory"
            })),
        );
    };

    match check_connection(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "postgres",
                "database": "connected"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "storage": "postgres",
                    "database": "disconnected"
                })),
            )
        }
    }
}
