use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Liveness plus a database reachability probe.
pub async fn root(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.users.ping().await {
        Ok(()) => "Connected",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "Disconnected"
        }
    };

    Json(HealthResponse {
        message: "Riyobox API is running...",
        database,
        timestamp: Utc::now(),
    })
}
