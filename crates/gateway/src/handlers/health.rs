//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub cache: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness probe - always returns healthy if the server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - checks the cache directory when caching is enabled
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let cache_check = if state.config.cache.enabled {
        match std::fs::create_dir_all(&state.config.cache.dir) {
            Ok(_) => CheckResult {
                status: "up".to_string(),
                error: None,
            },
            Err(e) => CheckResult {
                status: "down".to_string(),
                error: Some(e.to_string()),
            },
        }
    } else {
        CheckResult {
            status: "disabled".to_string(),
            error: None,
        }
    };

    let ready = cache_check.status != "down";

    Json(ReadyResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks { cache: cache_check },
    })
}
