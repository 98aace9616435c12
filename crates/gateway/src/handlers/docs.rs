//! Documentation search and cache refresh handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use cdpbot_common::errors::{AppError, Result};
use cdpbot_common::model::{DocumentSnippet, Platform};

/// Free-text documentation search request
#[derive(Debug, Deserialize, Validate)]
pub struct SearchDocsRequest {
    #[validate(length(min = 1, max = 500))]
    pub query: String,

    /// Limit the search to one platform; all platforms otherwise
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// Search response
#[derive(Serialize)]
pub struct SearchDocsResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<DocumentSnippet>,
    pub processing_time_ms: u64,
}

/// Cache refresh request
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// Refresh response
#[derive(Serialize)]
pub struct RefreshResponse {
    pub status: String,
}

/// Search the vendor documentation with a free-text query
pub async fn search_docs(
    State(state): State<AppState>,
    Json(request): Json<SearchDocsRequest>,
) -> Result<Json<SearchDocsResponse>> {
    let start = Instant::now();

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("query".to_string()),
    })?;

    let results = state.docs.search_docs(&request.query, request.platform).await?;
    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        query = %request.query,
        platform = ?request.platform.map(|p| p.as_str()),
        results = results.len(),
        latency_ms = processing_time_ms,
        "Documentation search completed"
    );

    Ok(Json(SearchDocsResponse {
        query: request.query,
        total_results: results.len(),
        results,
        processing_time_ms,
    }))
}

/// Invalidate the cached documentation for one or all platforms
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Json<RefreshResponse> {
    state.docs.refresh(request.platform).await;

    tracing::info!(
        platform = ?request.platform.map(|p| p.as_str()),
        "Documentation cache refreshed"
    );

    Json(RefreshResponse {
        status: "refreshed".to_string(),
    })
}
