//! Chat page and question handlers

use axum::response::Html;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use cdpbot_common::errors::{AppError, Result};
use cdpbot_common::model::AnswerResult;

/// Ask request
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
}

/// Ask response: the formatted answer text
#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Serve the static chat page
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Answer a question about one of the supported CDP platforms
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("question".to_string()),
    })?;
    if request.question.trim().is_empty() {
        return Err(AppError::MissingField {
            field: "question".to_string(),
        });
    }

    tracing::info!(question = %request.question, "Received question");

    let response = state.chatbot.get_answer(&request.question).await;
    let answer = format_display(&response);

    tracing::info!(
        platform = ?response.platform.map(|p| p.as_str()),
        task = ?response.task.map(|t| t.as_str()),
        error = ?response.error,
        latency_ms = start.elapsed().as_millis() as u64,
        "Answered question"
    );

    Ok(Json(AskResponse { answer }))
}

/// Format an answer for display: the answer body plus the optional
/// source link, code examples, and API details blocks, each appended
/// only when the corresponding field is non-empty
fn format_display(response: &AnswerResult) -> String {
    let mut formatted = response.answer.clone();

    if let Some(source_url) = &response.source_url {
        formatted.push_str(&format!(
            "\n\nSource: <a href='{}' target='_blank'>Documentation</a>",
            source_url
        ));
    }

    if !response.code_examples.is_empty() {
        formatted.push_str("\n\nCode Examples:\n");
        for (i, example) in response.code_examples.iter().enumerate() {
            formatted.push_str(&format!(
                "\nExample {}:\n<pre><code>{}</code></pre>",
                i + 1,
                example
            ));
        }
    }

    if let Some(api) = &response.api_details {
        formatted.push_str("\n\nAPI Details:\n");
        if let (Some(method), Some(endpoint)) = (&api.method, &api.endpoint) {
            formatted.push_str(&format!("\nEndpoint: {} {}", method, endpoint));
        }
        if let Some(request_example) = &api.request_example {
            formatted.push_str(&format!(
                "\nRequest Example:\n<pre><code>{}</code></pre>",
                request_example
            ));
        }
        if let Some(response_example) = &api.response_example {
            formatted.push_str(&format!(
                "\nResponse Example:\n<pre><code>{}</code></pre>",
                response_example
            ));
        }
    }

    formatted
}
