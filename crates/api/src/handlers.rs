use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use qa_core::{AskError, Pipeline};
use serde::Deserialize;
use serde_json::json;

use crate::page::{self, Notice, Outcome, PageView};
use crate::Result;

/// Shared, read-only handler state. Nothing in here changes per request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub default_model: String,
}

impl AppState {
    pub fn new(pipeline: Pipeline, default_model: impl Into<String>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            default_model: default_model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /
/// Empty question form
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Html(page::render(&PageView::blank(state.default_model.as_str())))
}

/// POST /
/// Runs the submitted question through the pipeline and renders the outcome
pub async fn ask(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> Result<impl IntoResponse> {
    let model = qa_core::resolve_model(form.model.as_deref(), &state.default_model);

    let mut view = PageView {
        model: model.clone(),
        question: form.question.clone(),
        ..PageView::default()
    };

    // Preparing only fails on empty input.
    let Ok(prepared) = state.pipeline.prepare(&form.question) else {
        view.notice = Some(Notice::warning("Please enter a question."));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page::render(&view))));
    };

    // The completion client blocks on network I/O.
    let pipeline = Arc::clone(&state.pipeline);
    let request_prepared = prepared.clone();
    let request_model = model.clone();
    let result =
        tokio::task::spawn_blocking(move || pipeline.complete(&request_prepared, &request_model))
            .await?;

    let question = prepared.question;
    let mut outcome = Outcome {
        original: question.original,
        processed: question.processed,
        tokens: question.tokens,
        answer: None,
    };

    let status = match result {
        Ok(answer) => {
            outcome.answer = Some(answer);
            StatusCode::OK
        }
        Err(err) => {
            tracing::warn!(%model, error = %err, "question failed");
            let status = match err {
                AskError::CredentialMissing { .. } => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            };
            view.notice = Some(Notice::danger(format!("Error calling model: {err}")));
            status
        }
    };

    view.outcome = Some(outcome);
    Ok((status, Html(page::render(&view))))
}
