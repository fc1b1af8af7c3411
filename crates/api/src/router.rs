use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the application router: the question form plus a health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::ask))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use qa_core::{CompletionClient, CompletionRequest, Pipeline, StaticCredentials};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Remembers the prompts it saw and answers with a fixed reply.
    struct StubClient {
        prompts: Mutex<Vec<(String, String)>>,
        reply: Option<&'static str>,
    }

    impl CompletionClient for StubClient {
        fn complete(&self, request: &CompletionRequest<'_>) -> anyhow::Result<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((request.model.to_string(), request.user_prompt.to_string()));
            self.reply
                .map(str::to_string)
                .ok_or_else(|| anyhow!("429 Too Many Requests: rate limited"))
        }
    }

    fn app(reply: Option<&'static str>, key: Option<&str>) -> (Arc<StubClient>, Router) {
        let client = Arc::new(StubClient {
            prompts: Mutex::new(Vec::new()),
            reply,
        });
        let pipeline = Pipeline::new(
            client.clone(),
            Arc::new(key.map_or_else(StaticCredentials::absent, StaticCredentials::present)),
        );
        (client, create_router(AppState::new(pipeline, "grok-2-latest")))
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_renders_empty_form() {
        let (_, router) = app(Some("unused"), Some("k"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, html) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("name=\"question\""));
        assert!(html.contains("value=\"grok-2-latest\""));
        assert!(!html.contains("id=\"result\""));
    }

    #[tokio::test]
    async fn test_post_question_shows_processing_and_answer() {
        let (client, router) = app(Some("Four."), Some("k"));

        let (status, html) = send(
            router,
            post_form("question=What%27s+2%2B2%3F%3F&model=grok-beta"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<p id=\"original\">What's 2+2??</p>"));
        assert!(html.contains("<p id=\"processed\">whats 22</p>"));
        assert!(html.contains("<span class=\"token\">whats</span><span class=\"token\">22</span>"));
        assert!(html.contains("<pre id=\"answer\">Four.</pre>"));

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, "grok-beta");
        assert!(prompts[0].1.contains("Processed question: whats 22"));
    }

    #[tokio::test]
    async fn test_blank_model_falls_back_to_default() {
        let (client, router) = app(Some("ok"), Some("k"));
        let (status, _) = send(router, post_form("question=hello&model=+")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(client.prompts.lock().unwrap()[0].0, "grok-2-latest");
    }

    #[tokio::test]
    async fn test_empty_question_warns_without_calling() {
        let (client, router) = app(Some("unused"), Some("k"));
        let (status, html) = send(router, post_form("question=+++&model=grok-2-latest")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(html.contains("alert-warning"));
        assert!(html.contains("Please enter a question."));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_reported_in_page() {
        let (client, router) = app(Some("unused"), None);
        let (status, html) = send(router, post_form("question=hi")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(html.contains("Error calling model: No API credential configured"));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_processed_question() {
        let (_, router) = app(None, Some("k"));
        let (status, html) = send(router, post_form("question=Hello%2C+World%21")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("alert-danger"));
        assert!(html.contains("429 Too Many Requests: rate limited"));
        assert!(html.contains("<p id=\"processed\">hello world</p>"));
        assert!(!html.contains("id=\"answer\""));
    }

    #[tokio::test]
    async fn test_user_input_is_escaped() {
        let (_, router) = app(Some("<script>alert(1)</script>"), Some("k"));
        let (_, html) = send(router, post_form("question=%3Cb%3Ehi%3C%2Fb%3E")).await;

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>hi</b>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_, router) = app(Some("unused"), Some("k"));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = send(router, request).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
