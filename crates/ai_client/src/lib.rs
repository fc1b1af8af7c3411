use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use qa_core::{CompletionClient, CompletionRequest};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};

mod api_error;

use api_error::extract_api_error;

/// Default endpoint root for xAI's OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

/// Configuration for talking to an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

/// Minimal chat completions client (blocking HTTP).
///
/// Every call is a single request with no retries.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    endpoint: Url,
}

impl ChatClient {
    pub fn new(config: ChatClientConfig) -> Result<Self> {
        let base_url = validate_base_url(&config.base_url)?;
        let endpoint = base_url
            .join("chat/completions")
            .context("Failed to build /chat/completions URL")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Single-turn chat call: one system message, one user message.
    pub fn chat(
        &self,
        api_key: &str,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let endpoint = &self.endpoint;
        let request = ChatRequest {
            model,
            stream: false,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .http
            .post(endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .with_context(|| format!("POST {endpoint} failed"))?;

        let status = response.status();
        let payload = response
            .text()
            .with_context(|| format!("Failed to read response body from {endpoint}"))?;
        if !status.is_success() {
            return Err(anyhow!(
                "POST {endpoint} returned {status}: {}",
                extract_api_error(&payload)
            ));
        }

        parse_chat_response(&payload)
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))
    }
}

impl CompletionClient for ChatClient {
    fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        self.chat(
            request.api_key,
            request.model,
            request.system_prompt,
            request.user_prompt,
        )
    }
}

/// Accepts `https` endpoints anywhere and plain `http` only on loopback hosts,
/// since every request carries the API key.
fn validate_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("Base URL '{base_url}' is missing a host"))?;
    let is_local = host.eq_ignore_ascii_case("localhost")
        || host == "127.0.0.1"
        || host == "[::1]"
        || host == "::1";

    match url.scheme() {
        "https" => {}
        "http" if is_local => {}
        "http" => {
            return Err(anyhow!(
                "Refusing plain http base URL for non-local host '{host}' (use https://)"
            ))
        }
        other => return Err(anyhow!("Unsupported scheme '{other}' for base URL")),
    }

    // `Url::join` replaces the last segment unless the path ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_chat_response(payload: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(payload)?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| anyhow!("Response had no message content"))?;

    Ok(content.trim().to_string())
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
