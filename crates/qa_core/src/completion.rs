/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "grok-2-latest";

/// Picks the requested model, falling back to `default` when none or a blank one was given.
pub fn resolve_model(requested: Option<&str>, default: &str) -> String {
    requested
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// One single-turn completion call.
#[derive(Clone)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub model: &'a str,
    pub api_key: &'a str,
}

// Keep the key out of logs.
impl std::fmt::Debug for CompletionRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("system_prompt", &self.system_prompt)
            .field("user_prompt", &self.user_prompt)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Remote text-completion service.
///
/// Implementations block until the service answers. Any failure (transport,
/// authentication, rate limiting, unexpected payload) is returned as-is; the
/// pipeline wraps it without retrying.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, request: &CompletionRequest<'_>) -> anyhow::Result<String>;
}
