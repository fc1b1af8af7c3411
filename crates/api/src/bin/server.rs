use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use ai_client::{ChatClient, ChatClientConfig};
use anyhow::Context;
use api::{run_server, AppState};
use qa_core::{CredentialProvider, EnvCredentials, Pipeline};

// The blocking HTTP client is created and dropped outside the tokio runtime,
// so the runtime is built by hand instead of with #[tokio::main].
fn main() -> anyhow::Result<()> {
    logger::init("api=debug,tower_http=debug", logger::Target::Stdout);

    // Optional settings path as the first argument, else ASK_SETTINGS, else ./ask.json
    let settings_path = env::args()
        .nth(1)
        .or_else(|| env::var("ASK_SETTINGS").ok())
        .map(PathBuf::from);
    let settings = settings_loader::load(settings_path.as_ref())?;

    let client = ChatClient::new(ChatClientConfig {
        base_url: settings.base_url.clone(),
        timeout: settings.timeout(),
    })
    .context("Failed to initialize completion client")?;

    let credentials = EnvCredentials::new(settings.api_key_env.clone());
    if credentials.credential().is_none() {
        tracing::warn!(
            var = %settings.api_key_env,
            "API key not set; questions will fail until it is"
        );
    }

    let pipeline = Pipeline::new(Arc::new(client), Arc::new(credentials))
        .with_system_prompt(settings.system_prompt.clone());
    let state = AppState::new(pipeline, settings.model.clone());

    tracing::info!(
        model = %settings.model,
        endpoint = %settings.base_url,
        "LLM Q&A web form"
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let result = runtime.block_on(run_server(state.clone(), &settings.host, settings.port));
    drop(runtime);
    drop(state);

    result
}
