use std::sync::Arc;

use crate::completion::{CompletionClient, CompletionRequest};
use crate::credentials::CredentialProvider;
use crate::error::{AskError, Result};
use crate::normalize::{normalize, NormalizedQuestion};
use crate::prompt::{build_prompt, DEFAULT_SYSTEM_PROMPT};

/// A normalized question together with the prompt built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuestion {
    pub question: NormalizedQuestion,
    pub prompt: String,
}

/// Successful pipeline run.
#[derive(Debug, Clone)]
pub struct Answer {
    pub prepared: PreparedQuestion,
    pub model: String,
    pub text: String,
}

/// Normalize → build prompt → complete.
///
/// Holds no per-request state, so one instance can be shared across
/// concurrent requests behind an `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn CompletionClient>,
    credentials: Arc<dyn CredentialProvider>,
    system_prompt: String,
}

impl Pipeline {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            credentials,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Normalizes the raw question and builds its prompt.
    ///
    /// Fails with [`AskError::EmptyInput`] when nothing but whitespace was given.
    pub fn prepare(&self, raw: &str) -> Result<PreparedQuestion> {
        let question = normalize(raw);
        if question.is_empty() {
            return Err(AskError::EmptyInput);
        }

        let prompt = build_prompt(&question);
        tracing::debug!(processed = %question.processed, tokens = question.tokens.len(), "question prepared");

        Ok(PreparedQuestion { question, prompt })
    }

    /// Sends a prepared question to the completion service.
    ///
    /// The credential is resolved first; when it is missing no request is made.
    pub fn complete(&self, prepared: &PreparedQuestion, model: &str) -> Result<String> {
        let api_key = self
            .credentials
            .credential()
            .ok_or_else(|| AskError::CredentialMissing {
                source_name: self.credentials.source(),
            })?;

        let request = CompletionRequest {
            system_prompt: &self.system_prompt,
            user_prompt: &prepared.prompt,
            model,
            api_key: &api_key,
        };

        tracing::info!(model, "calling completion service");
        self.client.complete(&request).map_err(|err| {
            tracing::warn!(model, error = %format!("{err:#}"), "completion call failed");
            AskError::Upstream(err)
        })
    }

    /// Runs the whole pipeline for one question.
    pub fn ask(&self, raw: &str, model: &str) -> Result<Answer> {
        let prepared = self.prepare(raw)?;
        let text = self.complete(&prepared, model)?;
        Ok(Answer {
            prepared,
            model: model.to_string(),
            text,
        })
    }
}
