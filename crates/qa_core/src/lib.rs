//! # QA Core
//!
//! Shared question pipeline used by the `ask` command line tool and the web form.
//!
//! A raw question is normalized (trimmed, lowercased, stripped of punctuation,
//! whitespace collapsed), wrapped in a fixed prompt template and sent to a
//! [`CompletionClient`]. Failures come back as an [`AskError`]:
//!
//! - [`AskError::EmptyInput`]: nothing to ask, the service is not contacted
//! - [`AskError::CredentialMissing`]: no API key, the service is not contacted
//! - [`AskError::Upstream`]: the completion call itself failed
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qa_core::{EnvCredentials, Pipeline, DEFAULT_MODEL};
//! # fn client() -> Arc<dyn qa_core::CompletionClient> { unimplemented!() }
//!
//! let pipeline = Pipeline::new(client(), Arc::new(EnvCredentials::default()));
//! let answer = pipeline.ask("What's the capital of France?", DEFAULT_MODEL)?;
//! println!("{}", answer.text);
//! # Ok::<(), qa_core::AskError>(())
//! ```

pub mod completion;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod prompt;

pub use completion::{resolve_model, CompletionClient, CompletionRequest, DEFAULT_MODEL};
pub use credentials::{CredentialProvider, EnvCredentials, StaticCredentials, DEFAULT_API_KEY_ENV};
pub use error::{AskError, Result};
pub use normalize::{normalize, NormalizedQuestion};
pub use pipeline::{Answer, Pipeline, PreparedQuestion};
pub use prompt::{build_prompt, ANSWER_CUE, DEFAULT_SYSTEM_PROMPT};
