use thiserror::Error;

pub type Result<T> = std::result::Result<T, AskError>;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("No question provided.")]
    EmptyInput,

    #[error("No API credential configured ({source_name} is not set).")]
    CredentialMissing { source_name: String },

    #[error("Upstream call failed: {0:#}")]
    Upstream(anyhow::Error),
}
