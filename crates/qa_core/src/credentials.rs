/// Environment variable holding the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "XAI_API_KEY";

/// Source of the API credential, looked up at call time.
pub trait CredentialProvider: Send + Sync {
    /// Returns the credential, or `None` when none is configured.
    fn credential(&self) -> Option<String>;

    /// Human readable name of where the credential comes from, used in error messages.
    fn source(&self) -> String;
}

/// Reads the credential from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn credential(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn source(&self) -> String {
        self.var.clone()
    }
}

/// Fixed credential (or a fixed absence of one). Mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl StaticCredentials {
    pub fn present(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn credential(&self) -> Option<String> {
        self.0.clone()
    }

    fn source(&self) -> String {
        "static credential".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_credentials_missing_variable() {
        let provider = EnvCredentials::new("QA_CORE_TEST_SURELY_UNSET_KEY");
        assert_eq!(provider.credential(), None);
        assert_eq!(provider.source(), "QA_CORE_TEST_SURELY_UNSET_KEY");
    }

    #[test]
    fn test_static_credentials() {
        assert_eq!(
            StaticCredentials::present("k").credential().as_deref(),
            Some("k")
        );
        assert_eq!(StaticCredentials::absent().credential(), None);
    }
}
