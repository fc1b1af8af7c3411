//! Tracing setup shared by the binaries.
//!
//! `RUST_LOG` wins when set; otherwise the caller's default directive is used.

use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    /// Keeps stdout free for program output.
    Stderr,
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(default_directive: &str, target: Target) {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(default_directive));

    let result = match target {
        Target::Stdout => builder.try_init(),
        Target::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
