#![forbid(unsafe_code)]

//! JSON log output for hosts.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! application's call. [`install`] is a one-line default: newline-delimited
//! JSON on stdout, filtered by the `VLIST_LOG` environment variable using
//! `EnvFilter` directive syntax (`info`, `vlist_runtime=debug`, ...).

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const ENV_LOG: &str = "VLIST_LOG";

/// Directives used when `VLIST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// A global subscriber could not be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallError {
    message: String,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

impl std::error::Error for InstallError {}

/// Build a filter from `directives`, falling back to [`DEFAULT_DIRECTIVES`].
#[must_use]
pub fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the JSON subscriber as the global default.
///
/// # Errors
///
/// Returns [`InstallError`] if a global subscriber is already set.
pub fn install() -> Result<(), InstallError> {
    let directives = std::env::var(ENV_LOG).ok();
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(filter(directives.as_deref()))
        .try_init()
        .map_err(|err| InstallError {
            message: err.to_string(),
        })
}
