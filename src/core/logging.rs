//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with command output. `HOSCON_LOG`
//! takes an `EnvFilter` directive (e.g. `hoscon=debug`) and wins over the
//! verbosity flags.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "HOSCON_LOG";

/// Requested verbosity from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Default filter directive for this verbosity
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: Verbosity) {
    let directive = std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| verbosity.directive().to_string());

    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
