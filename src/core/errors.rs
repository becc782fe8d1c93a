/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export PipeError from ipc module
pub use crate::ipc::PipeError;

// Re-export SignalError from signals module
pub use crate::signals::SignalError;

/// Configuration errors raised while reading the environment
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Unset the variable to use the default, or fix its value.")
    )]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level error for the demo binaries
#[derive(Error, Debug, Diagnostic)]
pub enum DemoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipe(#[from] PipeError),
}

/// Result alias used by the binaries' entry points
pub type DemoResult<T> = Result<T, DemoError>;
