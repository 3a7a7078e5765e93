//! Error types for the `settings-demo` binary.

use std::sync::Arc;

use app_settings::{ConvertError, SettingsError};
use thiserror::Error;

/// Errors raised by the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Merging or reading settings failed.
    #[error("failed to resolve settings: {0}")]
    Settings(#[from] Arc<SettingsError>),
    /// The `--default` value does not convert to the requested kind.
    #[error("invalid --default value '{value}': {source}")]
    InvalidDefault {
        /// Text supplied on the command line.
        value: String,
        /// Conversion failure.
        #[source]
        source: ConvertError,
    },
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for demo results.
pub type Result<T> = std::result::Result<T, DemoError>;
