//! Error types for the sample application.

use bean_framework::ContainerError;
use thiserror::Error;

/// Errors that can occur while starting the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Registration or resolution of the service graph failed.
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// The literal overrides could not be parsed.
    #[error("Invalid overrides in {var}: {source}")]
    Overrides {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
