//! Main error type for the ATAM copilot core.

use std::time::Duration;
use thiserror::Error;

use super::categories::{ConfigurationError, InvalidArgumentError, ProviderError};

/// Result type alias for copilot operations.
pub type CopilotResult<T> = Result<T, CopilotError>;

/// Top-level error type for the extraction pipeline.
#[derive(Error, Debug, Clone)]
pub enum CopilotError {
    /// Configuration defect detected at startup.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Malformed caller input, rejected before any network call.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The provider upload call exceeded its fixed bound and was cancelled.
    #[error("upload of '{display_name}' timed out after {timeout:?}")]
    UploadTimeout {
        /// Display name of the file whose upload timed out.
        display_name: String,
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// Failure from the upload or generation provider call.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A named prompt template is absent. Internal configuration defect.
    #[error("prompt template not found: {name}")]
    TemplateNotFound {
        /// The requested template name.
        name: String,
    },
}

impl CopilotError {
    /// Returns true when the error is the caller's fault.
    ///
    /// The transport layer uses this to pick a client-error status; all
    /// other variants surface as server/dependency errors.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CopilotError::InvalidArgument(_))
    }
}

impl From<reqwest::Error> for CopilotError {
    fn from(err: reqwest::Error) -> Self {
        CopilotError::Provider(ProviderError::Network {
            message: err.to_string(),
        })
    }
}

impl From<crate::transport::TransportError> for CopilotError {
    fn from(err: crate::transport::TransportError) -> Self {
        CopilotError::Provider(ProviderError::Network {
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for CopilotError {
    fn from(err: serde_json::Error) -> Self {
        CopilotError::Provider(ProviderError::MalformedResponse {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for CopilotError {
    fn from(err: url::ParseError) -> Self {
        CopilotError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}
