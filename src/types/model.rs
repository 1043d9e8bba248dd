//! Model identity metadata.

use serde::{Deserialize, Serialize};

use crate::config::AccessMode;

/// Identity of the model backing a chat service instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Provider name.
    pub provider: String,
    /// Full model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Major model version extracted from the identifier.
    pub version: String,
    /// How the provider is accessed.
    pub access_mode: AccessMode,
}

impl ModelInfo {
    /// Build model info for a Google Gemini model.
    pub fn gemini(model: impl Into<String>, access_mode: AccessMode) -> Self {
        let model = model.into();
        Self {
            provider: "Google".to_string(),
            version: extract_model_version(&model),
            model,
            access_mode,
        }
    }
}

/// Extract the version component from a model identifier.
///
/// `gemini-2.5-flash` yields `2.5`; identifiers without a numeric
/// component yield `unknown`.
pub fn extract_model_version(model: &str) -> String {
    model
        .split('-')
        .find(|segment| segment.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map_or_else(|| "unknown".to_string(), ToString::to_string)
}
