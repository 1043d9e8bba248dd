//! Mapping of provider HTTP error responses to [`CopilotError`].

use super::categories::ProviderError;
use super::types::CopilotError;

/// Maps a non-success provider response to a [`CopilotError`].
///
/// The provider wraps errors as `{"error": {"message": ..., ...}}`; when
/// that shape is absent the raw body text is carried instead. Status codes
/// are preserved so the transport boundary can distinguish provider-side
/// classes without this crate retrying anything.
pub fn map_http_status(status: u16, body: &[u8]) -> CopilotError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    CopilotError::Provider(ProviderError::Api { status, message })
}

/// Pulls `error.message` out of a provider error body, if present.
fn extract_error_message(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
