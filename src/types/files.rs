//! File store types: provider-side file resources and the crate's own
//! handle for uploaded documents.

use serde::{Deserialize, Serialize};

use crate::error::{CopilotResult, ProviderError};

/// A file resource as reported by the provider's file store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFile {
    /// Resource name, e.g. `files/abc-123`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Declared MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes, serialized as a string by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<String>,
    /// Full URI usable in generation requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Processing state; absent in some upload responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FileState>,
    /// When the provider will expire the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
}

/// Envelope around a file resource in upload responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadFileResponse {
    /// The uploaded file resource.
    pub file: ProviderFile,
}

/// Processing state of a file in the provider's store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    /// Still being processed; not yet usable.
    Processing,
    /// Ready for use in generation requests.
    Active,
    /// Processing failed; the file is unusable.
    Failed,
}

/// The crate's handle for a successfully uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFileRef {
    /// Provider resource name (`files/...`), when known.
    pub file_id: Option<String>,
    /// Full URI to reference in generation requests.
    pub uri: String,
    /// Display name the file was uploaded under.
    pub display_name: String,
    /// Size in bytes, when reported.
    pub size_bytes: Option<u64>,
    /// MIME type of the document.
    pub mime_type: String,
    /// Last known processing state.
    pub state: FileState,
}

impl UploadedFileRef {
    /// Build a handle from a provider file resource.
    ///
    /// A resource reporting `FAILED` is rejected; an absent state is
    /// treated as active, since some upload responses omit it.
    pub fn from_provider_file(file: ProviderFile) -> CopilotResult<Self> {
        let display_name = file.display_name.unwrap_or_default();

        let state = file.state.unwrap_or(FileState::Active);
        if state == FileState::Failed {
            return Err(ProviderError::FileProcessingFailed {
                display_name: display_name.clone(),
            }
            .into());
        }

        let uri = file.uri.ok_or_else(|| ProviderError::MalformedResponse {
            message: "upload response missing file uri".to_string(),
        })?;

        Ok(Self {
            file_id: file.name,
            uri,
            display_name,
            size_bytes: file.size_bytes.and_then(|s| s.parse().ok()),
            mime_type: file
                .mime_type
                .unwrap_or_else(|| mime::APPLICATION_PDF.to_string()),
            state,
        })
    }

    /// Build a lightweight handle from a caller-supplied URI of an
    /// already-uploaded PDF document.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            file_id: None,
            display_name: uri.rsplit('/').next().unwrap_or_default().to_string(),
            uri,
            size_bytes: None,
            mime_type: mime::APPLICATION_PDF.to_string(),
            state: FileState::Active,
        }
    }

    /// Whether the file is usable in a generation request.
    pub fn is_active(&self) -> bool {
        self.state == FileState::Active
    }
}
