//! Document upload: validation, provider file store upload, and temp
//! file hygiene.

mod service;
mod validation;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::CopilotResult;
use crate::types::UploadedFileRef;

pub use service::{cleanup_temp_files, FileUploadService};
pub use validation::{is_pdf, validate_raw_upload, validate_upload_count};

/// Caller-supplied document content before upload.
#[derive(Debug, Clone)]
pub struct RawUpload {
    /// Original file name, used as the provider display name.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Document bytes.
    pub content: Vec<u8>,
}

/// Uploads architecture documents to the provider's file store.
///
/// All files in a request are validated before any network call; a
/// single invalid file fails the batch without a provider round trip.
#[async_trait]
pub trait FileUpload: Send + Sync {
    /// Upload documents read from local paths.
    async fn upload_paths(&self, paths: &[PathBuf]) -> CopilotResult<Vec<UploadedFileRef>>;

    /// Upload caller-supplied document bytes. Content is staged to
    /// temporary files, each upload body is built from its staged
    /// copy, and the staged files are removed on every exit path.
    async fn upload_bytes(&self, uploads: Vec<RawUpload>) -> CopilotResult<Vec<UploadedFileRef>>;
}
