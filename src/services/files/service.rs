//! Provider file store upload implementation.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::validation::{validate_raw_upload, validate_upload_count};
use super::{FileUpload, RawUpload};
use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::{CopilotError, CopilotResult, InvalidArgumentError};
use crate::observability::Logger;
use crate::transport::{endpoints, HttpMethod, HttpRequest, HttpTransport, ResponseParser};
use crate::types::{UploadFileResponse, UploadedFileRef};

/// Uploads documents through the provider's multipart upload endpoint.
pub struct FileUploadService {
    config: Arc<GeminiConfig>,
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    logger: Box<dyn Logger>,
}

/// Temp files staged for an upload, removed when the batch finishes.
///
/// Removal happens in `Drop` so the files are cleaned up on success,
/// error, and cancellation alike.
struct StagedFiles {
    paths: Vec<PathBuf>,
}

impl StagedFiles {
    fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for StagedFiles {
    fn drop(&mut self) {
        cleanup_temp_files(&self.paths);
    }
}

/// Best-effort deletion of staged upload files.
///
/// Failures are logged and swallowed; cleanup never masks or replaces
/// the error that ended the upload.
pub fn cleanup_temp_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove staged upload file");
        }
    }
}

impl FileUploadService {
    /// Create an upload service.
    pub fn new(
        config: Arc<GeminiConfig>,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        logger: Box<dyn Logger>,
    ) -> Self {
        Self {
            config,
            transport,
            auth_manager,
            logger,
        }
    }

    /// Read and validate one local file, without touching the network.
    async fn read_local_file(&self, path: &Path) -> CopilotResult<RawUpload> {
        let display_path = path.display().to_string();

        let metadata = tokio::fs::metadata(path).await.map_err(|_| {
            CopilotError::from(InvalidArgumentError::FileNotFound {
                path: display_path.clone(),
            })
        })?;

        if !metadata.is_file() {
            return Err(InvalidArgumentError::NotAFile { path: display_path }.into());
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(display_path);

        // The ceiling is checked on metadata before reading so an
        // oversize file is never pulled into memory.
        if metadata.len() > self.config.max_file_size {
            return Err(InvalidArgumentError::FileTooLarge {
                name: file_name,
                size_bytes: metadata.len(),
                max_bytes: self.config.max_file_size,
            }
            .into());
        }

        let content = tokio::fs::read(path).await.map_err(|e| {
            CopilotError::from(InvalidArgumentError::FileNotFound {
                path: format!("{}: {e}", path.display()),
            })
        })?;

        let upload = RawUpload {
            file_name,
            mime_type: mime::APPLICATION_PDF.to_string(),
            content,
        };
        validate_raw_upload(&upload, &self.config)?;
        Ok(upload)
    }

    /// Stage upload content to uniquely named temp files.
    async fn stage_to_temp_files(&self, uploads: &[RawUpload]) -> CopilotResult<StagedFiles> {
        let mut staged = StagedFiles { paths: Vec::new() };

        for upload in uploads {
            let sanitized: String = upload
                .file_name
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '.' { c } else { '_' })
                .collect();
            let path = self.config.staging_dir.join(format!(
                "atam-upload-{}-{sanitized}",
                uuid::Uuid::new_v4()
            ));

            tokio::fs::write(&path, &upload.content).await.map_err(|e| {
                CopilotError::from(crate::error::ProviderError::Network {
                    message: format!("failed to stage upload: {e}"),
                })
            })?;
            staged.paths.push(path);
        }

        Ok(staged)
    }

    /// Upload one validated document, bounded by the upload timeout.
    ///
    /// Hitting the bound drops the in-flight call, which cancels it.
    async fn upload_one(&self, upload: &RawUpload) -> CopilotResult<UploadedFileRef> {
        let request = self.build_upload_request(upload)?;

        self.logger.info(
            "uploading document",
            json!({
                "display_name": upload.file_name,
                "size_bytes": upload.content.len(),
            }),
        );

        let send = self.transport.send(request);
        let response = match tokio::time::timeout(self.config.upload_timeout, send).await {
            Ok(result) => result?,
            Err(_) => {
                self.logger.warn(
                    "upload timed out",
                    json!({
                        "display_name": upload.file_name,
                        "timeout_secs": self.config.upload_timeout.as_secs(),
                    }),
                );
                return Err(CopilotError::UploadTimeout {
                    display_name: upload.file_name.clone(),
                    timeout: self.config.upload_timeout,
                });
            }
        };

        let parsed: UploadFileResponse = ResponseParser::parse_response(response)?;
        UploadedFileRef::from_provider_file(parsed.file)
    }

    /// Build the multipart/related upload request.
    fn build_upload_request(&self, upload: &RawUpload) -> CopilotResult<HttpRequest> {
        let boundary = format!("----atam_boundary_{}", uuid::Uuid::new_v4());

        let mut url = endpoints::upload_files(self.config.base_url.as_str(), &self.config.api_version);
        if let Some((key, value)) = self.auth_manager.get_auth_query_param() {
            url = format!("{url}?{key}={value}");
        }

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            format!("multipart/related; boundary={boundary}"),
        );
        headers.insert("X-Goog-Upload-Protocol".to_string(), "multipart".to_string());
        if let Some((name, value)) = self.auth_manager.get_auth_header() {
            headers.insert(name, value);
        }

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(Bytes::from(multipart_body(upload, &boundary))),
        })
    }

    /// Validate everything, then upload sequentially.
    async fn upload_all(&self, uploads: &[RawUpload]) -> CopilotResult<Vec<UploadedFileRef>> {
        validate_upload_count(uploads.len(), &self.config)?;
        for upload in uploads {
            validate_raw_upload(upload, &self.config)?;
        }

        let mut uploaded = Vec::with_capacity(uploads.len());
        for upload in uploads {
            uploaded.push(self.upload_one(upload).await?);
        }

        self.logger
            .info("upload batch complete", json!({ "count": uploaded.len() }));
        Ok(uploaded)
    }
}

/// Assemble the two-part multipart/related body: JSON metadata, then
/// the document bytes.
fn multipart_body(upload: &RawUpload, boundary: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(upload.content.len() + 512);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    let metadata = json!({ "file": { "display_name": upload.file_name } });
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", upload.mime_type).as_bytes());
    body.extend_from_slice(&upload.content);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait]
impl FileUpload for FileUploadService {
    async fn upload_paths(&self, paths: &[PathBuf]) -> CopilotResult<Vec<UploadedFileRef>> {
        validate_upload_count(paths.len(), &self.config)?;

        let mut uploads = Vec::with_capacity(paths.len());
        for path in paths {
            uploads.push(self.read_local_file(path).await?);
        }

        self.upload_all(&uploads).await
    }

    async fn upload_bytes(&self, uploads: Vec<RawUpload>) -> CopilotResult<Vec<UploadedFileRef>> {
        validate_upload_count(uploads.len(), &self.config)?;
        for upload in &uploads {
            validate_raw_upload(upload, &self.config)?;
        }

        // Each upload body is built from its staged copy, and the guard
        // removes the staged files on every exit path.
        let staged = self.stage_to_temp_files(&uploads).await?;

        let mut uploaded = Vec::with_capacity(uploads.len());
        for (upload, path) in uploads.iter().zip(staged.paths()) {
            let content = tokio::fs::read(path).await.map_err(|e| {
                CopilotError::from(crate::error::ProviderError::Network {
                    message: format!("failed to read staged upload: {e}"),
                })
            })?;
            let staged_upload = RawUpload {
                file_name: upload.file_name.clone(),
                mime_type: upload.mime_type.clone(),
                content,
            };
            uploaded.push(self.upload_one(&staged_upload).await?);
        }

        self.logger
            .info("upload batch complete", json!({ "count": uploaded.len() }));
        Ok(uploaded)
    }
}
