//! Extraction agents: each one pairs a prompt template with the upload
//! and generation services to produce one ATAM artifact.

mod architecture;
mod business;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{CopilotResult, InvalidArgumentError};
use crate::services::files::FileUpload;
use crate::types::UploadedFileRef;

pub use architecture::ArchitectureAgent;
pub use business::BusinessDriverAgent;

/// Where an agent's input documents come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// URIs of documents already in the provider's file store.
    Uploaded(Vec<String>),
    /// Local PDF paths, uploaded before the generation call.
    LocalPaths(Vec<PathBuf>),
}

/// Resolve a document source into file references, uploading local
/// paths first. Already-uploaded URIs are validated but not re-sent.
pub(crate) async fn resolve_source(
    uploader: &Arc<dyn FileUpload>,
    source: DocumentSource,
) -> CopilotResult<Vec<UploadedFileRef>> {
    match source {
        DocumentSource::Uploaded(uris) => {
            if uris.is_empty() {
                return Err(InvalidArgumentError::NoFilesProvided.into());
            }
            let mut files = Vec::with_capacity(uris.len());
            for uri in uris {
                if uri.trim().is_empty() {
                    return Err(InvalidArgumentError::BlankFileUri.into());
                }
                files.push(UploadedFileRef::from_uri(uri));
            }
            Ok(files)
        }
        DocumentSource::LocalPaths(paths) => uploader.upload_paths(&paths).await,
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::error::CopilotResult;
    use crate::services::chat::{ChatService, GenerationInput, MarkdownStream};
    use crate::services::files::{FileUpload, RawUpload};
    use crate::types::{ModelInfo, UploadedFileRef};

    /// Uploader returning one active reference per path.
    #[derive(Default)]
    pub(crate) struct StubUploader;

    #[async_trait]
    impl FileUpload for StubUploader {
        async fn upload_paths(&self, paths: &[PathBuf]) -> CopilotResult<Vec<UploadedFileRef>> {
            Ok(paths
                .iter()
                .map(|p| {
                    UploadedFileRef::from_uri(format!(
                        "https://example.com/v1beta/files/{}",
                        p.display()
                    ))
                })
                .collect())
        }

        async fn upload_bytes(
            &self,
            uploads: Vec<RawUpload>,
        ) -> CopilotResult<Vec<UploadedFileRef>> {
            Ok(uploads
                .iter()
                .map(|u| {
                    UploadedFileRef::from_uri(format!(
                        "https://example.com/v1beta/files/{}",
                        u.file_name
                    ))
                })
                .collect())
        }
    }

    /// Chat service recording the inputs it receives.
    pub(crate) struct RecordingChat {
        reply: String,
        inputs: Mutex<Vec<(GenerationInput, bool)>>,
    }

    impl RecordingChat {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                inputs: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn last_input(&self) -> Option<GenerationInput> {
            self.inputs.lock().unwrap().last().map(|(i, _)| i.clone())
        }

        pub(crate) fn last_was_streaming(&self) -> bool {
            self.inputs
                .lock()
                .unwrap()
                .last()
                .is_some_and(|(_, streaming)| *streaming)
        }
    }

    #[async_trait]
    impl ChatService for RecordingChat {
        async fn generate(&self, input: GenerationInput) -> CopilotResult<String> {
            self.inputs.lock().unwrap().push((input, false));
            Ok(self.reply.clone())
        }

        async fn generate_stream(
            &self,
            input: GenerationInput,
        ) -> CopilotResult<MarkdownStream> {
            self.inputs.lock().unwrap().push((input, true));
            let reply = self.reply.clone();
            Ok(Box::pin(futures::stream::iter(vec![Ok::<
                _,
                crate::error::CopilotError,
            >(reply)])))
        }

        fn model_info(&self) -> ModelInfo {
            ModelInfo::gemini("gemini-2.5-flash", crate::config::AccessMode::ApiKey)
        }
    }
}
