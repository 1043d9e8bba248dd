//! The copilot facade.

use std::sync::Arc;

use crate::agents::{ArchitectureAgent, BusinessDriverAgent, DocumentSource};
use crate::config::GeminiConfig;
use crate::error::CopilotResult;
use crate::services::chat::{ChatService, MarkdownStream};
use crate::services::files::{FileUpload, RawUpload};
use crate::types::{ModelInfo, UploadedFileRef};

/// Entry point for ATAM document analysis.
///
/// Wraps the upload service and the extraction agents behind one
/// object. Built via [`crate::AtamCopilotBuilder`].
pub struct AtamCopilot {
    config: Arc<GeminiConfig>,
    uploader: Arc<dyn FileUpload>,
    chat: Arc<dyn ChatService>,
    business: BusinessDriverAgent,
    architecture: ArchitectureAgent,
}

impl AtamCopilot {
    pub(crate) fn new(
        config: Arc<GeminiConfig>,
        uploader: Arc<dyn FileUpload>,
        chat: Arc<dyn ChatService>,
    ) -> Self {
        let business = BusinessDriverAgent::new(Arc::clone(&uploader), Arc::clone(&chat));
        let architecture = ArchitectureAgent::new(Arc::clone(&uploader), Arc::clone(&chat));
        Self {
            config,
            uploader,
            chat,
            business,
            architecture,
        }
    }

    /// Upload architecture documents supplied as raw bytes.
    pub async fn upload_files(&self, uploads: Vec<RawUpload>) -> CopilotResult<Vec<UploadedFileRef>> {
        self.uploader.upload_bytes(uploads).await
    }

    /// Extract business drivers from the documents.
    pub async fn extract_business_drivers(&self, source: DocumentSource) -> CopilotResult<String> {
        self.business.extract(source).await
    }

    /// Extract business drivers as a markdown fragment stream.
    pub async fn extract_business_drivers_stream(
        &self,
        source: DocumentSource,
    ) -> CopilotResult<MarkdownStream> {
        self.business.extract_stream(source).await
    }

    /// Derive a utility tree draft from approved business drivers.
    pub async fn generate_utility_tree(&self, approved_drivers: &str) -> CopilotResult<String> {
        self.business.generate_utility_tree_draft(approved_drivers).await
    }

    /// Derive a utility tree draft as a markdown fragment stream.
    pub async fn generate_utility_tree_stream(
        &self,
        approved_drivers: &str,
    ) -> CopilotResult<MarkdownStream> {
        self.business
            .generate_utility_tree_draft_stream(approved_drivers)
            .await
    }

    /// Analyze architectural approaches in the documents.
    pub async fn analyze_architecture(&self, source: DocumentSource) -> CopilotResult<String> {
        self.architecture.analyze(source).await
    }

    /// Analyze architectural approaches as a markdown fragment stream.
    pub async fn analyze_architecture_stream(
        &self,
        source: DocumentSource,
    ) -> CopilotResult<MarkdownStream> {
        self.architecture.analyze_stream(source).await
    }

    /// Identity of the backing model.
    pub fn model_info(&self) -> ModelInfo {
        self.chat.model_info()
    }

    /// The configuration this copilot was built with.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}
