//! Business driver extraction and utility tree generation.

use std::sync::Arc;

use super::{resolve_source, DocumentSource};
use crate::error::{CopilotResult, InvalidArgumentError};
use crate::prompts::{PromptStore, BUSINESS_DRIVER_EXTRACTION, UTILITY_TREE_GENERATION};
use crate::services::chat::{ChatService, GenerationInput, MarkdownStream};
use crate::services::files::FileUpload;

/// Heading under which approved drivers are appended to the utility
/// tree template.
const APPROVED_DRIVERS_HEADING: &str = "Approved Business Drivers";

/// Extracts business drivers from architecture documents and derives a
/// utility tree draft from the approved result.
pub struct BusinessDriverAgent {
    uploader: Arc<dyn FileUpload>,
    chat: Arc<dyn ChatService>,
    prompts: PromptStore,
}

impl BusinessDriverAgent {
    /// Create the agent.
    pub fn new(uploader: Arc<dyn FileUpload>, chat: Arc<dyn ChatService>) -> Self {
        Self {
            uploader,
            chat,
            prompts: PromptStore::new(),
        }
    }

    async fn extraction_input(&self, source: DocumentSource) -> CopilotResult<GenerationInput> {
        let files = resolve_source(&self.uploader, source).await?;
        let template = self.prompts.load(BUSINESS_DRIVER_EXTRACTION)?;
        Ok(GenerationInput::with_files(template, files))
    }

    /// Utility tree generation reads only the approved driver text;
    /// the original documents are deliberately not attached.
    fn utility_tree_input(&self, approved_drivers: &str) -> CopilotResult<GenerationInput> {
        if approved_drivers.trim().is_empty() {
            return Err(InvalidArgumentError::BlankPriorStageText.into());
        }
        let template = self.prompts.load(UTILITY_TREE_GENERATION)?;
        let prompt =
            self.prompts
                .assemble_with_context(template, APPROVED_DRIVERS_HEADING, approved_drivers);
        Ok(GenerationInput::text_only(prompt))
    }

    /// Extract business drivers as a complete markdown document.
    pub async fn extract(&self, source: DocumentSource) -> CopilotResult<String> {
        let input = self.extraction_input(source).await?;
        self.chat.generate(input).await
    }

    /// Extract business drivers as a markdown fragment stream.
    pub async fn extract_stream(&self, source: DocumentSource) -> CopilotResult<MarkdownStream> {
        let input = self.extraction_input(source).await?;
        self.chat.generate_stream(input).await
    }

    /// Derive a utility tree draft from approved business drivers.
    pub async fn generate_utility_tree_draft(
        &self,
        approved_drivers: &str,
    ) -> CopilotResult<String> {
        let input = self.utility_tree_input(approved_drivers)?;
        self.chat.generate(input).await
    }

    /// Derive a utility tree draft as a markdown fragment stream.
    pub async fn generate_utility_tree_draft_stream(
        &self,
        approved_drivers: &str,
    ) -> CopilotResult<MarkdownStream> {
        let input = self.utility_tree_input(approved_drivers)?;
        self.chat.generate_stream(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::tests_support::{RecordingChat, StubUploader};
    use crate::error::CopilotError;

    fn agent() -> (BusinessDriverAgent, Arc<RecordingChat>) {
        let chat = Arc::new(RecordingChat::replying("## Business Goals"));
        let agent = BusinessDriverAgent::new(
            Arc::new(StubUploader::default()),
            Arc::clone(&chat) as Arc<dyn ChatService>,
        );
        (agent, chat)
    }

    #[tokio::test]
    async fn test_extract_attaches_documents_and_template() {
        let (agent, chat) = agent();
        let result = agent
            .extract(DocumentSource::Uploaded(vec![
                "https://example.com/files/a".to_string(),
            ]))
            .await
            .unwrap();

        assert_eq!(result, "## Business Goals");
        let input = chat.last_input().unwrap();
        assert_eq!(input.files.len(), 1);
        assert!(input.prompt.contains("business drivers"));
    }

    #[tokio::test]
    async fn test_utility_tree_uses_text_only_input() {
        let (agent, chat) = agent();
        agent
            .generate_utility_tree_draft("## Business Goals\n\n1. Cut cost")
            .await
            .unwrap();

        let input = chat.last_input().unwrap();
        assert!(input.files.is_empty());
        assert!(input.prompt.contains("## Approved Business Drivers"));
        assert!(input.prompt.contains("Cut cost"));
        assert!(input.prompt.contains("utility"));
    }

    #[tokio::test]
    async fn test_blank_drivers_are_rejected_without_a_call() {
        let (agent, chat) = agent();
        let err = agent.generate_utility_tree_draft("   ").await.unwrap_err();
        assert!(matches!(
            err,
            CopilotError::InvalidArgument(InvalidArgumentError::BlankPriorStageText)
        ));
        assert!(chat.last_input().is_none());
    }

    #[tokio::test]
    async fn test_extract_stream_uses_streaming_path() {
        let (agent, chat) = agent();
        let _stream = agent
            .extract_stream(DocumentSource::Uploaded(vec![
                "https://example.com/files/a".to_string(),
            ]))
            .await
            .unwrap();
        assert!(chat.last_was_streaming());
    }
}
