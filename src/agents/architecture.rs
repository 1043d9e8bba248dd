//! Architecture approach analysis.

use std::sync::Arc;

use super::{resolve_source, DocumentSource};
use crate::error::CopilotResult;
use crate::prompts::{PromptStore, ARCHITECTURE_ANALYSIS};
use crate::services::chat::{ChatService, GenerationInput, MarkdownStream};
use crate::services::files::FileUpload;

/// Analyzes architectural approaches in the supplied documents,
/// deriving risks, non-risks, sensitivity points and tradeoff points.
pub struct ArchitectureAgent {
    uploader: Arc<dyn FileUpload>,
    chat: Arc<dyn ChatService>,
    prompts: PromptStore,
}

impl ArchitectureAgent {
    /// Create the agent.
    pub fn new(uploader: Arc<dyn FileUpload>, chat: Arc<dyn ChatService>) -> Self {
        Self {
            uploader,
            chat,
            prompts: PromptStore::new(),
        }
    }

    async fn analysis_input(&self, source: DocumentSource) -> CopilotResult<GenerationInput> {
        let files = resolve_source(&self.uploader, source).await?;
        let template = self.prompts.load(ARCHITECTURE_ANALYSIS)?;
        Ok(GenerationInput::with_files(template, files))
    }

    /// Analyze the documents as a complete markdown document.
    pub async fn analyze(&self, source: DocumentSource) -> CopilotResult<String> {
        let input = self.analysis_input(source).await?;
        self.chat.generate(input).await
    }

    /// Analyze the documents as a markdown fragment stream.
    pub async fn analyze_stream(&self, source: DocumentSource) -> CopilotResult<MarkdownStream> {
        let input = self.analysis_input(source).await?;
        self.chat.generate_stream(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::tests_support::{RecordingChat, StubUploader};
    use std::path::PathBuf;

    fn agent() -> (ArchitectureAgent, Arc<RecordingChat>) {
        let chat = Arc::new(RecordingChat::replying("## Risks"));
        let agent = ArchitectureAgent::new(
            Arc::new(StubUploader::default()),
            Arc::clone(&chat) as Arc<dyn ChatService>,
        );
        (agent, chat)
    }

    #[tokio::test]
    async fn test_analyze_with_uploaded_documents() {
        let (agent, chat) = agent();
        let result = agent
            .analyze(DocumentSource::Uploaded(vec![
                "https://example.com/files/a".to_string(),
                "https://example.com/files/b".to_string(),
            ]))
            .await
            .unwrap();

        assert_eq!(result, "## Risks");
        let input = chat.last_input().unwrap();
        assert_eq!(input.files.len(), 2);
        assert!(input.prompt.contains("sensitivity points"));
    }

    #[tokio::test]
    async fn test_analyze_with_local_paths_uploads_first() {
        let (agent, chat) = agent();
        agent
            .analyze(DocumentSource::LocalPaths(vec![PathBuf::from("design.pdf")]))
            .await
            .unwrap();

        let input = chat.last_input().unwrap();
        assert_eq!(input.files.len(), 1);
        assert!(input.files[0].uri.contains("design.pdf"));
    }

    #[tokio::test]
    async fn test_analyze_stream_uses_streaming_path() {
        let (agent, chat) = agent();
        let _stream = agent
            .analyze_stream(DocumentSource::Uploaded(vec![
                "https://example.com/files/a".to_string(),
            ]))
            .await
            .unwrap();
        assert!(chat.last_was_streaming());
    }
}
