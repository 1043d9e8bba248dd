//! Generation service: prompt plus file references in, markdown out,
//! buffered or streamed.

mod service;
mod validation;

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::CopilotResult;
use crate::types::{ModelInfo, UploadedFileRef};

pub use service::GeminiChatService;
pub use validation::validate_generation_input;

/// Stream of markdown text fragments in generation order.
pub type MarkdownStream = Pin<Box<dyn Stream<Item = CopilotResult<String>> + Send>>;

/// One generation call: instruction text plus the documents it reads.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    /// Assembled instruction text.
    pub prompt: String,
    /// Uploaded documents the model should read.
    pub files: Vec<UploadedFileRef>,
}

impl GenerationInput {
    /// Text-only input with no document references.
    pub fn text_only(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            files: Vec::new(),
        }
    }

    /// Input combining instruction text with document references.
    pub fn with_files(prompt: impl Into<String>, files: Vec<UploadedFileRef>) -> Self {
        Self {
            prompt: prompt.into(),
            files,
        }
    }
}

/// Model invocation with fixed per-instance generation parameters.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Generate a complete markdown response.
    async fn generate(&self, input: GenerationInput) -> CopilotResult<String>;

    /// Generate a streamed markdown response. The concatenated
    /// fragments equal the buffered response for the same input.
    async fn generate_stream(&self, input: GenerationInput) -> CopilotResult<MarkdownStream>;

    /// Identity of the backing model.
    fn model_info(&self) -> ModelInfo;
}
