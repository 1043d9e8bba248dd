//! Gemini-backed implementation of the chat service.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use super::validation::validate_generation_input;
use super::{ChatService, GenerationInput, MarkdownStream};
use crate::auth::AuthManager;
use crate::config::GeminiConfig;
use crate::error::{CopilotResult, ProviderError};
use crate::observability::Logger;
use crate::streaming::{ChunkParser, TextFragmentStream};
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ModelInfo, Part,
};

/// Chat service calling the Gemini generateContent endpoints.
///
/// Generation parameters are fixed when the service is built; every
/// call uses the same model, temperature and output token ceiling.
pub struct GeminiChatService {
    config: Arc<GeminiConfig>,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Box<dyn Logger>,
}

impl GeminiChatService {
    /// Create a chat service.
    pub fn new(
        config: Arc<GeminiConfig>,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        logger: Box<dyn Logger>,
    ) -> Self {
        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager.clone_box(),
        );
        Self {
            config,
            transport,
            request_builder,
            logger,
        }
    }

    /// Assemble the request body. File parts always come first and the
    /// instruction text is always the final part, for every operation.
    fn build_request(&self, input: &GenerationInput) -> GenerateContentRequest {
        let mut parts: Vec<Part> = input
            .files
            .iter()
            .map(|file| Part::from_uri(file.uri.clone(), file.mime_type.clone()))
            .collect();
        if !input.prompt.trim().is_empty() {
            parts.push(Part::from_text(input.prompt.clone()));
        }

        GenerateContentRequest {
            contents: vec![Content::from_parts(parts)],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature),
                max_output_tokens: Some(self.config.max_output_tokens),
            }),
        }
    }

    fn log_usage(&self, response: &GenerateContentResponse, elapsed_ms: u128) {
        if let Some(usage) = &response.usage_metadata {
            self.logger.info(
                "generation completed",
                json!({
                    "model": self.config.model,
                    "duration_ms": elapsed_ms,
                    "prompt_tokens": usage.prompt_token_count,
                    "completion_tokens": usage.candidates_token_count,
                    "total_tokens": usage.total_token_count,
                }),
            );
        } else {
            self.logger.info(
                "generation completed",
                json!({
                    "model": self.config.model,
                    "duration_ms": elapsed_ms,
                }),
            );
        }
    }
}

#[async_trait]
impl ChatService for GeminiChatService {
    async fn generate(&self, input: GenerationInput) -> CopilotResult<String> {
        validate_generation_input(&input)?;

        let start = Instant::now();
        self.logger.debug(
            "starting generation",
            json!({
                "model": self.config.model,
                "file_count": input.files.len(),
            }),
        );

        let body = self.build_request(&input);
        let path = endpoints::generate_content(&self.config.model);
        let http_request =
            self.request_builder
                .build_request(HttpMethod::Post, &path, Some(&body), None)?;

        let http_response = self.transport.send(http_request).await.map_err(|e| {
            self.logger.error(
                "generation request failed",
                json!({ "model": self.config.model, "error": e.to_string() }),
            );
            e
        })?;

        let response: GenerateContentResponse = ResponseParser::parse_response(http_response)?;
        self.log_usage(&response, start.elapsed().as_millis());

        let text = response.text();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }
        Ok(text)
    }

    async fn generate_stream(&self, input: GenerationInput) -> CopilotResult<MarkdownStream> {
        validate_generation_input(&input)?;

        self.logger.debug(
            "starting streamed generation",
            json!({
                "model": self.config.model,
                "file_count": input.files.len(),
            }),
        );

        let body = self.build_request(&input);
        let path = endpoints::stream_generate_content(&self.config.model);
        let http_request =
            self.request_builder
                .build_request(HttpMethod::Post, &path, Some(&body), None)?;

        let chunk_stream = self.transport.send_streaming(http_request).await?;

        let byte_stream = chunk_stream.map(|chunk| {
            chunk.map_err(|e| {
                ProviderError::StreamInterrupted {
                    message: e.to_string(),
                }
                .into()
            })
        });
        let parser = ChunkParser::new(Box::pin(byte_stream));
        let fragments = TextFragmentStream::new(Box::pin(parser));
        Ok(Box::pin(fragments))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::gemini(self.config.model.clone(), self.config.access_mode())
    }
}
