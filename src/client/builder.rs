//! Builder for [`AtamCopilot`] instances.

use std::sync::Arc;

use crate::auth::auth_manager_for;
use crate::config::GeminiConfig;
use crate::error::CopilotResult;
use crate::observability::{Logger, StructuredLogger};
use crate::services::chat::GeminiChatService;
use crate::services::files::FileUploadService;
use crate::transport::{HttpTransport, ReqwestTransport};

use super::copilot::AtamCopilot;

/// Builds an [`AtamCopilot`] from a configuration, with optional
/// injected transport and logger for tests.
pub struct AtamCopilotBuilder {
    config: GeminiConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    upload_logger: Option<Box<dyn Logger>>,
    chat_logger: Option<Box<dyn Logger>>,
}

impl AtamCopilotBuilder {
    /// Start from a configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            transport: None,
            upload_logger: None,
            chat_logger: None,
        }
    }

    /// Start from environment variables.
    pub fn from_env() -> CopilotResult<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    /// Inject a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Inject a custom logger for the upload service.
    pub fn upload_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.upload_logger = Some(logger);
        self
    }

    /// Inject a custom logger for the chat service.
    pub fn chat_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.chat_logger = Some(logger);
        self
    }

    /// Wire up the copilot.
    pub fn build(self) -> CopilotResult<AtamCopilot> {
        let config = Arc::new(self.config);

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                config.timeout,
                config.connect_timeout,
            )?),
        };

        let auth_manager = auth_manager_for(&config);

        let upload_logger = self
            .upload_logger
            .unwrap_or_else(|| Box::new(StructuredLogger::new("copilot.files")));
        let chat_logger = self
            .chat_logger
            .unwrap_or_else(|| Box::new(StructuredLogger::new("copilot.chat")));

        let uploader = Arc::new(FileUploadService::new(
            Arc::clone(&config),
            Arc::clone(&transport),
            Arc::clone(&auth_manager),
            upload_logger,
        ));
        let chat = Arc::new(GeminiChatService::new(
            Arc::clone(&config),
            transport,
            auth_manager,
            chat_logger,
        ));

        Ok(AtamCopilot::new(config, uploader, chat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockHttpTransport;
    use secrecy::SecretString;

    #[test]
    fn test_build_with_injected_transport() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        let copilot = AtamCopilotBuilder::new(config)
            .transport(Arc::new(MockHttpTransport::new()))
            .build()
            .unwrap();

        assert_eq!(copilot.model_info().model, "gemini-2.5-flash");
    }
}
