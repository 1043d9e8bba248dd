//! # ATAM Copilot Core
//!
//! Backend core for AI-assisted ATAM (Architecture Tradeoff Analysis
//! Method) evaluation, backed by the Google Gemini API.
//!
//! The pipeline: upload architecture documents (PDF) to the provider's
//! file store, assemble a prompt from a named template plus the file
//! references, invoke the model with fixed generation parameters, and
//! return markdown either buffered or as a fragment stream.
//!
//! ## Features
//!
//! - PDF upload with strict pre-flight validation (type, size, count)
//!   and a hard per-file upload timeout with cancellation
//! - Business driver extraction and architecture analysis agents over
//!   uploaded documents
//! - Utility tree drafting from approved business drivers
//! - Streaming responses with chunked JSON parsing
//! - API-key and Vertex AI access modes, resolved once at startup
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atam_copilot::{AtamCopilotBuilder, DocumentSource, GeminiConfig};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeminiConfig::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .build()?;
//!     let copilot = AtamCopilotBuilder::new(config).build()?;
//!
//!     let drivers = copilot
//!         .extract_business_drivers(DocumentSource::LocalPaths(vec![
//!             "docs/architecture.pdf".into(),
//!         ]))
//!         .await?;
//!     println!("{drivers}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Copilot facade and builder
//! - `config` - Configuration, credentials and access modes
//! - `auth` - Request authentication
//! - `transport` - HTTP transport layer and streaming
//! - `error` - Error taxonomy
//! - `types` - Wire types and file handles
//! - `streaming` - Chunked JSON parsing and text flattening
//! - `prompts` - Named prompt templates
//! - `services` - Upload and generation services
//! - `agents` - Extraction agents

pub mod agents;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod prompts;
pub mod services;
pub mod streaming;
pub mod transport;
pub mod types;

// Test support, also available to integration tests.
pub mod fixtures;
pub mod mocks;

pub use agents::{ArchitectureAgent, BusinessDriverAgent, DocumentSource};
pub use client::{AtamCopilot, AtamCopilotBuilder};
pub use config::{
    AccessMode, AuthMethod, Credentials, GeminiConfig, GeminiConfigBuilder, DEFAULT_MODEL,
    MAX_FILES_PER_REQUEST, MAX_FILE_SIZE_BYTES,
};
pub use error::{
    ConfigurationError, CopilotError, CopilotResult, InvalidArgumentError, ProviderError,
};
pub use services::chat::{ChatService, GenerationInput, MarkdownStream};
pub use services::files::{FileUpload, RawUpload};
pub use types::{FileState, ModelInfo, UploadedFileRef};
