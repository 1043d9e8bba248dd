//! Service layer: document upload and model invocation.

pub mod chat;
pub mod files;

pub use chat::{ChatService, GeminiChatService, GenerationInput, MarkdownStream};
pub use files::{FileUpload, FileUploadService, RawUpload};
