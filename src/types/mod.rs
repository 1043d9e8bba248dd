//! Wire types for the provider API and the crate's own handles.

mod content;
mod files;
mod generation;
mod model;

pub use content::{Content, FileData, Part, Role};
pub use files::{FileState, ProviderFile, UploadFileResponse, UploadedFileRef};
pub use generation::{
    Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    UsageMetadata,
};
pub use model::{extract_model_version, ModelInfo};
