//! Error category types for granular error handling.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// Neither an API key nor a Vertex AI project was configured.
    #[error("missing credentials: configure either an API key or a Vertex AI project")]
    MissingCredentials,

    /// The base URL could not be parsed.
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The offending URL (or the parse error text).
        url: String,
    },

    /// Any other invalid configuration value.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was wrong.
        message: String,
    },
}

/// Caller-supplied input that fails validation before any network call.
///
/// These are never retried and map to a client error at the transport
/// boundary.
#[derive(Error, Debug, Clone)]
pub enum InvalidArgumentError {
    /// No file references or paths were supplied.
    #[error("no files provided")]
    NoFilesProvided,

    /// More files than the per-request cap were supplied.
    #[error("too many files: {count} (maximum {max} files)")]
    TooManyFiles {
        /// Number of files supplied.
        count: usize,
        /// The fixed cap.
        max: usize,
    },

    /// A local path does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: String,
    },

    /// A local path exists but is not a regular file.
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: String,
    },

    /// A zero-length file was supplied.
    #[error("empty file not allowed: {name}")]
    EmptyFile {
        /// The offending file name.
        name: String,
    },

    /// A file exceeds the size ceiling.
    #[error("file size {size_bytes} bytes exceeds maximum {max_bytes} bytes: {name}")]
    FileTooLarge {
        /// The offending file name.
        name: String,
        /// Actual size in bytes.
        size_bytes: u64,
        /// The fixed ceiling in bytes.
        max_bytes: u64,
    },

    /// The file is not a PDF.
    #[error("unsupported file type '{detected}' for {name}: only application/pdf is supported")]
    UnsupportedMediaType {
        /// The offending file name.
        name: String,
        /// The declared or sniffed type.
        detected: String,
    },

    /// A file reference carries a blank URI.
    #[error("file reference has a blank URI")]
    BlankFileUri,

    /// A derivative-artifact operation received blank prior-stage text.
    #[error("prior-stage text must not be blank")]
    BlankPriorStageText,

    /// A generation request with neither prompt text nor file references.
    #[error("generation request must carry a prompt or at least one file reference")]
    EmptyGenerationRequest,
}

/// Failures originating from the generative-AI provider.
///
/// Never retried by this crate; the cause text is preserved for
/// diagnostics and the transport boundary maps these to a dependency
/// error.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// The provider returned a non-success HTTP status.
    #[error("provider returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The provider could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Underlying transport error text.
        message: String,
    },

    /// The provider response could not be parsed.
    #[error("malformed provider response: {message}")]
    MalformedResponse {
        /// Parse error text.
        message: String,
    },

    /// The provider returned a response with no usable text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// An uploaded file reached a terminal failure state.
    #[error("file processing failed: {display_name}")]
    FileProcessingFailed {
        /// Display name of the failed file.
        display_name: String,
    },

    /// A streaming response was interrupted mid-stream.
    #[error("stream interrupted: {message}")]
    StreamInterrupted {
        /// What went wrong.
        message: String,
    },
}
