//! Configuration types for the ATAM copilot core.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigurationError, CopilotError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default model used for extraction and analysis.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default maximum output token count.
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 8192;

/// Default generation request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Fixed bound on a single provider upload call (30 seconds).
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Size ceiling for a single PDF (50 MB), enforced before upload.
pub const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Cap on files accepted by one upload request.
pub const MAX_FILES_PER_REQUEST: usize = 5;

/// Default Vertex AI location.
pub const DEFAULT_VERTEX_LOCATION: &str = "us-central1";

/// How the resolved credentials reach the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use the x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use the ?key= query parameter.
    QueryParam,
}

/// Access mode resolved once at startup from the configured credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessMode {
    /// Gemini Developer API with an API key.
    ApiKey,
    /// Vertex AI with a Google Cloud project.
    VertexAi,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessMode::ApiKey => write!(f, "API_KEY"),
            AccessMode::VertexAi => write!(f, "VERTEX_AI"),
        }
    }
}

/// Provider credentials. Exactly one variant is resolved at startup; the
/// services never re-branch on configuration presence per call.
#[derive(Clone)]
pub enum Credentials {
    /// Gemini Developer API key.
    ApiKey(SecretString),
    /// Vertex AI project credentials.
    VertexAi {
        /// Google Cloud project id.
        project: String,
        /// Deployment location, e.g. "us-central1".
        location: String,
        /// OAuth bearer token for the project.
        access_token: SecretString,
    },
}

/// Configuration for the copilot core.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Resolved provider credentials.
    pub credentials: Credentials,
    /// How API-key credentials are attached to requests.
    pub auth_method: AuthMethod,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Model name used for all generation calls.
    pub model: String,
    /// Sampling temperature, fixed per instance.
    pub temperature: f32,
    /// Maximum output token count, fixed per instance.
    pub max_output_tokens: i32,
    /// Timeout for generation requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Bound on a single provider upload call.
    pub upload_timeout: Duration,
    /// Per-file size ceiling in bytes.
    pub max_file_size: u64,
    /// Cap on files per upload request.
    pub max_files_per_request: usize,
    /// Directory where byte uploads are staged before transfer.
    pub staging_dir: PathBuf,
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// The access mode implied by the resolved credentials.
    pub fn access_mode(&self) -> AccessMode {
        match self.credentials {
            Credentials::ApiKey(_) => AccessMode::ApiKey,
            Credentials::VertexAi { .. } => AccessMode::VertexAi,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Credentials come from `GEMINI_API_KEY` / `GOOGLE_API_KEY`, or from
    /// `GEMINI_PROJECT_ID` (+ `GEMINI_LOCATION`, `GEMINI_ACCESS_TOKEN`)
    /// for Vertex AI. Model options come from `ATAM_MODEL`,
    /// `ATAM_TEMPERATURE` and `ATAM_MAX_OUTPUT_TOKENS`.
    pub fn from_env() -> Result<Self, CopilotError> {
        let mut builder = Self::builder();

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        {
            builder = builder.api_key(SecretString::new(api_key));
        } else if let Ok(project) = std::env::var("GEMINI_PROJECT_ID") {
            let location = std::env::var("GEMINI_LOCATION")
                .unwrap_or_else(|_| DEFAULT_VERTEX_LOCATION.to_string());
            let access_token = std::env::var("GEMINI_ACCESS_TOKEN").unwrap_or_default();
            builder = builder.vertex_ai(&project, &location, SecretString::new(access_token));
        }

        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            builder = builder.base_url(&base_url)?;
        }

        if let Ok(model) = std::env::var("ATAM_MODEL") {
            builder = builder.model(&model);
        }

        if let Some(temperature) = std::env::var("ATAM_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder = builder.temperature(temperature);
        }

        if let Some(max_tokens) = std::env::var("ATAM_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder = builder.max_output_tokens(max_tokens);
        }

        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        builder.build()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Default)]
pub struct GeminiConfigBuilder {
    credentials: Option<Credentials>,
    auth_method: Option<AuthMethod>,
    base_url: Option<Url>,
    api_version: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<i32>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    upload_timeout: Option<Duration>,
    max_file_size: Option<u64>,
    max_files_per_request: Option<usize>,
    staging_dir: Option<PathBuf>,
}

impl GeminiConfigBuilder {
    /// Use the Gemini Developer API with an API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.credentials = Some(Credentials::ApiKey(api_key));
        self
    }

    /// Use Vertex AI with a Google Cloud project.
    pub fn vertex_ai(mut self, project: &str, location: &str, access_token: SecretString) -> Self {
        self.credentials = Some(Credentials::VertexAi {
            project: project.to_string(),
            location: location.to_string(),
            access_token,
        });
        self
    }

    /// Set the authentication method for API-key credentials.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, CopilotError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum output token count.
    pub fn max_output_tokens(mut self, max_output_tokens: i32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set the generation request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the bound on a single provider upload call.
    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = Some(timeout);
        self
    }

    /// Set the per-file size ceiling.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Set the cap on files per upload request.
    pub fn max_files_per_request(mut self, count: usize) -> Self {
        self.max_files_per_request = Some(count);
        self
    }

    /// Set the directory where byte uploads are staged.
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Build the configuration.
    ///
    /// Fails with [`ConfigurationError::MissingCredentials`] when neither
    /// an API key nor a Vertex AI project was supplied.
    pub fn build(self) -> Result<GeminiConfig, CopilotError> {
        let credentials = self
            .credentials
            .ok_or(ConfigurationError::MissingCredentials)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        Ok(GeminiConfig {
            credentials,
            auth_method: self.auth_method.unwrap_or_default(),
            base_url,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_output_tokens: self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            upload_timeout: self
                .upload_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS)),
            max_file_size: self.max_file_size.unwrap_or(MAX_FILE_SIZE_BYTES),
            max_files_per_request: self
                .max_files_per_request
                .unwrap_or(MAX_FILES_PER_REQUEST),
            staging_dir: self.staging_dir.unwrap_or_else(std::env::temp_dir),
        })
    }
}
