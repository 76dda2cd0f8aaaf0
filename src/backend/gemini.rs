use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::client::{GenerationRequest, LLMClient};
use crate::backend::media::ContentPart;
use crate::backend::utils::{check_response_status, handle_http_error};
use crate::error::{ReportError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini models available for generation
///
/// For the current list of model identifiers see the
/// [Google AI Models Documentation](https://ai.google.dev/models).
///
/// Any other model name can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use medreport::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-2.5-pro").unwrap();
/// assert_eq!(model, GeminiModel::Gemini25Pro);
///
/// let model = GeminiModel::from_string("gemini-medical-exp");
/// assert_eq!(model, GeminiModel::Custom("gemini-medical-exp".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Model {
    /// Gemini 3 Pro Preview, used for report analysis by default
    #[default]
    Gemini3ProPreview,
    /// Gemini 3 Flash Preview
    Gemini3FlashPreview,
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Gemini 2.0 Flash
    Gemini20Flash,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3ProPreview => "gemini-3-pro-preview",
            Model::Gemini3FlashPreview => "gemini-3-flash-preview",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. Unknown names become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-3-pro-preview" => Model::Gemini3ProPreview,
            "gemini-3-flash-preview" => Model::Gemini3FlashPreview,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            _ => Model::Custom(name),
        }
    }

    fn supports_thinking_level(&self) -> bool {
        self.as_str().starts_with("gemini-3")
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

/// Reasoning depth for Gemini 3 models.
///
/// Pro models accept `Low` and `High`; Flash models also accept `Minimal` and `Medium`.
/// Ignored for older model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl ThinkingLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ThinkingLevel::Minimal => "minimal",
            ThinkingLevel::Low => "low",
            ThinkingLevel::Medium => "medium",
            ThinkingLevel::High => "high",
        }
    }
}

/// Configuration for the Gemini client
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Model,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set
    pub base_url: Option<String>,
    pub thinking_level: Option<ThinkingLevel>,
}

impl GeminiConfig {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: Model::default(),
            max_tokens: None,
            timeout: None,
            base_url: None,
            thinking_level: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("thinking_level", &self.thinking_level)
            .finish()
    }
}

/// Client for the Gemini `generateContent` endpoint.
///
/// # Examples
///
/// ```no_run
/// use medreport::{GeminiClient, GeminiModel, ThinkingLevel};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::from_env()?
///     .model(GeminiModel::Gemini3ProPreview)
///     .thinking_level(ThinkingLevel::High)
///     .timeout(Duration::from_secs(120));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [ContentPart],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate, excluding thought summaries.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use medreport::GeminiClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ReportError::ConfigError(
                "API key cannot be empty. Use GeminiClient::from_env() to read from GEMINI_API_KEY environment variable.".to_string(),
            ));
        }

        let config = GeminiConfig::new(api_key);
        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create a new Gemini client by reading the API key from the `GEMINI_API_KEY`
    /// environment variable.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ReportError::ConfigError("GEMINI_API_KEY environment variable is not set".to_string())
        })?;
        Self::new(api_key)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        debug!(
            previous_model = ?self.config.model,
            new_model = ?model,
            "Setting Gemini model"
        );
        self.config.model = model;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(
            previous_max = ?self.config.max_tokens,
            new_max = max,
            "Setting max_tokens"
        );
        // Zero is rejected by the API
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set the timeout for HTTP requests.
    ///
    /// Applies to each request as a whole, connection included.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);

        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    "Failed to build reqwest client with timeout, using default"
                );
                reqwest::Client::new()
            });

        self
    }

    /// Set a custom base URL for Gemini-compatible APIs.
    ///
    /// * `base_url` - Base URL without trailing slash (e.g., "http://localhost:1234/v1beta")
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url);
        self
    }

    /// Set the thinking level for Gemini 3 models.
    #[instrument(skip(self))]
    pub fn thinking_level(mut self, level: ThinkingLevel) -> Self {
        debug!(
            previous_level = ?self.config.thinking_level,
            new_level = ?level,
            "Setting thinking level"
        );
        self.config.thinking_level = Some(level);
        self
    }

    fn endpoint(&self) -> String {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!(
            "{}/models/{}:generateContent",
            base_url,
            self.config.model.as_str()
        )
    }

    fn build_body<'a>(&self, request: &'a GenerationRequest) -> GenerateContentRequest<'a> {
        let thinking_config = if self.config.model.supports_thinking_level() {
            self.config.thinking_level.map(|level| ThinkingConfig {
                thinking_level: level.as_str(),
            })
        } else {
            None
        };

        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: [TextPart {
                    text: &request.system_instruction,
                }],
            },
            contents: [Content {
                role: "user",
                parts: &request.parts,
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: self.config.max_tokens,
                thinking_config,
            },
        }
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    #[instrument(
        name = "gemini_generate_content",
        skip(self, request),
        fields(
            model = %self.config.model.as_str(),
            parts = request.parts.len()
        )
    )]
    async fn generate_content(&self, request: &GenerationRequest) -> Result<Option<String>> {
        let url = self.endpoint();
        debug!(url = %url, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        debug!("Successfully received response from Gemini API");
        let body = response.text().await?;
        let completion: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Gemini API");
            e
        })?;

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                prompt_tokens = ?usage.prompt_token_count,
                output_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "Gemini token usage"
            );
        }

        let text = completion.text();
        match &text {
            Some(text) => debug!(content_len = text.len(), "Extracted text from response"),
            None => warn!("Gemini response contained no text"),
        }
        Ok(text)
    }
}
